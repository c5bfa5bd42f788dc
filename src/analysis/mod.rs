pub mod builds;
pub mod damage;
pub mod defence;
pub mod events;
pub mod markov;
pub mod merge;
pub mod normalizer;
pub mod roles;
pub mod starting;
