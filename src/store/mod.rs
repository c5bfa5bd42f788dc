pub mod catalog;
pub mod corpus;
pub mod models;
