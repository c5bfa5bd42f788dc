use clap::ValueEnum;
use serde::Serialize;
use std::collections::HashMap;

use super::markov::TransitionTable;
use super::merge::merge_sequences;
use super::roles::Role;

/// Which aggregator turns a group's sequences into its representative
/// build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Decoder {
    /// Weighted greedy prefix-extension merge.
    Merge,
    /// Transition-table decode.
    Markov,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    pub games: u32,
    pub build: Vec<u32>,
}

/// Aggregation context for representative builds: per (champion, role),
/// the raw sequence list and the transition table, both append-only while
/// the corpus is folded in. `finalize` runs once, afterwards.
#[derive(Debug, Default)]
pub struct BuildTracker {
    sequences: HashMap<(i32, Role), Vec<Vec<u32>>>,
    transitions: HashMap<(i32, Role), TransitionTable>,
}

impl BuildTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sequence(&mut self, champion_id: i32, role: Role, sequence: Vec<u32>) {
        self.transitions
            .entry((champion_id, role))
            .or_default()
            .record(&sequence);
        self.sequences
            .entry((champion_id, role))
            .or_default()
            .push(sequence);
    }

    #[allow(dead_code)]
    pub fn games(&self, champion_id: i32, role: Role) -> usize {
        self.sequences
            .get(&(champion_id, role))
            .map_or(0, |s| s.len())
    }

    pub fn finalize(&self, decoder: Decoder) -> HashMap<i32, HashMap<Role, BuildSummary>> {
        let mut out: HashMap<i32, HashMap<Role, BuildSummary>> = HashMap::new();

        for (&(champion_id, role), sequences) in &self.sequences {
            let build = match decoder {
                Decoder::Merge => merge_sequences(sequences),
                Decoder::Markov => self
                    .transitions
                    .get(&(champion_id, role))
                    .map(TransitionTable::decode)
                    .unwrap_or_default(),
            };

            out.entry(champion_id).or_default().insert(
                role,
                BuildSummary {
                    games: sequences.len() as u32,
                    build,
                },
            );
        }

        out
    }
}
