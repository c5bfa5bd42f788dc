use serde::Serialize;
use std::collections::HashMap;

use super::roles::Role;

/// Purchases up to this timeline timestamp count as the opening buy.
pub const STARTING_CUTOFF_MS: i64 = 120_000;

/// How many distinct opening sets are reported per champion and role.
pub const STARTING_SETS_KEPT: usize = 3;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartingItem {
    pub item_id: u32,
    pub count: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartingSet {
    pub games: u32,
    pub items: Vec<StartingItem>,
}

/// Aggregation context for opening purchases: per (champion, role), game
/// counts keyed by the sorted (item, count) multiset bought before the
/// cutoff. Append-only while the corpus is folded in; `finalize` runs
/// once, afterwards.
#[derive(Debug, Default)]
pub struct StartingTracker {
    counts: HashMap<(i32, Role), HashMap<Vec<(u32, i32)>, u32>>,
}

impl StartingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one participant's opening buy from their net purchase
    /// counts. Entries undone or sold back down to zero are dropped; a
    /// participant who bought nothing is not recorded.
    pub fn add_participant(&mut self, champion_id: i32, role: Role, items: &HashMap<u32, i32>) {
        let mut set: Vec<(u32, i32)> = items
            .iter()
            .filter(|(_, &count)| count > 0)
            .map(|(&item_id, &count)| (item_id, count))
            .collect();
        if set.is_empty() {
            return;
        }
        set.sort_unstable();

        *self
            .counts
            .entry((champion_id, role))
            .or_default()
            .entry(set)
            .or_insert(0) += 1;
    }

    /// The most common opening sets per group, most played first; ties go
    /// to the lexicographically smaller set. At most
    /// `STARTING_SETS_KEPT` sets survive per group.
    pub fn finalize(&self) -> HashMap<i32, HashMap<Role, Vec<StartingSet>>> {
        let mut out: HashMap<i32, HashMap<Role, Vec<StartingSet>>> = HashMap::new();

        for (&(champion_id, role), sets) in &self.counts {
            let mut ranked: Vec<(&Vec<(u32, i32)>, u32)> =
                sets.iter().map(|(set, &games)| (set, games)).collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            ranked.truncate(STARTING_SETS_KEPT);

            let summaries = ranked
                .into_iter()
                .map(|(set, games)| StartingSet {
                    games,
                    items: set
                        .iter()
                        .map(|&(item_id, count)| StartingItem { item_id, count })
                        .collect(),
                })
                .collect();

            out.entry(champion_id).or_default().insert(role, summaries);
        }

        out
    }
}
