use serde::Serialize;
use std::collections::HashMap;

use crate::store::catalog::Item;

use super::damage::DamageType;
use super::roles::Role;

/// Tags that mark an item as a defensive purchase.
pub const DEFENCE_TAGS: [&str; 3] = ["Armor", "SpellBlock", "Health"];

/// Minimum pick rate, in percent, below which an item is noise rather
/// than a deliberate counter purchase.
pub const MIN_PICK_RATE: f64 = 5.0;

pub fn is_defensive(item: &Item) -> bool {
    item.tags.iter().any(|t| DEFENCE_TAGS.contains(&t.as_str()))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenceChoice {
    pub item_id: u32,
    pub pick_rate: f64,
}

#[derive(Debug, Default)]
struct Bucket {
    items: HashMap<u32, u32>,
    games: u32,
}

impl Bucket {
    fn pick_rate(&self, item_id: u32) -> f64 {
        self.items.get(&item_id).copied().unwrap_or(0) as f64 / self.games.max(1) as f64 * 100.0
    }
}

pub type DefenceReport = HashMap<i32, HashMap<Role, HashMap<DamageType, Vec<DefenceChoice>>>>;

/// Aggregation context for enemy-conditioned defensive purchases: per
/// (champion, role, enemy damage type), item counts and a game total.
/// Append-only while the corpus is folded in; `finalize` runs once,
/// afterwards.
#[derive(Debug, Default)]
pub struct DefenceTracker {
    buckets: HashMap<(i32, Role, DamageType), Bucket>,
}

impl DefenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one participant's defensive end-of-game items against the
    /// damage profile their opponents dealt. One call is one game
    /// observation for the bucket.
    pub fn add_participant(
        &mut self,
        champion_id: i32,
        role: Role,
        enemy_damage: DamageType,
        items: impl IntoIterator<Item = u32>,
    ) {
        let bucket = self
            .buckets
            .entry((champion_id, role, enemy_damage))
            .or_default();
        for item_id in items {
            *bucket.items.entry(item_id).or_insert(0) += 1;
        }
        bucket.games += 1;
    }

    fn pick_rate(&self, champion_id: i32, role: Role, damage: DamageType, item_id: u32) -> f64 {
        self.buckets
            .get(&(champion_id, role, damage))
            .map_or(0.0, |bucket| bucket.pick_rate(item_id))
    }

    /// Keeps, per ad and ap bucket, the items whose pick rate rises
    /// monotonically with the share of the enemy damage they answer:
    /// under "ad" an item must clear the minimum rate and satisfy
    /// ad > mixed > ap (and symmetrically for "ap"). Everything else is
    /// generic popularity and is dropped. Mixed buckets are comparators
    /// only and are never emitted.
    pub fn finalize(&self) -> DefenceReport {
        let mut out: DefenceReport = HashMap::new();

        for (&(champion_id, role, damage), bucket) in &self.buckets {
            let counter = match damage {
                DamageType::Ad => DamageType::Ap,
                DamageType::Ap => DamageType::Ad,
                DamageType::Mixed => continue,
            };

            let mut kept: Vec<DefenceChoice> = bucket
                .items
                .keys()
                .filter_map(|&item_id| {
                    let rate = bucket.pick_rate(item_id);
                    let mixed_rate = self.pick_rate(champion_id, role, DamageType::Mixed, item_id);
                    let counter_rate = self.pick_rate(champion_id, role, counter, item_id);

                    let specific =
                        rate > MIN_PICK_RATE && rate > mixed_rate && mixed_rate > counter_rate;
                    specific.then(|| DefenceChoice {
                        item_id,
                        pick_rate: rate,
                    })
                })
                .collect();

            if kept.is_empty() {
                continue;
            }

            kept.sort_by(|a, b| {
                b.pick_rate
                    .partial_cmp(&a.pick_rate)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.item_id.cmp(&b.item_id))
            });

            out.entry(champion_id)
                .or_default()
                .entry(role)
                .or_default()
                .insert(damage, kept);
        }

        out
    }
}
