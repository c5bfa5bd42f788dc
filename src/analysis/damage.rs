use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::store::models::{MatchDto, ParticipantStatsDto};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Mixed,
    Ap,
    Ad,
}

impl DamageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageType::Mixed => "mixed",
            DamageType::Ap => "ap",
            DamageType::Ad => "ad",
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One team's damage dealt to champions, summed over its members.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeamDamage {
    pub physical: u64,
    pub magic: u64,
    pub true_damage: u64,
}

impl TeamDamage {
    pub fn add_participant(&mut self, stats: &ParticipantStatsDto) {
        self.physical += stats.physical_damage_dealt_to_champions;
        self.magic += stats.magic_damage_dealt_to_champions;
        self.true_damage += stats.true_damage_dealt_to_champions;
    }

    /// (ad share, ap share) of the team's total; the remainder is true
    /// damage. The total is floored at 1.
    pub fn shares(&self) -> (f64, f64) {
        let total = (self.physical + self.magic + self.true_damage).max(1) as f64;
        (self.physical as f64 / total, self.magic as f64 / total)
    }
}

/// Aggregate damage per team, in team-id order.
pub fn team_damage(match_data: &MatchDto) -> Vec<(i32, TeamDamage)> {
    match_data
        .team_ids()
        .into_iter()
        .map(|team_id| {
            let mut damage = TeamDamage::default();
            for p in match_data
                .participants
                .iter()
                .filter(|p| p.team_id == team_id)
            {
                damage.add_participant(&p.stats);
            }
            (team_id, damage)
        })
        .collect()
}

/// A fixed reference point in (ad share, ap share) space.
#[derive(Debug, Clone, Copy)]
pub struct DamageCentroid {
    pub damage_type: DamageType,
    pub ad_share: f64,
    pub ap_share: f64,
}

/// Fitted offline with k-means over per-team damage shares.
pub const DAMAGE_CENTROIDS: [DamageCentroid; 3] = [
    DamageCentroid {
        damage_type: DamageType::Mixed,
        ad_share: 0.47382649,
        ap_share: 0.46827455,
    },
    DamageCentroid {
        damage_type: DamageType::Ap,
        ad_share: 0.34041952,
        ap_share: 0.6114493,
    },
    DamageCentroid {
        damage_type: DamageType::Ad,
        ad_share: 0.61256222,
        ap_share: 0.32879833,
    },
];

pub struct DamageClassifier {
    centroids: [DamageCentroid; 3],
}

impl DamageClassifier {
    pub fn new() -> Self {
        Self::with_centroids(DAMAGE_CENTROIDS)
    }

    pub fn with_centroids(centroids: [DamageCentroid; 3]) -> Self {
        DamageClassifier { centroids }
    }

    /// Labels one team's damage profile. Distance ties resolve to the
    /// centroid listed first in the table.
    pub fn classify(&self, damage: &TeamDamage) -> DamageType {
        let (ad_share, ap_share) = damage.shares();

        let mut best = self.centroids[0].damage_type;
        let mut best_dist = f64::MAX;

        for centroid in &self.centroids {
            let d = (ad_share - centroid.ad_share).powi(2) + (ap_share - centroid.ap_share).powi(2);
            if d < best_dist {
                best = centroid.damage_type;
                best_dist = d;
            }
        }

        best
    }

    /// Damage labels per team, keyed by team id.
    pub fn classify_match(&self, match_data: &MatchDto) -> HashMap<i32, DamageType> {
        team_damage(match_data)
            .into_iter()
            .map(|(team_id, damage)| (team_id, self.classify(&damage)))
            .collect()
    }
}

impl Default for DamageClassifier {
    fn default() -> Self {
        Self::new()
    }
}
