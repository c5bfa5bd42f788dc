use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::store::models::MatchDto;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Carry,
    Jungle,
    Support,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Carry, Role::Jungle, Role::Support];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Carry => "carry",
            Role::Jungle => "jungle",
            Role::Support => "support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed reference point in (lane farm share, jungle farm share) space.
#[derive(Debug, Clone, Copy)]
pub struct RoleCentroid {
    pub role: Role,
    pub cs_share: f64,
    pub jungle_share: f64,
}

/// Fitted offline with k-means over per-team farming shares. Each
/// participant's feature vector is minions killed over the team total and
/// neutral minions killed over the team total, both totals floored at 1.
pub const ROLE_CENTROIDS: [RoleCentroid; 3] = [
    RoleCentroid {
        role: Role::Carry,
        cs_share: 0.15075322,
        jungle_share: 0.04911325,
    },
    RoleCentroid {
        role: Role::Jungle,
        cs_share: 0.03122957,
        jungle_share: 0.35335706,
    },
    RoleCentroid {
        role: Role::Support,
        cs_share: 0.02262301,
        jungle_share: 0.00375224,
    },
];

pub struct RoleClassifier {
    centroids: [RoleCentroid; 3],
}

impl RoleClassifier {
    pub fn new() -> Self {
        Self::with_centroids(ROLE_CENTROIDS)
    }

    pub fn with_centroids(centroids: [RoleCentroid; 3]) -> Self {
        RoleClassifier { centroids }
    }

    /// Labels every participant of a match. Distance ties resolve to the
    /// centroid listed first in the table.
    pub fn classify_match(&self, match_data: &MatchDto) -> HashMap<i32, Role> {
        let mut roles = HashMap::new();

        for team_id in match_data.team_ids() {
            let members: Vec<_> = match_data
                .participants
                .iter()
                .filter(|p| p.team_id == team_id)
                .collect();

            let total_minions = members
                .iter()
                .map(|p| p.stats.minions_killed)
                .sum::<u32>()
                .max(1) as f64;
            let total_neutral = members
                .iter()
                .map(|p| p.stats.neutral_minions_killed)
                .sum::<u32>()
                .max(1) as f64;

            for p in members {
                let point = (
                    p.stats.minions_killed as f64 / total_minions,
                    p.stats.neutral_minions_killed as f64 / total_neutral,
                );
                roles.insert(p.participant_id, self.nearest(point));
            }
        }

        roles
    }

    fn nearest(&self, (x, y): (f64, f64)) -> Role {
        let mut best = self.centroids[0].role;
        let mut best_dist = f64::MAX;

        for centroid in &self.centroids {
            let d = (x - centroid.cs_share).powi(2) + (y - centroid.jungle_share).powi(2);
            if d < best_dist {
                best = centroid.role;
                best_dist = d;
            }
        }

        best
    }
}

impl Default for RoleClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::{ParticipantDto, ParticipantStatsDto, TeamDto, TimelineDto};

    fn participant(id: i32, team_id: i32, minions: u32, neutral: u32) -> ParticipantDto {
        ParticipantDto {
            participant_id: id,
            champion_id: id,
            team_id,
            stats: ParticipantStatsDto {
                minions_killed: minions,
                neutral_minions_killed: neutral,
                ..Default::default()
            },
        }
    }

    fn match_of(participants: Vec<ParticipantDto>) -> MatchDto {
        let mut teams: Vec<TeamDto> = Vec::new();
        for p in &participants {
            if !teams.iter().any(|t| t.team_id == p.team_id) {
                teams.push(TeamDto { team_id: p.team_id });
            }
        }
        MatchDto {
            participants,
            teams,
            timeline: TimelineDto::default(),
        }
    }

    #[test]
    fn every_participant_gets_exactly_one_label() {
        let m = match_of(vec![
            participant(1, 100, 220, 10),
            participant(2, 100, 180, 4),
            participant(3, 100, 30, 160),
            participant(4, 100, 190, 2),
            participant(5, 100, 40, 6),
            participant(6, 200, 0, 0),
            participant(7, 200, 210, 12),
            participant(8, 200, 25, 140),
            participant(9, 200, 170, 0),
            participant(10, 200, 200, 8),
        ]);

        let roles = RoleClassifier::new().classify_match(&m);
        assert_eq!(roles.len(), 10);
        for id in 1..=10 {
            assert!(roles.contains_key(&id), "participant {}", id);
        }
    }

    #[test]
    fn zero_farm_classifies_as_support() {
        let m = match_of(vec![
            participant(1, 100, 0, 0),
            participant(2, 100, 200, 20),
        ]);

        let roles = RoleClassifier::new().classify_match(&m);
        assert_eq!(roles[&1], Role::Support);
    }

    #[test]
    fn dominant_lane_farm_classifies_as_carry() {
        let m = match_of(vec![
            participant(1, 100, 250, 5),
            participant(2, 100, 240, 0),
            participant(3, 100, 230, 10),
            participant(4, 100, 220, 4),
            participant(5, 100, 35, 2),
        ]);

        let roles = RoleClassifier::new().classify_match(&m);
        assert_eq!(roles[&1], Role::Carry);
    }

    #[test]
    fn jungle_farm_classifies_as_jungle() {
        let m = match_of(vec![
            participant(1, 100, 40, 150),
            participant(2, 100, 210, 10),
            participant(3, 100, 200, 5),
            participant(4, 100, 190, 8),
            participant(5, 100, 30, 2),
        ]);

        let roles = RoleClassifier::new().classify_match(&m);
        assert_eq!(roles[&1], Role::Jungle);
    }

    #[test]
    fn shares_are_computed_within_each_team() {
        // Same raw farm, different teams: participant 2's team has a much
        // larger minion pool, so their share shrinks to support territory.
        let m = match_of(vec![
            participant(1, 100, 40, 0),
            participant(2, 200, 40, 0),
            participant(3, 200, 800, 0),
            participant(4, 200, 700, 0),
        ]);

        let roles = RoleClassifier::new().classify_match(&m);
        assert_eq!(roles[&1], Role::Carry);
        assert_eq!(roles[&2], Role::Support);
    }
}
