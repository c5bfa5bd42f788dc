use serde::Deserialize;
use std::collections::HashMap;

// Match record, one entry of a corpus chunk
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub participants: Vec<ParticipantDto>,
    #[serde(default)]
    pub teams: Vec<TeamDto>,
    #[serde(default)]
    pub timeline: TimelineDto,
}

impl MatchDto {
    /// Distinct team ids, preferring the teams block when present.
    pub fn team_ids(&self) -> Vec<i32> {
        if !self.teams.is_empty() {
            return self.teams.iter().map(|t| t.team_id).collect();
        }
        let mut ids = Vec::new();
        for p in &self.participants {
            if !ids.contains(&p.team_id) {
                ids.push(p.team_id);
            }
        }
        ids
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub participant_id: i32,
    pub champion_id: i32,
    pub team_id: i32,
    #[serde(default)]
    pub stats: ParticipantStatsDto,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStatsDto {
    #[serde(default)]
    pub item0: u32,
    #[serde(default)]
    pub item1: u32,
    #[serde(default)]
    pub item2: u32,
    #[serde(default)]
    pub item3: u32,
    #[serde(default)]
    pub item4: u32,
    #[serde(default)]
    pub item5: u32,
    #[serde(default)]
    pub item6: u32,
    #[serde(default)]
    pub minions_killed: u32,
    #[serde(default)]
    pub neutral_minions_killed: u32,
    #[serde(default)]
    pub physical_damage_dealt_to_champions: u64,
    #[serde(default)]
    pub magic_damage_dealt_to_champions: u64,
    #[serde(default)]
    pub true_damage_dealt_to_champions: u64,
}

impl ParticipantStatsDto {
    /// End-of-game item slots, trinket included.
    pub fn item_slots(&self) -> [u32; 7] {
        [
            self.item0, self.item1, self.item2, self.item3, self.item4, self.item5, self.item6,
        ]
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeamDto {
    pub team_id: i32,
}

#[derive(Debug, Deserialize, Default)]
pub struct TimelineDto {
    #[serde(default)]
    pub frames: Vec<FrameDto>,
}

#[derive(Debug, Deserialize, Default)]
pub struct FrameDto {
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub events: Vec<EventDto>,
}

// Only the item events carry data we read; everything else in a frame
// (kills, wards, skill-ups) deserializes into the defaults and is skipped
// by event_type.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub participant_id: i32,
    #[serde(default)]
    pub item_id: u32,
    #[serde(default)]
    pub item_before: u32,
}

pub const EVENT_ITEM_PURCHASED: &str = "ITEM_PURCHASED";
pub const EVENT_ITEM_UNDO: &str = "ITEM_UNDO";
pub const EVENT_ITEM_SOLD: &str = "ITEM_SOLD";

// Data Dragon champion.json
#[derive(Debug, Deserialize)]
pub struct DataDragonChampions {
    pub data: HashMap<String, ChampionDto>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChampionDto {
    pub key: String,
    pub name: String,
}

// Data Dragon item.json
#[derive(Debug, Deserialize)]
pub struct DataDragonItems {
    pub data: HashMap<String, ItemDto>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ItemDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, rename = "from")]
    pub builds_from: Vec<String>,
    #[serde(default, rename = "into")]
    pub upgrades_into: Vec<String>,
    pub gold: GoldDto,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GoldDto {
    pub total: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_riot_shaped_match() {
        let raw = serde_json::json!({
            "participants": [{
                "participantId": 1,
                "championId": 412,
                "teamId": 100,
                "stats": {
                    "item0": 3401, "item1": 0, "item2": 0, "item3": 0,
                    "item4": 0, "item5": 0, "item6": 3340,
                    "minionsKilled": 30,
                    "neutralMinionsKilled": 0,
                    "physicalDamageDealtToChampions": 4000,
                    "magicDamageDealtToChampions": 9000,
                    "trueDamageDealtToChampions": 500
                }
            }],
            "teams": [{"teamId": 100}, {"teamId": 200}],
            "timeline": {
                "frames": [{
                    "timestamp": 30000,
                    "events": [
                        {"eventType": "ITEM_PURCHASED", "participantId": 1, "itemId": 2010},
                        {"eventType": "CHAMPION_KILL", "killerId": 2, "victimId": 1}
                    ]
                }]
            }
        });

        let parsed: MatchDto = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.team_ids(), vec![100, 200]);
        let p = &parsed.participants[0];
        assert_eq!(p.champion_id, 412);
        assert_eq!(p.stats.item_slots()[0], 3401);
        assert_eq!(p.stats.item_slots()[6], 3340);
        assert_eq!(parsed.timeline.frames[0].events.len(), 2);
        assert_eq!(parsed.timeline.frames[0].events[1].event_type, "CHAMPION_KILL");
    }

    #[test]
    fn team_ids_fall_back_to_participants() {
        let raw = serde_json::json!({
            "participants": [
                {"participantId": 1, "championId": 1, "teamId": 200, "stats": {}},
                {"participantId": 2, "championId": 2, "teamId": 100, "stats": {}},
                {"participantId": 3, "championId": 3, "teamId": 200, "stats": {}}
            ],
            "timeline": {"frames": []}
        });

        let parsed: MatchDto = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.team_ids(), vec![200, 100]);
    }

    #[test]
    fn parses_data_dragon_item() {
        let raw = serde_json::json!({
            "data": {
                "3111": {
                    "name": "Mercury's Treads",
                    "tags": ["Boots", "SpellBlock"],
                    "from": ["1001", "1033"],
                    "into": ["3250", "3251"],
                    "gold": {"total": 1200}
                }
            }
        });

        let parsed: DataDragonItems = serde_json::from_value(raw).unwrap();
        let item = &parsed.data["3111"];
        assert_eq!(item.builds_from, vec!["1001", "1033"]);
        assert_eq!(item.gold.total, 1200);
    }
}
