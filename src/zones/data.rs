//! Zone tables: which background, name and monster roster belong to a level.

use serde::{Deserialize, Serialize};

/// One contiguous band of levels, ending at `level_ceiling` inclusive.
///
/// `None` marks the last, open-ended band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneTier<T> {
    pub level_ceiling: Option<u32>,
    pub value: T,
}

impl<T> ZoneTier<T> {
    pub fn up_to(level_ceiling: u32, value: T) -> Self {
        Self {
            level_ceiling: Some(level_ceiling),
            value,
        }
    }

    pub fn open_ended(value: T) -> Self {
        Self {
            level_ceiling: None,
            value,
        }
    }

    fn contains(&self, level: u32) -> bool {
        self.level_ceiling.map_or(true, |ceiling| level <= ceiling)
    }
}

/// First tier whose ceiling covers `level`, or `None` past the last ceiling.
pub fn tier_for_level<T>(tiers: &[ZoneTier<T>], level: u32) -> Option<&T> {
    tiers
        .iter()
        .find(|tier| tier.contains(level))
        .map(|tier| &tier.value)
}

/// Display information for a world zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneInfo {
    pub name: String,
    pub background: String,
}

fn zone(name: &str, background: &str) -> ZoneInfo {
    ZoneInfo {
        name: name.to_string(),
        background: background.to_string(),
    }
}

fn roster(prefix: &str, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .map(|name| format!("enemies/{prefix}/{name}"))
        .collect()
}

pub fn builtin_zones() -> Vec<ZoneTier<ZoneInfo>> {
    vec![
        ZoneTier::up_to(30, zone("Fuchsia Village", "backgrounds/fuchsia")),
        ZoneTier::up_to(60, zone("Shells Town", "backgrounds/shells_town")),
        ZoneTier::up_to(105, zone("Orange Town", "backgrounds/orange_town")),
        ZoneTier::open_ended(zone("Syrup Village", "backgrounds/syrup_village")),
    ]
}

pub fn builtin_monster_rosters() -> Vec<ZoneTier<Vec<String>>> {
    let soldiers = ["soldier_1", "soldier_2", "soldier_3", "soldier_4", "soldier_5"];
    vec![
        ZoneTier::up_to(
            30,
            roster(
                "alvida",
                &[
                    "soldier_1", "soldier_2", "soldier_3", "soldier_4", "soldier_5", "soldier_6",
                    "soldier_7",
                ],
            ),
        ),
        ZoneTier::up_to(
            60,
            roster(
                "morgan",
                &["agent_1", "agent_2", "marine_1", "marine_2", "marine_3", "marine_4"],
            ),
        ),
        ZoneTier::up_to(105, roster("baggy", &soldiers)),
        ZoneTier::up_to(165, roster("kuro", &soldiers)),
        ZoneTier::up_to(230, roster("krieg", &soldiers)),
        ZoneTier::up_to(305, roster("arlong", &soldiers)),
        ZoneTier::up_to(
            345,
            roster(
                "smoker",
                &["marine_1", "marine_2", "marine_3", "marine_4", "marine_5"],
            ),
        ),
    ]
}

/// Boss portraits in order of appearance, one per boss level (5, 10, 15, ...).
pub fn builtin_bosses() -> Vec<String> {
    [
        // Zone 1
        "higuma", "higuma", "higuma", "alvida", "alvida", "alvida",
        // Zone 2
        "helmeppo", "morgan", "helmeppo", "morgan", "helmeppo", "morgan",
        // Zone 3
        "mohji", "cabaji", "baggy_1", "mohji", "cabaji", "baggy_2", "mohji", "cabaji", "baggy_2",
        // Zone 4
        "buchi", "sham", "buchi", "sham", "jango", "buchi", "sham", "kuro_1", "jango", "kuro_2",
        "jango", "kuro_2",
        // Zone 5
        "fullbody", "fullbody", "fullbody", "mihawk", "pearl_1", "gin_1", "pearl_2", "gin_2",
        "krieg_1", "pearl_2", "gin_2", "krieg_2", "krieg_2",
        // Zone 6
        "chew", "kuroobi", "hatchan_1", "chew", "kuroobi", "hatchan_2", "arlong_1", "chew",
        "kuroobi", "hatchan_2", "arlong_2", "arlong_2", "nezumi", "nezumi", "nezumi",
        // Zone 7
        "tashigi_1", "smoker_1", "alvida_2", "tashigi_2", "smoker_2", "baggy_2", "tashigi_2",
        "smoker_2",
    ]
    .iter()
    .map(|name| format!("bosses/{name}"))
    .collect()
}
