//! Immutable game configuration: every table the formulas read.
//!
//! Built once and passed around by reference. Nothing mutates it at runtime.

use crate::achievements::{builtin_achievements, AchievementType, InfiniteAchievement};
use crate::items::{builtin_artifacts, builtin_upgrades, BonusItem, UpgradeItem};
use crate::zones::ZoneTable;
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameData {
    pub upgrades: Vec<UpgradeItem>,
    pub artifacts: Vec<BonusItem>,
    pub achievements: Vec<InfiniteAchievement>,
    #[serde(default)]
    pub zones: ZoneTable,
}

impl GameData {
    /// The tables the game ships with.
    pub fn builtin() -> Self {
        Self {
            upgrades: builtin_upgrades(),
            artifacts: builtin_artifacts(),
            achievements: builtin_achievements(),
            zones: ZoneTable::builtin(),
        }
    }

    /// Parses alternate tables, e.g. for balance experiments.
    pub fn from_json_str(json: &str) -> io::Result<Self> {
        serde_json::from_str(json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn upgrade(&self, id: &str) -> Option<&UpgradeItem> {
        self.upgrades.iter().find(|item| item.id == id)
    }

    pub fn artifact(&self, id: &str) -> Option<&BonusItem> {
        self.artifacts.iter().find(|item| item.id == id)
    }

    /// The achievement allowed to feed the stat aggregator.
    pub fn level_achievement(&self) -> Option<&InfiniteAchievement> {
        self.achievements
            .iter()
            .find(|ach| ach.kind == AchievementType::Level)
    }
}

impl Default for GameData {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Process-wide built-in tables, initialized on first use.
pub fn game_data() -> &'static GameData {
    static DATA: OnceLock<GameData> = OnceLock::new();
    DATA.get_or_init(GameData::builtin)
}
