use super::encounter::Encounter;
use super::stats::{calculate_total_stats, StatTotals};
use crate::data::GameData;
use crate::items::Inventory;
use serde::{Deserialize, Serialize};

/// Lifetime profile statistics. Survive prestige; only a hard reset clears them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStats {
    pub max_level: u32,
    pub max_gold: f64,
    pub max_dps: f64,
    pub total_kills: u64,
    pub total_clicks: u64,
    /// Seconds of ticked play time.
    pub total_play_time: f64,
    pub prestige_count: u64,
    /// Assigned once; empty only in saves that predate it.
    pub player_id: String,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            max_level: 1,
            max_gold: 0.0,
            max_dps: 0.0,
            total_kills: 0,
            total_clicks: 0,
            total_play_time: 0.0,
            prestige_count: 0,
            player_id: String::new(),
        }
    }
}

impl GameStats {
    pub fn new() -> Self {
        Self {
            player_id: new_player_id(),
            ..Self::default()
        }
    }

    /// Folds current values into the running maxima.
    pub fn record_maxima(&mut self, level: u32, gold: f64, dps: f64) {
        self.max_level = self.max_level.max(level);
        if gold.is_finite() {
            self.max_gold = self.max_gold.max(gold);
        }
        if dps.is_finite() {
            self.max_dps = self.max_dps.max(dps);
        }
    }
}

/// `P-` followed by nine uppercase hex digits.
pub fn new_player_id() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
    format!("P-{}", &uuid[..9])
}

/// Main game state containing all player progress
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub gold: f64,
    pub click_damage: u32,
    pub inventory: Inventory,
    pub artifacts: Inventory,
    pub soul_gems: u64,
    /// Current fight. Owns the player's level.
    pub encounter: Encounter,
    pub stats: GameStats,
    pub last_save_time: i64,
}

impl GameState {
    pub fn new(current_time: i64) -> Self {
        Self {
            gold: 0.0,
            click_damage: 1,
            inventory: Inventory::new(),
            artifacts: Inventory::new(),
            soul_gems: 0,
            encounter: Encounter::start(1, 0.0),
            stats: GameStats::new(),
            last_save_time: current_time,
        }
    }

    pub fn level(&self) -> u32 {
        self.encounter.level
    }

    pub fn is_boss(&self) -> bool {
        self.encounter.is_boss
    }

    /// Aggregated stats for the current inventories and encounter.
    pub fn totals(&self, data: &GameData) -> StatTotals {
        calculate_total_stats(
            data,
            &self.inventory,
            &self.artifacts,
            self.soul_gems,
            self.encounter.is_boss,
            self.encounter.level,
        )
    }

    pub fn time_bonus(&self, data: &GameData) -> f64 {
        self.totals(data).total_time_bonus
    }

    /// Replaces the current fight with a fresh one at `level`.
    pub fn start_encounter(&mut self, data: &GameData, level: u32) {
        let bonus = self.time_bonus(data);
        self.encounter = Encounter::start(level, bonus);
    }
}
