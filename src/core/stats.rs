//! Stat aggregation: owned allies, artifacts, achievements and soul gems in,
//! damage and gold per second out.
//!
//! Results are never stored. Callers recompute after every purchase, prestige
//! and save load, and the tick pipeline recomputes every tick.

use super::constants::PRESTIGE_BONUS_PER_GEM;
use super::formulas::milestone_multiplier;
use super::game_state::GameState;
use crate::achievements::{
    achievement_bonuses, get_achievement_progress, AchievementBonuses, AchievementMetrics,
    AchievementType,
};
use crate::data::GameData;
use crate::items::Inventory;

/// Multipliers applied on top of raw ally output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multipliers {
    pub dps: f64,
    pub gold: f64,
    pub boss: f64,
    pub prestige: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            dps: 1.0,
            gold: 1.0,
            boss: 1.0,
            prestige: 1.0,
        }
    }
}

/// Output of [`calculate_total_stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatTotals {
    /// Ally DPS before any multiplier.
    pub raw_dps: f64,
    /// Ally GPS before any multiplier.
    pub raw_gps: f64,
    pub total_dps: f64,
    pub total_gps: f64,
    /// Extra encounter seconds from artifacts.
    pub total_time_bonus: f64,
    pub multipliers: Multipliers,
}

/// Soul gem multiplier: +10% per gem.
pub fn prestige_multiplier(soul_gems: u64) -> f64 {
    1.0 + soul_gems as f64 * PRESTIGE_BONUS_PER_GEM
}

/// Combines everything the player owns into final DPS, GPS and time bonus.
///
/// Order is fixed: ally output, artifacts, the level achievement, soul gems,
/// then the boss multiplier (DPS only, and only on boss levels).
///
/// Only the `Level` achievement may feed this function, and it is evaluated
/// with gold and DPS zeroed. Gold and DPS achievements are evaluated *from*
/// this function's output, so letting them feed back in would leave DPS
/// without a fixed point.
pub fn calculate_total_stats(
    data: &GameData,
    inventory: &Inventory,
    artifacts: &Inventory,
    soul_gems: u64,
    is_boss: bool,
    level: u32,
) -> StatTotals {
    let mut raw_dps = 0.0;
    let mut raw_gps = 0.0;

    for item in &data.upgrades {
        let count = inventory.count(&item.id);
        if count == 0 {
            continue;
        }
        let growth = if item.dps_growth == 1.0 {
            1.0
        } else {
            item.dps_growth.powf(count as f64)
        };
        let milestone = milestone_multiplier(count);

        raw_dps += item.base_dps * count as f64 * growth * milestone;
        raw_gps += item.base_gps * count as f64 * milestone;
    }

    let mut multipliers = Multipliers::default();
    let mut time_bonus = 0.0;

    for artifact in &data.artifacts {
        let count = artifacts.count(&artifact.id);
        if count == 0 {
            continue;
        }
        let count = count as f64;
        multipliers.dps += artifact.global_dps_multiplier * count;
        multipliers.gold += artifact.global_gold_multiplier * count;
        time_bonus += artifact.time_bonus * count;
        if let Some(boss) = artifact.boss_damage_multiplier {
            multipliers.boss += boss * count;
        }
    }

    if let Some(level_ach) = data.level_achievement() {
        let progress = get_achievement_progress(level_ach, &AchievementMetrics::level_only(level));
        if progress.tier > 0 {
            multipliers.dps += progress.bonus;
            multipliers.gold += progress.bonus;
        }
    }

    multipliers.prestige = prestige_multiplier(soul_gems);

    let mut total_dps = raw_dps * multipliers.dps * multipliers.prestige;
    if is_boss {
        total_dps *= multipliers.boss;
    }
    let total_gps = raw_gps * multipliers.gold * multipliers.prestige;

    StatTotals {
        raw_dps,
        raw_gps,
        total_dps,
        total_gps,
        total_time_bonus: time_bonus,
        multipliers,
    }
}

/// Rates actually applied during play: aggregated totals scaled by the gold
/// and DPS achievement bonuses.
///
/// The level achievement is counted once, by the aggregator. The metric
/// achievements are evaluated against the aggregated DPS, never the boosted
/// one, so their bonuses cannot feed back into their own input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LiveRates {
    pub totals: StatTotals,
    pub bonuses: AchievementBonuses,
    pub dps: f64,
    pub gps: f64,
}

impl LiveRates {
    pub fn for_state(data: &GameData, state: &GameState) -> Self {
        let totals = calculate_total_stats(
            data,
            &state.inventory,
            &state.artifacts,
            state.soul_gems,
            state.encounter.is_boss,
            state.encounter.level,
        );
        let metrics = AchievementMetrics {
            level: state.encounter.level,
            gold: state.gold,
            dps: totals.total_dps,
        };
        // The level achievement is already inside the aggregator multipliers
        let metric_achievements = data
            .achievements
            .iter()
            .filter(|ach| ach.kind != AchievementType::Level);
        Self::from_totals(totals, achievement_bonuses(metric_achievements, &metrics))
    }

    pub fn from_totals(totals: StatTotals, bonuses: AchievementBonuses) -> Self {
        Self {
            totals,
            bonuses,
            dps: totals.total_dps * (1.0 + bonuses.dps),
            gps: totals.total_gps * (1.0 + bonuses.gold),
        }
    }

    /// Multiplier applied to a kill's base gold reward.
    ///
    /// Uses the realized ratio `gps / total_gps` while there is passive
    /// income, otherwise the product of the gold multiplier and the gold
    /// achievement bonus. With no income the prestige multiplier is not part
    /// of the fallback.
    pub fn reward_ratio(&self) -> f64 {
        if self.gps > 0.0 && self.totals.total_gps > 0.0 {
            self.gps / self.totals.total_gps
        } else {
            self.totals.multipliers.gold * (1.0 + self.bonuses.gold)
        }
    }
}
