//! Infinite achievement definitions and progress values.

use serde::{Deserialize, Serialize};

/// Which live metric drives an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementType {
    /// Linear tiers on the current stage level.
    Level,
    /// Power-of-ten tiers on current gold.
    Gold,
    /// Power-of-ten tiers on current DPS.
    Dps,
}

/// Which stat an achievement's bonus boosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardType {
    Dps,
    Gold,
}

/// An uncapped achievement whose tier is recomputed from a live metric.
///
/// There is no unlocked flag and nothing is persisted: the tier can drop
/// when the metric drops (gold spent, level lost to a timeout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfiniteAchievement {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AchievementType,
    #[serde(default)]
    pub description: String,
    /// Metric value at which tier 1 starts.
    pub base_threshold: f64,
    /// Tier spacing: additive for `Level`, a power-of-ten ratio for `Gold`/`Dps`.
    pub step_power: f64,
    pub reward_type: RewardType,
    /// Bonus fraction granted per tier (0.1 = +10%).
    pub reward_per_level: f64,
}

/// Live player metrics an achievement can read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AchievementMetrics {
    pub level: u32,
    pub gold: f64,
    pub dps: f64,
}

impl AchievementMetrics {
    /// Metrics with gold and DPS zeroed, for evaluating level-driven bonuses
    /// without reading any value those bonuses feed into.
    pub fn level_only(level: u32) -> Self {
        Self {
            level,
            gold: 0.0,
            dps: 0.0,
        }
    }

    pub fn value_for(&self, kind: AchievementType) -> f64 {
        match kind {
            AchievementType::Level => self.level as f64,
            AchievementType::Gold => self.gold,
            AchievementType::Dps => self.dps,
        }
    }
}

/// Where a metric sits on an achievement's tier ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AchievementProgress {
    pub tier: u32,
    /// Progress through the current window, clamped to 0-100.
    pub percent: f64,
    pub current_value: f64,
    pub window_low: f64,
    pub next_threshold: f64,
    /// `tier * reward_per_level`.
    pub bonus: f64,
}

/// Summed achievement bonuses grouped by reward stat.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AchievementBonuses {
    pub dps: f64,
    pub gold: f64,
}
