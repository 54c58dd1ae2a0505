//! Tier tracking for infinite achievements.

use super::types::{
    AchievementBonuses, AchievementMetrics, AchievementProgress, AchievementType,
    InfiniteAchievement, RewardType,
};
use crate::core::constants::DEFAULT_ACHIEVEMENT_STEP;

/// Absorbs float noise when a metric sits exactly on a power-of-ten boundary.
const TIER_EPSILON: f64 = 1e-9;

fn effective_step(step_power: f64) -> f64 {
    if step_power.is_finite() && step_power > 0.0 {
        step_power
    } else {
        DEFAULT_ACHIEVEMENT_STEP
    }
}

/// Computes the current tier, progress window and bonus of an achievement.
///
/// `Level` achievements tier linearly (`floor(value / step)`); `Gold` and
/// `Dps` tier on powers of ten (`floor(log10(value) / log10(step))`). Below
/// `base_threshold` the tier is 0 and the window is `[0, base_threshold)`.
pub fn get_achievement_progress(
    achievement: &InfiniteAchievement,
    metrics: &AchievementMetrics,
) -> AchievementProgress {
    let current_value = metrics.value_for(achievement.kind);
    let step = effective_step(achievement.step_power);

    let (tier, window_low, next_threshold) = if current_value < achievement.base_threshold
        || current_value.is_nan()
    {
        (0, 0.0, achievement.base_threshold)
    } else {
        match achievement.kind {
            AchievementType::Level => {
                let tier = (current_value / step).floor().max(0.0);
                (tier as u32, tier * step, (tier + 1.0) * step)
            }
            AchievementType::Gold | AchievementType::Dps => {
                let mut step_log = step.log10();
                if step_log <= 0.0 {
                    step_log = DEFAULT_ACHIEVEMENT_STEP.log10();
                }
                let value_log = current_value.max(f64::MIN_POSITIVE).log10();
                let tier = (value_log / step_log + TIER_EPSILON).floor().max(0.0);
                (
                    tier as u32,
                    10f64.powf(tier * step_log),
                    10f64.powf((tier + 1.0) * step_log),
                )
            }
        }
    };

    let mut percent = 0.0;
    if next_threshold > window_low {
        percent = (current_value - window_low) / (next_threshold - window_low) * 100.0;
    }
    let percent = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    };

    AchievementProgress {
        tier,
        percent,
        current_value,
        window_low,
        next_threshold,
        bonus: tier as f64 * achievement.reward_per_level,
    }
}

/// Sums the bonus of every achievement, grouped by the stat it rewards.
pub fn achievement_bonuses<'a>(
    achievements: impl IntoIterator<Item = &'a InfiniteAchievement>,
    metrics: &AchievementMetrics,
) -> AchievementBonuses {
    let mut bonuses = AchievementBonuses::default();
    for achievement in achievements {
        let progress = get_achievement_progress(achievement, metrics);
        match achievement.reward_type {
            RewardType::Dps => bonuses.dps += progress.bonus,
            RewardType::Gold => bonuses.gold += progress.bonus,
        }
    }
    bonuses
}
