//! Built-in infinite achievements.

use super::types::{AchievementType, InfiniteAchievement, RewardType};

/// All infinite achievements in display order.
///
/// Exactly one `Level` achievement is expected; the stat aggregator reads the
/// first one it finds.
pub fn builtin_achievements() -> Vec<InfiniteAchievement> {
    vec![
        InfiniteAchievement {
            id: "pirate_king".to_string(),
            name: "King of the Pirates".to_string(),
            kind: AchievementType::Level,
            description: "Based on your current level.".to_string(),
            base_threshold: 10.0,
            step_power: 10.0,
            reward_type: RewardType::Dps,
            reward_per_level: 0.1,
        },
        InfiniteAchievement {
            id: "gold_hoarder".to_string(),
            name: "Legendary Treasure".to_string(),
            kind: AchievementType::Gold,
            description: "Based on your gold.".to_string(),
            base_threshold: 1000.0,
            step_power: 1000.0,
            reward_type: RewardType::Gold,
            reward_per_level: 0.5,
        },
        InfiniteAchievement {
            id: "power_overwhelming".to_string(),
            name: "Destructive Force".to_string(),
            kind: AchievementType::Dps,
            description: "Based on your total DPS.".to_string(),
            base_threshold: 1000.0,
            step_power: 1000.0,
            reward_type: RewardType::Dps,
            reward_per_level: 0.5,
        },
    ]
}
