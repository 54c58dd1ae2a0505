//! Infinite achievement system.
//!
//! Achievements carry no saved state. Each query recomputes the tier from the
//! player's live level, gold or DPS.

pub mod data;
pub mod progress;
pub mod types;

pub use data::builtin_achievements;
pub use progress::{achievement_bonuses, get_achievement_progress};
pub use types::{
    AchievementBonuses, AchievementMetrics, AchievementProgress, AchievementType,
    InfiniteAchievement, RewardType,
};
