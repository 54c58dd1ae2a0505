// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 100;
pub const TICK_SECONDS: f64 = TICK_INTERVAL_MS as f64 / 1000.0;
/// A frame delta above this is treated as a stall (suspended process, sleep)
/// and replaced by a single nominal tick.
pub const STALL_THRESHOLD_SECONDS: f64 = 10.0;

// Encounter timers (seconds)
pub const BASE_TIME: f64 = 30.0;
pub const BOSS_TIME: f64 = 30.0;

// Enemy scaling
pub const BASE_HP: f64 = 10.0;
pub const HP_GROWTH: f64 = 1.25;
pub const BOSS_HP_MULTIPLIER: f64 = 2.5;
pub const BOSS_LEVEL_INTERVAL: u32 = 5;

// Gold rewards
pub const BASE_GOLD_REWARD: f64 = 10.0;
pub const GOLD_REWARD_GROWTH: f64 = 1.2;
pub const BOSS_GOLD_MULTIPLIER: f64 = 3.0;

// Automatic damage crits
pub const AUTO_CRIT_CHANCE: f64 = 0.05;
pub const AUTO_CRIT_MULTIPLIER: f64 = 2.0;

// Upgrade milestones: output doubles every N owned levels
pub const MILESTONE_INTERVAL: u32 = 25;

// Click upgrade cost: floor(BASE * GROWTH^click_damage)
pub const CLICK_UPGRADE_BASE_COST: f64 = 10.0;
pub const CLICK_UPGRADE_COST_GROWTH: f64 = 1.5;

// Prestige
pub const PRESTIGE_UNLOCK_LEVEL: u32 = 50;
pub const PRESTIGE_LEVELS_PER_GEM: u32 = 10;
pub const PRESTIGE_BONUS_PER_GEM: f64 = 0.1;

// Achievements
/// Fallback tier spacing when a definition carries `step_power == 0`.
pub const DEFAULT_ACHIEVEMENT_STEP: f64 = 10.0;

// Offline progression
pub const OFFLINE_GOLD_RATE: f64 = 0.25;
pub const MAX_OFFLINE_SECONDS: i64 = 24 * 60 * 60;

// Persistence
/// Versioned save identifier. Bump it whenever the save schema changes so old
/// saves are never decoded against the new layout.
pub const SAVE_KEY: &str = "bounty_save_v6";
/// Leading 8 bytes of every save file ("BOUNTY" plus the schema version of `SAVE_KEY`).
pub const SAVE_VERSION_MAGIC: u64 = 0x424F_554E_5459_0006;
pub const SAVE_DIR_ENV: &str = "BOUNTY_SAVE_DIR";
