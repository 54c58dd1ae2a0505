//! Economy formulas shared by the game loop, the action API and the simulator.
//!
//! Everything here is a pure function of its arguments. Values are `f64`
//! because costs and rewards outgrow any integer type long before the game
//! stops being playable.

use super::constants::*;

/// Letter suffixes for `format_number`, one per power of 1000.
const NUMBER_SUFFIXES: [&str; 27] = [
    "", "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z",
];

/// Purchase price of the next unit: `floor(base * growth^owned)`.
///
/// Used identically for upgrade items and artifacts.
pub fn item_cost(base_cost: f64, cost_growth: f64, owned: u32) -> f64 {
    (base_cost * cost_growth.powf(owned as f64)).floor()
}

/// Every fifth level is a boss level.
pub fn is_boss_level(level: u32) -> bool {
    level % BOSS_LEVEL_INTERVAL == 0
}

/// Index of the 5-level block containing `level` (0 for levels 1-5).
pub fn world_tier(level: u32) -> u32 {
    level.saturating_sub(1) / BOSS_LEVEL_INTERVAL
}

/// Enemy max HP at a level. Bosses get 2.5x.
pub fn enemy_hp(level: u32) -> f64 {
    let level = level.max(1);
    let mut hp = BASE_HP * HP_GROWTH.powf((level - 1) as f64);
    if is_boss_level(level) {
        hp *= BOSS_HP_MULTIPLIER;
    }
    hp.floor()
}

/// Base gold for a kill, before any player multiplier.
///
/// Doubles every world tier and triples on boss levels.
pub fn gold_reward(level: u32) -> f64 {
    let level = level.max(1);
    let mut reward = (BASE_GOLD_REWARD * GOLD_REWARD_GROWTH.powf((level - 1) as f64)).floor();
    let tier = world_tier(level);
    if tier > 0 {
        reward *= 2f64.powf(tier as f64);
    }
    if is_boss_level(level) {
        reward *= BOSS_GOLD_MULTIPLIER;
    }
    reward
}

/// First level of the current 5-level block; where a failed boss sends the player.
pub fn checkpoint_level(level: u32) -> u32 {
    (world_tier(level) * BOSS_LEVEL_INTERVAL + 1).max(1)
}

/// Output multiplier for an upgrade owned `count` times: doubles every 25 levels.
pub fn milestone_multiplier(count: u32) -> f64 {
    2f64.powf((count / MILESTONE_INTERVAL) as f64)
}

/// Price of the next click-damage upgrade.
pub fn click_upgrade_cost(click_damage: u32) -> f64 {
    (CLICK_UPGRADE_BASE_COST * CLICK_UPGRADE_COST_GROWTH.powf(click_damage as f64)).floor()
}

/// Two-decimal scientific notation with an explicit exponent sign: `1.50e+81`.
fn scientific(n: f64) -> String {
    let formatted = format!("{n:.2e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

/// Formats large numbers idle-game style: `999`, `1A`, `12.5B`, ... `Z`,
/// then scientific notation.
pub fn format_number(n: f64) -> String {
    if n == 0.0 || n.is_nan() {
        return "0".to_string();
    }
    if n < 1000.0 {
        return format!("{}", n.floor() as i64);
    }
    if n.is_infinite() {
        return format!("{n:e}");
    }

    let mut index = (n.log10() / 3.0).floor() as usize;
    // log10 can land a hair under an exact power of 1000
    if 1000f64.powi(index as i32 + 1) <= n {
        index += 1;
    } else if index > 0 && 1000f64.powi(index as i32) > n {
        index -= 1;
    }

    if index >= NUMBER_SUFFIXES.len() {
        return scientific(n);
    }

    let scaled = n / 1000f64.powi(index as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{}{}", rounded, NUMBER_SUFFIXES[index])
}
