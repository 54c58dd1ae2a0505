use crate::core::constants::{PRESTIGE_LEVELS_PER_GEM, PRESTIGE_UNLOCK_LEVEL};
use crate::core::game_state::GameState;
use crate::data::GameData;
use tracing::info;

/// Soul gems a prestige at `level` would award.
///
/// # Returns
/// 0 below [`PRESTIGE_UNLOCK_LEVEL`], otherwise one gem at the unlock level
/// plus one per further 10 levels.
pub fn calculate_prestige_gain(level: u32) -> u64 {
    if level < PRESTIGE_UNLOCK_LEVEL {
        return 0;
    }
    ((level - PRESTIGE_UNLOCK_LEVEL) / PRESTIGE_LEVELS_PER_GEM) as u64 + 1
}

/// Checks if the player can prestige
///
/// # Arguments
/// * `state` - The current game state
///
/// # Returns
/// true if the current level is at or above [`PRESTIGE_UNLOCK_LEVEL`]
pub fn can_prestige(state: &GameState) -> bool {
    state.level() >= PRESTIGE_UNLOCK_LEVEL
}

/// Performs a prestige reset.
///
/// Gold, level, click damage and owned allies are wiped. Artifacts, soul
/// gems and profile statistics survive. The new level 1 encounter already
/// includes the artifact time bonus.
///
/// # Returns
/// Soul gems gained, or `None` (state untouched) when not eligible.
pub fn perform_prestige(state: &mut GameState, data: &GameData) -> Option<u64> {
    let gain = calculate_prestige_gain(state.level());
    if gain == 0 {
        return None;
    }

    let from_level = state.level();
    state.soul_gems = state.soul_gems.saturating_add(gain);
    state.gold = 0.0;
    state.click_damage = 1;
    state.inventory.clear();
    state.start_encounter(data, 1);
    state.stats.prestige_count = state.stats.prestige_count.saturating_add(1);

    info!(
        from_level,
        gain,
        soul_gems = state.soul_gems,
        prestige_count = state.stats.prestige_count,
        "prestige"
    );
    Some(gain)
}
