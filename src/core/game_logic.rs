//! Player actions: purchases, clicks and hard reset.
//!
//! Every action validates its own preconditions and either mutates the state
//! or refuses without touching it. Refusals are ordinary values.

use super::formulas::{click_upgrade_cost, item_cost};
use super::game_state::GameState;
use super::stats::LiveRates;
use super::tick::{resolve_encounter, TickEvent, TickSnapshot};
use crate::data::GameData;
use tracing::{debug, info};

/// Identifier reported for click-damage purchases.
pub const CLICK_UPGRADE_ID: &str = "click";

#[derive(Debug, Clone, PartialEq)]
pub enum RefusalReason {
    UnknownItem,
    Locked { unlock_level: u32 },
    Maxed,
    InsufficientGold { cost: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Purchase {
    Bought { id: String, cost: f64, owned: u32 },
    Refused(RefusalReason),
}

impl Purchase {
    pub fn is_bought(&self) -> bool {
        matches!(self, Purchase::Bought { .. })
    }
}

/// What a manual click did.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickOutcome {
    pub damage: f64,
    /// Set when the click landed the killing blow.
    pub kill: Option<TickEvent>,
}

/// Price of the next unit of ally `id`.
pub fn upgrade_cost(state: &GameState, data: &GameData, id: &str) -> Option<f64> {
    let item = data.upgrade(id)?;
    Some(item_cost(
        item.base_cost,
        item.cost_growth,
        state.inventory.count(id),
    ))
}

/// Price of the next level of artifact `id`.
pub fn artifact_cost(state: &GameState, data: &GameData, id: &str) -> Option<f64> {
    let item = data.artifact(id)?;
    Some(item_cost(
        item.base_cost,
        item.cost_growth,
        state.artifacts.count(id),
    ))
}

fn spend(state: &mut GameState, cost: f64) -> Result<(), RefusalReason> {
    if state.gold.is_nan() || state.gold < cost {
        return Err(RefusalReason::InsufficientGold { cost });
    }
    state.gold = (state.gold - cost).max(0.0);
    Ok(())
}

pub fn buy_upgrade(state: &mut GameState, data: &GameData, id: &str) -> Purchase {
    let Some(item) = data.upgrade(id) else {
        return Purchase::Refused(RefusalReason::UnknownItem);
    };
    if item.unlock_level > state.level() {
        return Purchase::Refused(RefusalReason::Locked {
            unlock_level: item.unlock_level,
        });
    }
    let owned = state.inventory.count(id);
    if item.is_maxed(owned) {
        return Purchase::Refused(RefusalReason::Maxed);
    }
    let cost = item_cost(item.base_cost, item.cost_growth, owned);
    if let Err(reason) = spend(state, cost) {
        return Purchase::Refused(reason);
    }

    let owned = state.inventory.increment(id);
    debug!(id, cost, owned, "upgrade bought");
    Purchase::Bought {
        id: id.to_string(),
        cost,
        owned,
    }
}

/// Artifacts are uncapped and never locked. The new time bonus applies from
/// the next encounter.
pub fn buy_artifact(state: &mut GameState, data: &GameData, id: &str) -> Purchase {
    let Some(item) = data.artifact(id) else {
        return Purchase::Refused(RefusalReason::UnknownItem);
    };
    let cost = item_cost(
        item.base_cost,
        item.cost_growth,
        state.artifacts.count(id),
    );
    if let Err(reason) = spend(state, cost) {
        return Purchase::Refused(reason);
    }

    let owned = state.artifacts.increment(id);
    debug!(id, cost, owned, "artifact bought");
    Purchase::Bought {
        id: id.to_string(),
        cost,
        owned,
    }
}

pub fn buy_click_upgrade(state: &mut GameState) -> Purchase {
    let cost = click_upgrade_cost(state.click_damage);
    if let Err(reason) = spend(state, cost) {
        return Purchase::Refused(reason);
    }
    state.click_damage = state.click_damage.saturating_add(1);
    debug!(cost, click_damage = state.click_damage, "click upgrade bought");
    Purchase::Bought {
        id: CLICK_UPGRADE_ID.to_string(),
        cost,
        owned: state.click_damage,
    }
}

/// Deals `damage` to the current enemy and resolves a kill on the spot.
///
/// Negative and non-finite damage count as zero. The click is always counted.
/// A click never triggers a timeout; that stays with the tick.
pub fn manual_click(state: &mut GameState, data: &GameData, damage: f64) -> ClickOutcome {
    let damage = if damage.is_finite() { damage.max(0.0) } else { 0.0 };
    state.stats.total_clicks = state.stats.total_clicks.saturating_add(1);

    if !state.encounter.is_alive() {
        return ClickOutcome { damage: 0.0, kill: None };
    }

    let rates = LiveRates::for_state(data, state);
    let before = state.encounter.current_hp;
    state.encounter = state.encounter.apply_damage(damage);
    let dealt = before - state.encounter.current_hp;

    let mut kill = None;
    if !state.encounter.is_alive() {
        let snapshot = TickSnapshot::capture(state);
        let (next, event) = resolve_encounter(
            snapshot,
            rates.reward_ratio(),
            rates.totals.total_time_bonus,
        );
        state.gold = next.gold;
        state.encounter = next.encounter;
        state.stats.total_kills = next.kills;
        state.stats.record_maxima(state.level(), state.gold, 0.0);
        kill = event;
    }

    ClickOutcome { damage: dealt, kill }
}

/// Clicks with the player's own click damage.
pub fn click(state: &mut GameState, data: &GameData) -> ClickOutcome {
    let damage = state.click_damage as f64;
    manual_click(state, data, damage)
}

/// Wipes everything, profile included, and starts over with a new player id.
pub fn hard_reset(state: &mut GameState, current_time: i64) {
    let old_id = std::mem::take(&mut state.stats.player_id);
    *state = GameState::new(current_time);
    info!(old_id = %old_id, new_id = %state.stats.player_id, "hard reset");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::game_data;

    #[test]
    fn test_buy_luffy_with_exact_gold() {
        let mut state = GameState::new(0);
        state.gold = 50.0;
        let purchase = buy_upgrade(&mut state, game_data(), "luffy");
        assert_eq!(
            purchase,
            Purchase::Bought {
                id: "luffy".to_string(),
                cost: 50.0,
                owned: 1
            }
        );
        assert_eq!(state.gold, 0.0);
        assert_eq!(state.inventory.count("luffy"), 1);
    }

    #[test]
    fn test_unaffordable_purchase_leaves_state_unchanged() {
        let mut state = GameState::new(0);
        state.gold = 59.0;
        state.inventory.set("luffy", 1);
        let before = state.clone();

        let purchase = buy_upgrade(&mut state, game_data(), "luffy");
        assert_eq!(
            purchase,
            Purchase::Refused(RefusalReason::InsufficientGold { cost: 60.0 })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_locked_and_unknown_items_are_refused() {
        let mut state = GameState::new(0);
        state.gold = 1e9;
        assert_eq!(
            buy_upgrade(&mut state, game_data(), "zoro"),
            Purchase::Refused(RefusalReason::Locked { unlock_level: 36 })
        );
        assert_eq!(
            buy_upgrade(&mut state, game_data(), "blackbeard"),
            Purchase::Refused(RefusalReason::UnknownItem)
        );
        assert_eq!(
            buy_artifact(&mut state, game_data(), "one_piece"),
            Purchase::Refused(RefusalReason::UnknownItem)
        );
        assert_eq!(state.gold, 1e9);
    }

    #[test]
    fn test_capped_item_is_refused() {
        let mut state = GameState::new(0);
        state.start_encounter(game_data(), 20);
        state.gold = 1e300;
        state.inventory.set("higuma", 75);
        assert_eq!(
            buy_upgrade(&mut state, game_data(), "higuma"),
            Purchase::Refused(RefusalReason::Maxed)
        );
        assert_eq!(state.inventory.count("higuma"), 75);
    }

    #[test]
    fn test_buy_artifact_and_cost_growth() {
        let mut state = GameState::new(0);
        state.gold = 1000.0 + 2500.0;
        assert!(buy_artifact(&mut state, game_data(), "berry").is_bought());
        assert_eq!(artifact_cost(&state, game_data(), "berry"), Some(2500.0));
        assert!(buy_artifact(&mut state, game_data(), "berry").is_bought());
        assert_eq!(state.artifacts.count("berry"), 2);
        assert_eq!(state.gold, 0.0);
    }

    #[test]
    fn test_buy_click_upgrade() {
        let mut state = GameState::new(0);
        state.gold = 20.0;
        let purchase = buy_click_upgrade(&mut state);
        assert!(purchase.is_bought());
        assert_eq!(state.click_damage, 2);
        assert_eq!(state.gold, 5.0);
        assert!(!buy_click_upgrade(&mut state).is_bought());
    }

    #[test]
    fn test_click_deals_click_damage() {
        let mut state = GameState::new(0);
        let outcome = click(&mut state, game_data());
        assert_eq!(outcome.damage, 1.0);
        assert_eq!(state.encounter.current_hp, 9.0);
        assert_eq!(state.stats.total_clicks, 1);
        assert!(outcome.kill.is_none());
    }

    #[test]
    fn test_killing_click_resolves_immediately() {
        let mut state = GameState::new(0);
        let outcome = manual_click(&mut state, game_data(), 50.0);
        assert_eq!(outcome.damage, 10.0);
        assert_eq!(
            outcome.kill,
            Some(TickEvent::EnemyKilled {
                level: 1,
                was_boss: false,
                gold_reward: 10.0
            })
        );
        assert_eq!(state.level(), 2);
        assert_eq!(state.gold, 10.0);
        assert_eq!(state.stats.total_kills, 1);
    }

    #[test]
    fn test_negative_click_counts_but_deals_nothing() {
        let mut state = GameState::new(0);
        let outcome = manual_click(&mut state, game_data(), -25.0);
        assert_eq!(outcome.damage, 0.0);
        assert_eq!(state.encounter.current_hp, 10.0);
        assert_eq!(state.stats.total_clicks, 1);
    }

    #[test]
    fn test_hard_reset_assigns_new_player_id() {
        let mut state = GameState::new(0);
        state.gold = 1e6;
        state.soul_gems = 4;
        state.stats.prestige_count = 2;
        let old_id = state.stats.player_id.clone();

        hard_reset(&mut state, 99);
        assert_eq!(state.gold, 0.0);
        assert_eq!(state.soul_gems, 0);
        assert_eq!(state.stats.prestige_count, 0);
        assert_eq!(state.last_save_time, 99);
        assert_ne!(state.stats.player_id, old_id);
    }
}
