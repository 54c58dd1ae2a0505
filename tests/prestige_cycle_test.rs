//! Integration test: Complete prestige cycle
//!
//! Tests the full flow: new game → reach level 50 → prestige → verify the
//! wipe/preserve split and the soul gem multiplier.

use bounty::core::constants::BASE_TIME;
use bounty::core::game_state::GameState;
use bounty::core::stats::LiveRates;
use bounty::game_data;
use bounty::player::prestige::{calculate_prestige_gain, can_prestige, perform_prestige};

fn advanced_state(level: u32) -> GameState {
    let data = game_data();
    let mut state = GameState::new(0);
    state.gold = 1e7;
    state.click_damage = 12;
    state.inventory.set("luffy", 80);
    state.inventory.set("koby", 30);
    state.artifacts.set("berry", 2);
    state.artifacts.set("observation", 1);
    state.stats.total_kills = 1_234;
    state.stats.total_clicks = 999;
    state.start_encounter(data, level);
    state
}

#[test]
fn test_gain_table() {
    assert_eq!(calculate_prestige_gain(49), 0);
    assert_eq!(calculate_prestige_gain(50), 1);
    assert_eq!(calculate_prestige_gain(60), 2);
    assert_eq!(calculate_prestige_gain(79), 3);
}

#[test]
fn test_complete_prestige_cycle() {
    let data = game_data();
    let mut state = advanced_state(72);
    assert!(can_prestige(&state));
    let player_id = state.stats.player_id.clone();

    let gained = perform_prestige(&mut state, data).expect("level 72 is eligible");
    assert_eq!(gained, 3);

    // Wiped
    assert_eq!(state.gold, 0.0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.click_damage, 1);
    assert!(state.inventory.is_empty());

    // Preserved
    assert_eq!(state.soul_gems, 3);
    assert_eq!(state.artifacts.count("berry"), 2);
    assert_eq!(state.stats.total_kills, 1_234);
    assert_eq!(state.stats.total_clicks, 999);
    assert_eq!(state.stats.player_id, player_id);
    assert_eq!(state.stats.prestige_count, 1);

    // Fresh level 1 encounter with the artifact time bonus
    assert_eq!(state.encounter.current_hp, 10.0);
    assert_eq!(state.encounter.time_left, BASE_TIME + 2.0);
    assert!(!can_prestige(&state));
}

#[test]
fn test_soul_gems_accumulate_across_cycles() {
    let data = game_data();
    let mut state = advanced_state(50);
    assert_eq!(perform_prestige(&mut state, data), Some(1));

    state.start_encounter(data, 65);
    assert_eq!(perform_prestige(&mut state, data), Some(2));
    assert_eq!(state.soul_gems, 3);
    assert_eq!(state.stats.prestige_count, 2);
}

#[test]
fn test_soul_gems_boost_income() {
    let data = game_data();
    let mut before = GameState::new(0);
    before.inventory.set("luffy", 1);
    before.inventory.set("koby", 1);
    let base = LiveRates::for_state(data, &before);

    let mut after = before.clone();
    after.soul_gems = 5;
    let boosted = LiveRates::for_state(data, &after);

    assert!((boosted.dps - base.dps * 1.5).abs() < 1e-9);
    assert!((boosted.gps - base.gps * 1.5).abs() < 1e-9);
}

#[test]
fn test_ineligible_prestige_is_a_no_op() {
    let data = game_data();
    let mut state = advanced_state(49);
    let before = state.clone();
    assert_eq!(perform_prestige(&mut state, data), None);
    assert_eq!(state, before);
}
