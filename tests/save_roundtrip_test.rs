//! Integration test: save round-trip and load reconciliation
//!
//! Serializes full snapshots, reloads them through both stores and checks
//! that derived values come from the current formulas, not the save.

use bounty::core::constants::{BASE_TIME, BOSS_TIME};
use bounty::core::game_state::GameState;
use bounty::core::stats::calculate_total_stats;
use bounty::game_data;
use bounty::player::{
    load_from_json_string, save_to_json_string, MemoryStore, SaveManager, SaveRecord, SaveStore,
};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

fn temp_save_path() -> PathBuf {
    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
    let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "bounty-it-{}-{}",
        std::process::id(),
        test_id
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir.join("save.dat")
}

fn played_state() -> GameState {
    let data = game_data();
    let mut state = GameState::new(1_700_000_000);
    state.gold = 98_765.25;
    state.click_damage = 4;
    state.soul_gems = 6;
    state.inventory.set("luffy", 26);
    state.inventory.set("higuma", 3);
    state.artifacts.set("observation", 3);
    state.artifacts.set("armament", 1);
    state.start_encounter(data, 18);
    state.stats.max_level = 44;
    state.stats.total_kills = 321;
    state
}

#[test]
fn test_json_round_trip_preserves_progress() {
    let data = game_data();
    let state = played_state();

    let json = save_to_json_string(&state).expect("serialize");
    let restored = load_from_json_string(&json, data).expect("deserialize");

    assert_eq!(restored.gold, state.gold);
    assert_eq!(restored.level(), state.level());
    assert_eq!(restored.inventory, state.inventory);
    assert_eq!(restored.artifacts, state.artifacts);
    assert_eq!(restored.soul_gems, state.soul_gems);
    assert_eq!(restored.stats, state.stats);
}

#[test]
fn test_time_bonus_recomputed_from_reloaded_inventories() {
    let data = game_data();
    let mut state = played_state();
    // A finished timer forces a fresh one on load
    state.encounter.time_left = 0.0;

    let json = save_to_json_string(&state).expect("serialize");
    let restored = load_from_json_string(&json, data).expect("deserialize");

    let direct = calculate_total_stats(
        data,
        &restored.inventory,
        &restored.artifacts,
        restored.soul_gems,
        restored.is_boss(),
        restored.level(),
    );
    assert_eq!(direct.total_time_bonus, 6.0);
    assert_eq!(restored.encounter.time_left, BASE_TIME + direct.total_time_bonus);
}

#[test]
fn test_stale_time_bonus_in_save_is_ignored() {
    // Saved while the player had no artifacts; a positive timer is resumed
    let json = r#"{"level":20,"timeLeft":12.5,"currentHp":3,"artifactsInventory":{"observation":1}}"#;
    let restored = load_from_json_string(json, game_data()).expect("deserialize");
    assert!(restored.is_boss());
    assert_eq!(restored.encounter.time_left, 12.5);
    assert_eq!(restored.encounter.current_hp, 3.0);
    assert_eq!(restored.encounter.max_time, BOSS_TIME + 2.0);
}

#[test]
fn test_file_store_round_trip() {
    let data = game_data();
    let state = played_state();
    let path = temp_save_path();

    let mut manager = SaveManager::with_path(&path);
    manager
        .save(&SaveRecord::from_state(&state))
        .expect("save to disk");

    let record = manager.load().expect("read").expect("record present");
    let restored = record.restore_state(data);
    assert_eq!(restored, state);

    manager.clear().expect("clear");
    assert!(manager.load().expect("read after clear").is_none());
}

#[test]
fn test_truncated_file_is_rejected() {
    let path = temp_save_path();
    let mut manager = SaveManager::with_path(&path);
    manager
        .save(&SaveRecord::from_state(&played_state()))
        .expect("save to disk");

    let bytes = fs::read(&path).expect("read bytes");
    fs::write(&path, &bytes[..bytes.len() - 10]).expect("truncate");

    assert!(manager.load().is_err());
    let _ = fs::remove_file(&path);
}

#[test]
fn test_memory_store_matches_json_codec() {
    let state = played_state();
    let mut store = MemoryStore::new();
    store.save(&SaveRecord::from_state(&state)).expect("save");

    let json = store.json().expect("json stored").to_string();
    let via_codec = load_from_json_string(&json, game_data()).expect("decode");
    assert_eq!(via_codec, state);
}
