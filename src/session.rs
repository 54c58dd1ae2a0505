//! Game session: the single owner of live state.
//!
//! A [`GameSession`] holds the [`GameState`], the random source and a
//! [`SaveStore`]. Presentation code reads through the snapshot accessors and
//! changes state only through the action methods. Each action runs to
//! completion before the next tick and writes a snapshot when it mutates
//! anything.

use crate::core::formulas::click_upgrade_cost;
use crate::core::game_logic::{self, artifact_cost, upgrade_cost, ClickOutcome, Purchase};
use crate::core::game_state::{GameState, GameStats};
use crate::core::offline::{process_offline_progression_at, OfflineReport};
use crate::core::stats::LiveRates;
use crate::core::tick::{game_tick, TickResult};
use crate::data::GameData;
use crate::items::Inventory;
use crate::player::prestige::{calculate_prestige_gain, perform_prestige};
use crate::player::save::{SaveRecord, SaveStore};
use crate::zones;
use chrono::Utc;
use rand::Rng;
use std::io;
use tracing::{info, warn};

/// Read-only view of everything a display needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub gold: f64,
    pub level: u32,
    pub is_boss: bool,
    pub current_hp: f64,
    pub max_hp: f64,
    pub time_left: f64,
    pub max_time: f64,
    pub total_dps: f64,
    pub total_gps: f64,
    pub click_damage: u32,
    pub soul_gems: u64,
    /// Gems a prestige would award right now.
    pub prestige_gain: u64,
}

pub struct GameSession<'a, S: SaveStore, R: Rng> {
    data: &'a GameData,
    state: GameState,
    store: S,
    rng: R,
    offline: Option<OfflineReport>,
}

impl<'a, S: SaveStore, R: Rng> GameSession<'a, S, R> {
    /// Loads the stored game, or starts a new one.
    ///
    /// An unreadable save is logged and replaced by a fresh game as a whole.
    /// A restored game is credited offline income before the first tick.
    pub fn load(data: &'a GameData, store: S, rng: R) -> Self {
        let now = Utc::now().timestamp();
        let restored = match store.load() {
            Ok(Some(record)) => Some(record.restore_state(data)),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "save data unreadable, starting a new game");
                None
            }
        };

        let mut offline = None;
        let state = match restored {
            Some(mut state) => {
                info!(
                    player_id = %state.stats.player_id,
                    level = state.level(),
                    gold = state.gold,
                    soul_gems = state.soul_gems,
                    "save loaded"
                );
                offline = Some(process_offline_progression_at(&mut state, data, now));
                state
            }
            None => GameState::new(now),
        };

        let mut session = Self::with_state(data, state, store, rng);
        session.offline = offline;
        session.persist();
        session
    }

    /// Wraps an existing state without touching the store.
    pub fn with_state(data: &'a GameData, state: GameState, store: S, rng: R) -> Self {
        Self {
            data,
            state,
            store,
            rng,
            offline: None,
        }
    }

    pub fn data(&self) -> &GameData {
        self.data
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Offline credit applied when this session was loaded.
    pub fn offline_report(&self) -> Option<&OfflineReport> {
        self.offline.as_ref()
    }

    pub fn live_rates(&self) -> LiveRates {
        LiveRates::for_state(self.data, &self.state)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let rates = self.live_rates();
        let enc = &self.state.encounter;
        SessionSnapshot {
            gold: self.state.gold,
            level: enc.level,
            is_boss: enc.is_boss,
            current_hp: enc.current_hp,
            max_hp: enc.max_hp,
            time_left: enc.time_left,
            max_time: enc.max_time,
            total_dps: rates.dps,
            total_gps: rates.gps,
            click_damage: self.state.click_damage,
            soul_gems: self.state.soul_gems,
            prestige_gain: calculate_prestige_gain(enc.level),
        }
    }

    pub fn gold(&self) -> f64 {
        self.state.gold
    }

    pub fn level(&self) -> u32 {
        self.state.level()
    }

    pub fn inventory(&self) -> &Inventory {
        &self.state.inventory
    }

    pub fn artifacts(&self) -> &Inventory {
        &self.state.artifacts
    }

    pub fn stats(&self) -> &GameStats {
        &self.state.stats
    }

    pub fn upgrade_cost(&self, id: &str) -> Option<f64> {
        upgrade_cost(&self.state, self.data, id)
    }

    pub fn artifact_cost(&self, id: &str) -> Option<f64> {
        artifact_cost(&self.state, self.data, id)
    }

    pub fn click_upgrade_cost(&self) -> f64 {
        click_upgrade_cost(self.state.click_damage)
    }

    /// Portrait for ally `id` at its owned level.
    pub fn upgrade_image(&self, id: &str) -> Option<&str> {
        let item = self.data.upgrade(id)?;
        Some(zones::upgrade_image(item, self.state.inventory.count(id)))
    }

    pub fn zone_name(&self) -> Option<&str> {
        self.data.zones.zone_name(self.state.level())
    }

    pub fn monster_asset(&self) -> Option<&str> {
        self.data.zones.monster_asset(self.state.level())
    }

    /// Advances the game by `dt` seconds and saves whatever it changed.
    ///
    /// A tick clamped to zero changes nothing and writes nothing.
    pub fn tick(&mut self, dt: f64) -> TickResult {
        let result = game_tick(&mut self.state, self.data, dt, &mut self.rng);
        if result.delta > 0.0 || result.encounter_changed() {
            self.persist();
        }
        result
    }

    pub fn buy_upgrade(&mut self, id: &str) -> Purchase {
        let purchase = game_logic::buy_upgrade(&mut self.state, self.data, id);
        self.persist_if_bought(&purchase);
        purchase
    }

    pub fn buy_artifact(&mut self, id: &str) -> Purchase {
        let purchase = game_logic::buy_artifact(&mut self.state, self.data, id);
        self.persist_if_bought(&purchase);
        purchase
    }

    pub fn buy_click_upgrade(&mut self) -> Purchase {
        let purchase = game_logic::buy_click_upgrade(&mut self.state);
        self.persist_if_bought(&purchase);
        purchase
    }

    pub fn manual_click(&mut self, damage: f64) -> ClickOutcome {
        let outcome = game_logic::manual_click(&mut self.state, self.data, damage);
        self.persist();
        outcome
    }

    pub fn click(&mut self) -> ClickOutcome {
        let outcome = game_logic::click(&mut self.state, self.data);
        self.persist();
        outcome
    }

    /// Soul gems gained, or `None` when not eligible.
    pub fn prestige(&mut self) -> Option<u64> {
        let gained = perform_prestige(&mut self.state, self.data)?;
        self.persist();
        Some(gained)
    }

    /// Deletes the save and starts a brand-new game.
    pub fn hard_reset(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear save");
        }
        game_logic::hard_reset(&mut self.state, Utc::now().timestamp());
        self.persist();
    }

    /// Writes the current snapshot, stamping the save time.
    pub fn save(&mut self) -> io::Result<()> {
        self.state.last_save_time = Utc::now().timestamp();
        self.store.save(&SaveRecord::from_state(&self.state))
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "failed to save game");
        }
    }

    fn persist_if_bought(&mut self, purchase: &Purchase) {
        if purchase.is_bought() {
            self.persist();
        }
    }
}
