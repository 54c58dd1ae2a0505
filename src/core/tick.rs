//! Per-tick orchestration.
//!
//! A tick runs as an ordered pipeline of pure stages over a [`TickSnapshot`]:
//! passive income, timer countdown, automatic damage, statistics, then
//! resolution. Each stage takes a snapshot and returns a new one, so every
//! step can be tested on its own. [`game_tick`] reads the live rates once,
//! runs the stages and writes the final snapshot back into [`GameState`].

use super::constants::{AUTO_CRIT_CHANCE, AUTO_CRIT_MULTIPLIER};
use super::encounter::{clamp_delta, Encounter, Resolution};
use super::formulas::gold_reward;
use super::game_state::GameState;
use super::stats::LiveRates;
use crate::data::GameData;
use rand::Rng;
use tracing::debug;

/// A single event produced by a game tick or a manual click.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// Automatic damage rolled a critical hit.
    CriticalHit { damage: f64 },

    /// The enemy died; the player advanced a level.
    EnemyKilled {
        level: u32,
        was_boss: bool,
        gold_reward: f64,
    },

    /// The timer ran out; the player was pushed back.
    EncounterTimedOut {
        level: u32,
        was_boss: bool,
        retreat_to: u32,
    },
}

/// Result of processing a single game tick.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Events produced during this tick, in chronological order.
    pub events: Vec<TickEvent>,
    /// Delta actually simulated after stall clamping.
    pub delta: f64,
    /// Passive gold credited this tick (kill rewards excluded).
    pub passive_gold: f64,
    pub damage_dealt: f64,
}

impl TickResult {
    /// True when the encounter ended this tick.
    pub fn encounter_changed(&self) -> bool {
        self.events.iter().any(|event| {
            matches!(
                event,
                TickEvent::EnemyKilled { .. } | TickEvent::EncounterTimedOut { .. }
            )
        })
    }
}

/// The fields a tick may change, copied out of [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSnapshot {
    pub gold: f64,
    pub encounter: Encounter,
    pub play_time: f64,
    pub kills: u64,
}

impl TickSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            gold: state.gold,
            encounter: state.encounter,
            play_time: state.stats.total_play_time,
            kills: state.stats.total_kills,
        }
    }

    fn write_back(self, state: &mut GameState) {
        state.gold = self.gold;
        state.encounter = self.encounter;
        state.stats.total_play_time = self.play_time;
        state.stats.total_kills = self.kills;
    }
}

/// Stage 1: passive income, only while the target is alive.
pub fn accrue_income(snapshot: TickSnapshot, gps: f64, dt: f64) -> TickSnapshot {
    if !snapshot.encounter.is_alive() || !gps.is_finite() || gps <= 0.0 {
        return snapshot;
    }
    TickSnapshot {
        gold: snapshot.gold + gps * dt,
        ..snapshot
    }
}

/// Stage 2: timer countdown.
pub fn advance_timer(snapshot: TickSnapshot, dt: f64) -> TickSnapshot {
    TickSnapshot {
        encounter: snapshot.encounter.advance_timer(dt),
        ..snapshot
    }
}

/// Stage 3: automatic damage. `crit` doubles this tick's damage.
pub fn apply_auto_damage(snapshot: TickSnapshot, dps: f64, dt: f64, crit: bool) -> TickSnapshot {
    let mut damage = dps * dt;
    if crit {
        damage *= AUTO_CRIT_MULTIPLIER;
    }
    TickSnapshot {
        encounter: snapshot.encounter.apply_damage(damage),
        ..snapshot
    }
}

/// Stage 4: play time.
pub fn accumulate_play_time(snapshot: TickSnapshot, dt: f64) -> TickSnapshot {
    TickSnapshot {
        play_time: snapshot.play_time + dt,
        ..snapshot
    }
}

/// Stage 5: kill or timeout handling.
///
/// Returns the next snapshot and the event describing the transition, if any.
pub fn resolve_encounter(
    snapshot: TickSnapshot,
    reward_ratio: f64,
    time_bonus: f64,
) -> (TickSnapshot, Option<TickEvent>) {
    let encounter = snapshot.encounter;
    match encounter.resolve() {
        Resolution::Ongoing => (snapshot, None),
        Resolution::Killed => {
            let reward = kill_reward(encounter.level, reward_ratio);
            let next = TickSnapshot {
                gold: snapshot.gold + reward,
                encounter: encounter.after_kill(time_bonus),
                kills: snapshot.kills.saturating_add(1),
                ..snapshot
            };
            debug!(
                level = encounter.level,
                boss = encounter.is_boss,
                reward,
                "enemy killed"
            );
            let event = TickEvent::EnemyKilled {
                level: encounter.level,
                was_boss: encounter.is_boss,
                gold_reward: reward,
            };
            (next, Some(event))
        }
        Resolution::TimedOut => {
            let next = TickSnapshot {
                encounter: encounter.after_timeout(time_bonus),
                ..snapshot
            };
            debug!(
                level = encounter.level,
                boss = encounter.is_boss,
                retreat_to = next.encounter.level,
                "encounter timed out"
            );
            let event = TickEvent::EncounterTimedOut {
                level: encounter.level,
                was_boss: encounter.is_boss,
                retreat_to: next.encounter.level,
            };
            (next, Some(event))
        }
    }
}

/// Gold for killing the enemy at `level`, scaled by the realized gold ratio.
pub fn kill_reward(level: u32, reward_ratio: f64) -> f64 {
    let ratio = if reward_ratio.is_finite() && reward_ratio > 0.0 {
        reward_ratio
    } else {
        1.0
    };
    gold_reward(level) * ratio
}

/// Processes one tick of `dt` seconds.
///
/// `rng` is any `impl Rng`: pass `rand::thread_rng()` in production, or a
/// seeded `rand_chacha::ChaCha8Rng` for reproducible runs.
pub fn game_tick<R: Rng>(
    state: &mut GameState,
    data: &GameData,
    dt: f64,
    rng: &mut R,
) -> TickResult {
    let dt = clamp_delta(dt);
    let rates = LiveRates::for_state(data, state);
    let mut result = TickResult {
        delta: dt,
        ..TickResult::default()
    };

    let start = TickSnapshot::capture(state);
    let snapshot = accrue_income(start, rates.gps, dt);
    result.passive_gold = snapshot.gold - start.gold;

    let snapshot = advance_timer(snapshot, dt);

    let crit = snapshot.encounter.is_alive() && rng.gen_bool(AUTO_CRIT_CHANCE);
    let before_hp = snapshot.encounter.current_hp;
    let snapshot = apply_auto_damage(snapshot, rates.dps, dt, crit);
    result.damage_dealt = before_hp - snapshot.encounter.current_hp;
    if crit && result.damage_dealt > 0.0 {
        result.events.push(TickEvent::CriticalHit {
            damage: result.damage_dealt,
        });
    }

    let snapshot = accumulate_play_time(snapshot, dt);
    state
        .stats
        .record_maxima(snapshot.encounter.level, snapshot.gold, rates.dps);

    let (snapshot, event) = resolve_encounter(
        snapshot,
        rates.reward_ratio(),
        rates.totals.total_time_bonus,
    );
    result.events.extend(event);

    snapshot.write_back(state);
    state.stats.record_maxima(state.level(), state.gold, 0.0);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{BASE_TIME, TICK_SECONDS};
    use crate::core::formulas::enemy_hp;
    use crate::data::game_data;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn snapshot_at(level: u32) -> TickSnapshot {
        TickSnapshot {
            gold: 0.0,
            encounter: Encounter::start(level, 0.0),
            play_time: 0.0,
            kills: 0,
        }
    }

    #[test]
    fn test_income_only_while_target_alive() {
        let alive = accrue_income(snapshot_at(1), 10.0, 0.1);
        assert!((alive.gold - 1.0).abs() < 1e-12);

        let mut dead = snapshot_at(1);
        dead.encounter.current_hp = 0.0;
        assert_eq!(accrue_income(dead, 10.0, 0.1).gold, 0.0);
    }

    #[test]
    fn test_crit_doubles_damage() {
        let normal = apply_auto_damage(snapshot_at(3), 10.0, 0.1, false);
        let crit = apply_auto_damage(snapshot_at(3), 10.0, 0.1, true);
        let max = enemy_hp(3);
        assert!((max - normal.encounter.current_hp - 1.0).abs() < 1e-9);
        assert!((max - crit.encounter.current_hp - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_kill_awards_gold_and_advances() {
        let mut snapshot = snapshot_at(1);
        snapshot.encounter.current_hp = 0.0;
        let (next, event) = resolve_encounter(snapshot, 1.5, 0.0);
        assert_eq!(next.encounter.level, 2);
        assert_eq!(next.gold, 15.0);
        assert_eq!(next.kills, 1);
        assert_eq!(
            event,
            Some(TickEvent::EnemyKilled {
                level: 1,
                was_boss: false,
                gold_reward: 15.0
            })
        );
    }

    #[test]
    fn test_resolve_boss_timeout_goes_to_checkpoint() {
        let mut snapshot = snapshot_at(10);
        snapshot.encounter.time_left = 0.0;
        let (next, event) = resolve_encounter(snapshot, 1.0, 0.0);
        assert_eq!(next.encounter.level, 6);
        assert_eq!(next.encounter.current_hp, next.encounter.max_hp);
        assert_eq!(
            event,
            Some(TickEvent::EncounterTimedOut {
                level: 10,
                was_boss: true,
                retreat_to: 6
            })
        );
    }

    #[test]
    fn test_kill_reward_ignores_degenerate_ratio() {
        assert_eq!(kill_reward(1, f64::NAN), 10.0);
        assert_eq!(kill_reward(1, 0.0), 10.0);
        assert_eq!(kill_reward(1, 2.0), 20.0);
    }

    #[test]
    fn test_idle_tick_counts_down_timer() {
        let mut state = GameState::new(0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = game_tick(&mut state, game_data(), TICK_SECONDS, &mut rng);

        assert!(result.events.is_empty());
        assert!((state.encounter.time_left - (BASE_TIME - TICK_SECONDS)).abs() < 1e-9);
        assert!((state.stats.total_play_time - TICK_SECONDS).abs() < 1e-12);
        assert_eq!(state.gold, 0.0);
    }

    #[test]
    fn test_stall_is_clamped_to_one_tick() {
        let mut state = GameState::new(0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = game_tick(&mut state, game_data(), 600.0, &mut rng);
        assert_eq!(result.delta, TICK_SECONDS);
        assert_eq!(state.level(), 1);
    }

    #[test]
    fn test_negative_delta_changes_nothing_but_maxima() {
        let mut state = GameState::new(0);
        let before = state.encounter;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        game_tick(&mut state, game_data(), -5.0, &mut rng);
        assert_eq!(state.encounter, before);
    }

    #[test]
    fn test_unattended_level_one_times_out_in_place() {
        let mut state = GameState::new(0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let ticks = (BASE_TIME / TICK_SECONDS).ceil() as usize + 1;
        let mut timed_out = false;
        for _ in 0..ticks {
            let result = game_tick(&mut state, game_data(), TICK_SECONDS, &mut rng);
            timed_out |= result.encounter_changed();
        }
        assert!(timed_out, "timer should expire without any DPS");
        assert_eq!(state.level(), 1);
    }

    #[test]
    fn test_dps_kills_and_advances() {
        let mut state = GameState::new(0);
        state.inventory.set("luffy", 10);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            game_tick(&mut state, game_data(), TICK_SECONDS, &mut rng);
        }
        assert!(state.level() > 1, "ten allies should clear level 1");
        assert!(state.stats.total_kills > 0);
        assert!(state.gold > 0.0);
        assert!(state.stats.max_level >= state.level());
        assert!(state.stats.max_dps > 50.0);
    }
}
