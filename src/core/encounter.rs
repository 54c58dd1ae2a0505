//! Encounter state machine.
//!
//! An encounter is one timed fight against a single enemy. It starts with
//! full HP and a fresh timer, counts down while damage is applied, and
//! resolves into either a kill (advance one level) or a timeout (retreat).
//! Every transition here is a pure function returning a new [`Encounter`].

use super::constants::{BASE_TIME, BOSS_TIME, STALL_THRESHOLD_SECONDS, TICK_SECONDS};
use super::formulas::{checkpoint_level, enemy_hp, is_boss_level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterMode {
    Normal,
    Boss,
}

/// How an encounter stands after the damage and timer stages of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Ongoing,
    Killed,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Encounter {
    pub level: u32,
    pub is_boss: bool,
    pub current_hp: f64,
    pub max_hp: f64,
    /// Seconds remaining. May dip to zero or below until resolved.
    pub time_left: f64,
    /// Timer length this encounter started with.
    pub max_time: f64,
}

/// Timer length for a fresh encounter.
pub fn encounter_time(is_boss: bool, time_bonus: f64) -> f64 {
    let base = if is_boss { BOSS_TIME } else { BASE_TIME };
    base + time_bonus.max(0.0)
}

/// Sanitizes a frame delta before it reaches the pipeline.
///
/// Negative or non-finite deltas (clock skew) become zero. A delta larger
/// than [`STALL_THRESHOLD_SECONDS`] is a stall and counts as one nominal tick.
pub fn clamp_delta(dt: f64) -> f64 {
    if !dt.is_finite() || dt <= 0.0 {
        0.0
    } else if dt > STALL_THRESHOLD_SECONDS {
        TICK_SECONDS
    } else {
        dt
    }
}

impl Encounter {
    /// Spawns the enemy for `level` with full HP and a full timer.
    pub fn start(level: u32, time_bonus: f64) -> Self {
        let level = level.max(1);
        let is_boss = is_boss_level(level);
        let max_hp = enemy_hp(level);
        let max_time = encounter_time(is_boss, time_bonus);
        Self {
            level,
            is_boss,
            current_hp: max_hp,
            max_hp,
            time_left: max_time,
            max_time,
        }
    }

    pub fn mode(&self) -> EncounterMode {
        if self.is_boss {
            EncounterMode::Boss
        } else {
            EncounterMode::Normal
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }

    pub fn advance_timer(self, dt: f64) -> Self {
        Self {
            time_left: self.time_left - dt,
            ..self
        }
    }

    /// Subtracts `damage` from the enemy, flooring HP at zero.
    /// Negative or NaN damage is ignored.
    pub fn apply_damage(self, damage: f64) -> Self {
        if !self.is_alive() || damage.is_nan() || damage <= 0.0 {
            return self;
        }
        Self {
            current_hp: (self.current_hp - damage).max(0.0),
            ..self
        }
    }

    /// A kill wins over a timeout landing in the same tick.
    pub fn resolve(&self) -> Resolution {
        if !self.is_alive() {
            Resolution::Killed
        } else if self.time_left <= 0.0 {
            Resolution::TimedOut
        } else {
            Resolution::Ongoing
        }
    }

    /// Level the player drops to when this encounter times out.
    pub fn retreat_level(&self) -> u32 {
        if self.is_boss {
            checkpoint_level(self.level)
        } else {
            self.level.saturating_sub(1).max(1)
        }
    }

    pub fn after_timeout(&self, time_bonus: f64) -> Self {
        Self::start(self.retreat_level(), time_bonus)
    }

    pub fn after_kill(&self, time_bonus: f64) -> Self {
        Self::start(self.level.saturating_add(1), time_bonus)
    }
}

impl Default for Encounter {
    fn default() -> Self {
        Self::start(1, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_sets_full_hp_and_timer() {
        let enc = Encounter::start(3, 4.0);
        assert_eq!(enc.mode(), EncounterMode::Normal);
        assert_eq!(enc.max_hp, enemy_hp(3));
        assert_eq!(enc.current_hp, enc.max_hp);
        assert_eq!(enc.time_left, BASE_TIME + 4.0);
        assert_eq!(enc.max_time, enc.time_left);
    }

    #[test]
    fn test_boss_mode_from_level_parity() {
        let enc = Encounter::start(10, 0.0);
        assert!(enc.is_boss);
        assert_eq!(enc.mode(), EncounterMode::Boss);
        assert_eq!(enc.time_left, BOSS_TIME);
    }

    #[test]
    fn test_level_zero_starts_at_one() {
        assert_eq!(Encounter::start(0, 0.0).level, 1);
    }

    #[test]
    fn test_clamp_delta() {
        assert_eq!(clamp_delta(-1.0), 0.0);
        assert_eq!(clamp_delta(f64::NAN), 0.0);
        assert_eq!(clamp_delta(0.1), 0.1);
        assert_eq!(clamp_delta(2.0), 2.0);
        assert_eq!(clamp_delta(3600.0), TICK_SECONDS);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let enc = Encounter::start(1, 0.0).apply_damage(1_000.0);
        assert_eq!(enc.current_hp, 0.0);
        assert!(!enc.is_alive());
    }

    #[test]
    fn test_negative_damage_is_ignored() {
        let enc = Encounter::start(1, 0.0);
        assert_eq!(enc.apply_damage(-5.0), enc);
        assert_eq!(enc.apply_damage(f64::NAN), enc);
    }

    #[test]
    fn test_kill_wins_over_timeout() {
        let enc = Encounter::start(1, 0.0)
            .advance_timer(100.0)
            .apply_damage(100.0);
        assert_eq!(enc.resolve(), Resolution::Killed);
    }

    #[test]
    fn test_timeout_when_timer_runs_out() {
        let enc = Encounter::start(1, 0.0).advance_timer(BASE_TIME);
        assert_eq!(enc.resolve(), Resolution::TimedOut);
        assert_eq!(
            Encounter::start(1, 0.0).advance_timer(1.0).resolve(),
            Resolution::Ongoing
        );
    }

    #[test]
    fn test_boss_timeout_returns_to_checkpoint() {
        let next = Encounter::start(15, 0.0).after_timeout(0.0);
        assert_eq!(next.level, 11);
        assert_eq!(next.mode(), EncounterMode::Normal);
    }

    #[test]
    fn test_normal_timeout_retreats_one_level() {
        assert_eq!(Encounter::start(7, 0.0).after_timeout(0.0).level, 6);
        assert_eq!(Encounter::start(1, 0.0).after_timeout(0.0).level, 1);
    }

    #[test]
    fn test_kill_advances_one_level() {
        let next = Encounter::start(4, 2.0).after_kill(2.0);
        assert_eq!(next.level, 5);
        assert!(next.is_boss);
        assert_eq!(next.time_left, BOSS_TIME + 2.0);
    }
}
