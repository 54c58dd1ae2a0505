//! Core game state and logic.

pub mod constants;
pub mod encounter;
pub mod formulas;
pub mod game_logic;
pub mod game_state;
pub mod offline;
pub mod stats;
pub mod tick;

pub use encounter::{Encounter, EncounterMode, Resolution};
pub use game_logic::{ClickOutcome, Purchase, RefusalReason};
pub use game_state::{GameState, GameStats};
pub use offline::OfflineReport;
pub use stats::{calculate_total_stats, LiveRates, Multipliers, StatTotals};
pub use tick::{game_tick, TickEvent, TickResult};
