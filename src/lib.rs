//! Bounty - idle clicker progression engine.
//!
//! Economy formulas, stat aggregation, infinite achievements, the timed
//! encounter state machine, prestige and persistence. Presentation layers
//! drive a [`session::GameSession`] and read its snapshots.

pub mod achievements;
pub mod core;
pub mod data;
pub mod items;
pub mod player;
pub mod session;
pub mod simulator;
pub mod utils;
pub mod zones;

pub use data::{game_data, GameData};
pub use session::{GameSession, SessionSnapshot};
