//! Headless balance simulator.
//!
//! Plays the game with a scripted player (clicks, greedy shopping, optional
//! prestige) through the same [`crate::session::GameSession`] and tick
//! pipeline as the real game, seeded for reproducible runs.

mod config;
mod report;
mod runner;

pub use config::{BuyPolicy, SimConfig};
pub use report::SimReport;
pub use runner::run_simulation;
