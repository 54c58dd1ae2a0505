//! Simulation configuration.

use std::fmt;
use std::str::FromStr;

/// What the simulated player buys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuyPolicy {
    /// Repeatedly buy the cheapest affordable ally or artifact.
    #[default]
    Cheapest,
    /// Never buy anything; measures raw idle progress.
    None,
}

impl FromStr for BuyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cheapest" => Ok(BuyPolicy::Cheapest),
            "none" => Ok(BuyPolicy::None),
            other => Err(format!("unknown buy policy '{other}' (cheapest|none)")),
        }
    }
}

impl fmt::Display for BuyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuyPolicy::Cheapest => write!(f, "cheapest"),
            BuyPolicy::None => write!(f, "none"),
        }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Ticks to simulate (10 per second of game time)
    pub ticks: u64,

    /// RNG seed; the same seed always produces the same run
    pub seed: u64,

    /// Manual clicks per second at the player's click damage
    pub clicks_per_second: u32,

    pub buy_policy: BuyPolicy,

    /// Ticks between shopping passes
    pub buy_interval_ticks: u64,

    /// Prestige as soon as it is available
    pub prestige: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: 36_000,
            seed: 42,
            clicks_per_second: 5,
            buy_policy: BuyPolicy::Cheapest,
            buy_interval_ticks: 10,
            prestige: false,
        }
    }
}
