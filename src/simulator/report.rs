//! Simulation report.

use crate::core::formulas::format_number;
use std::fmt;

/// Results of one simulated run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimReport {
    pub ticks: u64,
    pub simulated_seconds: f64,
    pub final_level: u32,
    pub max_level: u32,
    pub kills: u64,
    pub timeouts: u64,
    pub crits: u64,
    pub purchases: u64,
    pub prestiges: u64,
    pub gold: f64,
    pub soul_gems: u64,
    pub dps: f64,
    pub gps: f64,
}

impl SimReport {
    /// Kills per minute of simulated time.
    pub fn kill_rate(&self) -> f64 {
        if self.simulated_seconds <= 0.0 {
            return 0.0;
        }
        self.kills as f64 / (self.simulated_seconds / 60.0)
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.simulated_seconds / 60.0;
        writeln!(f, "=== Simulation ({} ticks, {:.1} min) ===", self.ticks, minutes)?;
        writeln!(
            f,
            "Level:      {} (max {})",
            self.final_level, self.max_level
        )?;
        writeln!(
            f,
            "Kills:      {} ({:.1}/min), timeouts {}, crits {}",
            self.kills,
            self.kill_rate(),
            self.timeouts,
            self.crits
        )?;
        writeln!(f, "Purchases:  {}", self.purchases)?;
        writeln!(
            f,
            "Prestiges:  {} (soul gems {})",
            self.prestiges, self.soul_gems
        )?;
        writeln!(f, "Gold:       {}", format_number(self.gold))?;
        write!(
            f,
            "DPS / GPS:  {} / {}",
            format_number(self.dps),
            format_number(self.gps)
        )
    }
}
