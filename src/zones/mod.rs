//! Level to asset-key lookups for the presentation layer.
//!
//! Tables are ordered `(level_ceiling, asset)` bands so new zones are added by
//! appending data rather than code.

mod data;

use crate::core::formulas::is_boss_level;
use crate::items::UpgradeItem;
use serde::{Deserialize, Serialize};

pub use data::{
    builtin_bosses, builtin_monster_rosters, builtin_zones, tier_for_level, ZoneInfo, ZoneTier,
};

/// All level-indexed asset tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneTable {
    pub zones: Vec<ZoneTier<ZoneInfo>>,
    pub monsters: Vec<ZoneTier<Vec<String>>>,
    pub bosses: Vec<String>,
}

impl Default for ZoneTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ZoneTable {
    pub fn builtin() -> Self {
        Self {
            zones: builtin_zones(),
            monsters: builtin_monster_rosters(),
            bosses: builtin_bosses(),
        }
    }

    /// Zone covering `level`. `None` past the last band; callers pick a default.
    pub fn zone_for_level(&self, level: u32) -> Option<&ZoneInfo> {
        tier_for_level(&self.zones, level)
    }

    pub fn zone_name(&self, level: u32) -> Option<&str> {
        self.zone_for_level(level).map(|zone| zone.name.as_str())
    }

    pub fn background(&self, level: u32) -> Option<&str> {
        self.zone_for_level(level).map(|zone| zone.background.as_str())
    }

    /// Monster or boss portrait for a level.
    ///
    /// Levels past the last roster reuse the last roster. Only an empty table
    /// yields `None`.
    pub fn monster_asset(&self, level: u32) -> Option<&str> {
        let level = level.max(1);
        if is_boss_level(level) && !self.bosses.is_empty() {
            let index = (level / 5 - 1) as usize % self.bosses.len();
            return Some(self.bosses[index].as_str());
        }

        let roster = tier_for_level(&self.monsters, level)
            .or_else(|| self.monsters.last().map(|tier| &tier.value))?;
        if roster.is_empty() {
            return None;
        }
        let index = (level - 1) as usize % roster.len();
        Some(roster[index].as_str())
    }
}

/// Owned levels per portrait evolution.
const LEVELS_PER_EVOLUTION: u32 = 100;

/// Portrait for an ally with `owned` levels.
///
/// The base image below 100 levels, then one evolution per further 100
/// levels, staying on the last evolution once the list runs out.
pub fn upgrade_image(item: &UpgradeItem, owned: u32) -> &str {
    if item.images.is_empty() || owned < LEVELS_PER_EVOLUTION {
        return &item.image;
    }
    let stage = (owned / LEVELS_PER_EVOLUTION - 1) as usize;
    &item.images[stage.min(item.images.len() - 1)]
}
