//! Purchasable item definitions and owned-quantity inventories.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An ally the player hires for passive damage and/or gold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeItem {
    pub id: String,
    pub name: String,
    /// Player level required before the item can be bought.
    pub unlock_level: u32,
    pub base_cost: f64,
    pub cost_growth: f64,
    pub base_dps: f64,
    pub base_gps: f64,
    /// Per-unit DPS compounding factor; `1.0` means no compounding.
    pub dps_growth: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_level: Option<u32>,
    /// Portrait asset key.
    #[serde(default)]
    pub image: String,
    /// Evolved portraits, unlocked one per 100 owned levels from level 100.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl UpgradeItem {
    /// Returns true if `owned` has reached this item's cap.
    pub fn is_maxed(&self, owned: u32) -> bool {
        self.max_level.is_some_and(|max| owned >= max)
    }
}

/// An artifact granting global multipliers, extra encounter time or boss damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_cost: f64,
    pub cost_growth: f64,
    pub global_dps_multiplier: f64,
    pub global_gold_multiplier: f64,
    /// Additive seconds per owned level.
    pub time_bonus: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boss_damage_multiplier: Option<f64>,
}

/// Owned quantity per item id.
///
/// Entries appear on first purchase and only ever grow; a missing entry
/// reads as zero. Ordered so serialization is stable between saves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory(BTreeMap<String, u32>);

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Owned count for `id`, zero if never bought.
    pub fn count(&self, id: &str) -> u32 {
        self.0.get(id).copied().unwrap_or(0)
    }

    /// Adds one unit and returns the new count.
    pub fn increment(&mut self, id: &str) -> u32 {
        let entry = self.0.entry(id.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }

    pub fn set(&mut self, id: &str, count: u32) {
        self.0.insert(id.to_string(), count);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|&count| count == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(id, count)| (id.as_str(), *count))
    }

    /// Sum of all owned levels.
    pub fn total_levels(&self) -> u64 {
        self.0.values().map(|&count| count as u64).sum()
    }
}

impl FromIterator<(String, u32)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_missing_entry_reads_zero() {
        let inventory = Inventory::new();
        assert_eq!(inventory.count("luffy"), 0);
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_inventory_increment() {
        let mut inventory = Inventory::new();
        assert_eq!(inventory.increment("luffy"), 1);
        assert_eq!(inventory.increment("luffy"), 2);
        assert_eq!(inventory.count("luffy"), 2);
        assert_eq!(inventory.total_levels(), 2);
    }

    #[test]
    fn test_inventory_serializes_as_plain_map() {
        let mut inventory = Inventory::new();
        inventory.set("zoro", 3);
        inventory.set("luffy", 1);

        let json = serde_json::to_string(&inventory).unwrap();
        assert_eq!(json, r#"{"luffy":1,"zoro":3}"#);

        let restored: Inventory = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, inventory);
    }

    #[test]
    fn test_is_maxed() {
        let item = UpgradeItem {
            id: "test".to_string(),
            name: "Test".to_string(),
            unlock_level: 1,
            base_cost: 10.0,
            cost_growth: 1.1,
            base_dps: 1.0,
            base_gps: 0.0,
            dps_growth: 1.0,
            max_level: Some(3),
            image: "allies/test".to_string(),
            images: Vec::new(),
        };
        assert!(!item.is_maxed(2));
        assert!(item.is_maxed(3));

        let uncapped = UpgradeItem {
            max_level: None,
            ..item
        };
        assert!(!uncapped.is_maxed(u32::MAX));
    }
}
