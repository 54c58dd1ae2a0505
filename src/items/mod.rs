//! Allies, artifacts and the inventories that track how many the player owns.

mod data;
mod types;

pub use data::{builtin_artifacts, builtin_upgrades};
pub use types::{BonusItem, Inventory, UpgradeItem};
