//! Player lifecycle: prestige resets and persistence.

pub mod prestige;
pub mod save;

pub use prestige::{calculate_prestige_gain, can_prestige, perform_prestige};
pub use save::{
    load_from_json_string, save_to_json_string, MemoryStore, SaveManager, SaveRecord, SaveStore,
};
