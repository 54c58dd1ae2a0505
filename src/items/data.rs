//! Built-in ally and artifact tables.

use super::types::{BonusItem, UpgradeItem};

#[allow(clippy::too_many_arguments)]
fn ally(
    id: &str,
    name: &str,
    unlock_level: u32,
    base_cost: f64,
    base_dps: f64,
    base_gps: f64,
    cost_growth: f64,
    dps_growth: f64,
    max_level: u32,
) -> UpgradeItem {
    UpgradeItem {
        id: id.to_string(),
        name: name.to_string(),
        unlock_level,
        base_cost,
        cost_growth,
        base_dps,
        base_gps,
        dps_growth,
        max_level: Some(max_level),
        image: format!("allies/{id}"),
        images: Vec::new(),
    }
}

/// Adds `stages` evolved portraits after the base one.
fn evolving(mut item: UpgradeItem, stages: u32) -> UpgradeItem {
    item.images = (2..=stages + 1)
        .map(|stage| format!("allies/{}_{stage}", item.id))
        .collect();
    item
}

/// All hireable allies in shop order.
pub fn builtin_upgrades() -> Vec<UpgradeItem> {
    vec![
        evolving(ally("luffy", "Monkey D. Luffy", 1, 50.0, 5.0, 0.0, 1.2, 1.01, 1000), 4),
        ally("higuma", "Higuma", 16, 250.0, 3.0, 0.0, 1.3, 1.1, 75),
        evolving(ally("koby", "Koby", 21, 500.0, 0.0, 50.0, 1.3, 0.0, 100), 1),
        evolving(ally("alvida", "Alvida", 31, 750.0, 5.0, 0.0, 1.3, 1.1, 100), 1),
        evolving(ally("zoro", "Roronoa Zoro", 36, 1000.0, 7.0, 0.0, 1.2, 1.02, 1000), 3),
        evolving(ally("hermep", "Hermep", 56, 1250.0, 0.0, 100.0, 1.6, 0.0, 100), 1),
        ally("morgan", "Morgan", 61, 1500.0, 6.0, 0.0, 1.6, 1.11, 75),
        ally("morge", "Morge", 96, 3000.0, 7.0, 0.0, 1.7, 1.12, 75),
        ally("cabaji", "Cabaji", 101, 4000.0, 8.0, 0.0, 1.8, 1.12, 75),
        evolving(ally("baggy", "Baggy the Clown", 105, 5000.0, 10.0, 0.0, 1.8, 1.15, 500), 1),
    ]
}

/// All artifacts in shop order.
pub fn builtin_artifacts() -> Vec<BonusItem> {
    vec![
        BonusItem {
            id: "berry".to_string(),
            name: "Berry Boost".to_string(),
            description: "Increases all gold gains.".to_string(),
            base_cost: 1000.0,
            cost_growth: 2.5,
            global_dps_multiplier: 0.0,
            global_gold_multiplier: 0.5,
            time_bonus: 0.0,
            boss_damage_multiplier: None,
        },
        BonusItem {
            id: "armament".to_string(),
            name: "Armament Haki".to_string(),
            description: "Increases everyone's DPS.".to_string(),
            base_cost: 2000.0,
            cost_growth: 3.0,
            global_dps_multiplier: 0.1,
            global_gold_multiplier: 0.0,
            time_bonus: 0.0,
            boss_damage_multiplier: None,
        },
        BonusItem {
            id: "observation".to_string(),
            name: "Observation Haki".to_string(),
            description: "Adds time to every encounter.".to_string(),
            base_cost: 5000.0,
            cost_growth: 6.0,
            global_dps_multiplier: 0.0,
            global_gold_multiplier: 0.0,
            time_bonus: 2.0,
            boss_damage_multiplier: None,
        },
        BonusItem {
            id: "conqueror".to_string(),
            name: "Conqueror's Haki".to_string(),
            description: "Massive damage bonus against bosses.".to_string(),
            base_cost: 1500.0,
            cost_growth: 10.0,
            global_dps_multiplier: 0.0,
            global_gold_multiplier: 0.0,
            time_bonus: 0.0,
            boss_damage_multiplier: Some(0.5),
        },
    ]
}
