//! Headless runner. Drives a [`GameSession`] with the real tick pipeline.

use super::config::{BuyPolicy, SimConfig};
use super::report::SimReport;
use crate::core::constants::TICK_SECONDS;
use crate::core::game_state::GameState;
use crate::core::tick::TickEvent;
use crate::data::GameData;
use crate::player::prestige::can_prestige;
use crate::player::save::{MemoryStore, SaveStore};
use crate::session::GameSession;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Upper bound on purchases in a single shopping pass.
const MAX_PURCHASES_PER_PASS: u32 = 200;

#[derive(Debug, Clone, PartialEq)]
enum Candidate {
    Ally(String),
    Artifact(String),
}

/// Cheapest ally or artifact the player can buy right now.
fn cheapest_affordable<S: SaveStore, R: Rng>(
    session: &GameSession<'_, S, R>,
) -> Option<(Candidate, f64)> {
    let data = session.data();
    let state: &GameState = session.state();

    let allies = data
        .upgrades
        .iter()
        .filter(|item| item.unlock_level <= state.level())
        .filter(|item| !item.is_maxed(state.inventory.count(&item.id)))
        .filter_map(|item| {
            session
                .upgrade_cost(&item.id)
                .map(|cost| (Candidate::Ally(item.id.clone()), cost))
        });
    let artifacts = data.artifacts.iter().filter_map(|item| {
        session
            .artifact_cost(&item.id)
            .map(|cost| (Candidate::Artifact(item.id.clone()), cost))
    });

    allies
        .chain(artifacts)
        .filter(|(_, cost)| *cost <= state.gold)
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

fn shop<S: SaveStore, R: Rng>(session: &mut GameSession<'_, S, R>) -> u64 {
    let mut bought = 0;
    for _ in 0..MAX_PURCHASES_PER_PASS {
        let Some((candidate, _)) = cheapest_affordable(session) else {
            break;
        };
        let purchase = match &candidate {
            Candidate::Ally(id) => session.buy_upgrade(id),
            Candidate::Artifact(id) => session.buy_artifact(id),
        };
        if !purchase.is_bought() {
            break;
        }
        bought += 1;
    }
    bought
}

/// Runs one simulation.
pub fn run_simulation(data: &GameData, config: &SimConfig) -> SimReport {
    let rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut session = GameSession::with_state(data, GameState::new(0), MemoryStore::new(), rng);
    let mut report = SimReport::default();
    let mut click_budget = 0.0;

    for tick in 0..config.ticks {
        click_budget += config.clicks_per_second as f64 * TICK_SECONDS;
        while click_budget >= 1.0 {
            click_budget -= 1.0;
            if session.click().kill.is_some() {
                report.kills += 1;
            }
        }

        let result = session.tick(TICK_SECONDS);
        report.simulated_seconds += result.delta;
        for event in &result.events {
            match event {
                TickEvent::EnemyKilled { .. } => report.kills += 1,
                TickEvent::EncounterTimedOut { .. } => report.timeouts += 1,
                TickEvent::CriticalHit { .. } => report.crits += 1,
            }
        }

        let shopping_tick =
            config.buy_interval_ticks > 0 && (tick + 1) % config.buy_interval_ticks == 0;
        if shopping_tick {
            if config.prestige && can_prestige(session.state()) && session.prestige().is_some() {
                report.prestiges += 1;
            }
            if config.buy_policy == BuyPolicy::Cheapest {
                report.purchases += shop(&mut session);
            }
        }
    }

    let rates = session.live_rates();
    let state = session.state();
    report.ticks = config.ticks;
    report.final_level = state.level();
    report.max_level = state.stats.max_level;
    report.gold = state.gold;
    report.soul_gems = state.soul_gems;
    report.dps = rates.dps;
    report.gps = rates.gps;
    report
}
