use bounty::core::constants::TICK_INTERVAL_MS;
use bounty::core::formulas::format_number;
use bounty::core::tick::TickEvent;
use bounty::player::{SaveManager, SaveStore};
use bounty::simulator::{run_simulation, BuyPolicy, SimConfig};
use bounty::{game_data, GameSession};
use rand::Rng;
use std::io;
use std::time::{Duration, Instant};

const STATUS_INTERVAL_SECONDS: u64 = 5;

fn print_help() {
    println!("Bounty - idle clicker\n");
    println!("Usage: bounty [command]\n");
    println!("Commands:");
    println!("  run [--seconds N]   Play in real time (default command)");
    println!("  status              Show the current save");
    println!("  buy <id>            Buy an ally, an artifact, or 'click'");
    println!("  click [N]           Click the current enemy N times (default 1)");
    println!("  prestige            Reset for soul gems (level 50+)");
    println!("  reset --yes         Delete the save and start over");
    println!("  simulate [OPTIONS]  Headless balance run");
    println!("      --ticks N             Ticks to simulate (default: 36000 = 1 hour)");
    println!("      --seed N              RNG seed (default: 42)");
    println!("      --buy-policy P        cheapest|none (default: cheapest)");
    println!("      --clicks-per-second N Scripted clicks (default: 5)");
    println!("      --prestige            Prestige whenever possible");
    println!("  --version           Show version information");
    println!("  --help              Show this help message");
    println!("\nLogging is controlled by RUST_LOG (default: info).");
    println!("Saves go to the platform config dir, or BOUNTY_SAVE_DIR if set.");
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    eprintln!("Run 'bounty --help' for usage.");
    std::process::exit(1);
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> T {
    match value.map(|v| v.parse::<T>()) {
        Some(Ok(parsed)) => parsed,
        _ => fail(format!("{flag} requires a valid value")),
    }
}

fn parse_sim_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--ticks" => {
                config.ticks = parse_value("--ticks", args.get(i + 1));
                i += 1;
            }
            "--seed" => {
                config.seed = parse_value("--seed", args.get(i + 1));
                i += 1;
            }
            "--buy-policy" => {
                config.buy_policy = match args.get(i + 1).map(|v| v.parse::<BuyPolicy>()) {
                    Some(Ok(policy)) => policy,
                    Some(Err(e)) => fail(e),
                    None => fail("--buy-policy requires a value"),
                };
                i += 1;
            }
            "--clicks-per-second" => {
                config.clicks_per_second = parse_value("--clicks-per-second", args.get(i + 1));
                i += 1;
            }
            "--prestige" => config.prestige = true,
            other => fail(format!("Unknown simulate option: {other}")),
        }
        i += 1;
    }
    config
}

fn open_session() -> io::Result<GameSession<'static, SaveManager, rand::rngs::ThreadRng>> {
    let store = SaveManager::new()?;
    let session = GameSession::load(game_data(), store, rand::thread_rng());
    if let Some(report) = session.offline_report() {
        if report.gold_gained > 0.0 {
            println!(
                "Welcome back! {} gold earned while away ({}s credited).",
                format_number(report.gold_gained),
                report.credited_seconds
            );
        }
    }
    Ok(session)
}

fn print_status<S: SaveStore, R: Rng>(session: &GameSession<'_, S, R>) {
    let snap = session.snapshot();
    let stats = session.stats();
    let zone = session.zone_name().unwrap_or("Uncharted Waters");
    let mode = if snap.is_boss { " [BOSS]" } else { "" };

    println!("Player {}", stats.player_id);
    println!("Level {}{} - {}", snap.level, mode, zone);
    println!(
        "Enemy HP {}/{}  Time {:.1}/{:.1}s",
        format_number(snap.current_hp),
        format_number(snap.max_hp),
        snap.time_left.max(0.0),
        snap.max_time
    );
    println!(
        "Gold {}  DPS {}  GPS {}  Click {}",
        format_number(snap.gold),
        format_number(snap.total_dps),
        format_number(snap.total_gps),
        snap.click_damage
    );
    println!(
        "Soul gems {} (next prestige: +{})",
        snap.soul_gems, snap.prestige_gain
    );
    let owned: Vec<String> = session
        .inventory()
        .iter()
        .chain(session.artifacts().iter())
        .filter(|(_, count)| *count > 0)
        .map(|(id, count)| format!("{id} x{count}"))
        .collect();
    if !owned.is_empty() {
        println!("Owned: {}", owned.join(", "));
    }
    println!(
        "Kills {}  Clicks {}  Prestiges {}  Best level {}  Played {:.0}s",
        stats.total_kills,
        stats.total_clicks,
        stats.prestige_count,
        stats.max_level,
        stats.total_play_time
    );
}

fn print_event(event: &TickEvent) {
    match event {
        TickEvent::EnemyKilled {
            level,
            was_boss,
            gold_reward,
        } => {
            let what = if *was_boss { "Boss" } else { "Enemy" };
            println!(
                "{what} at level {level} defeated! +{} gold",
                format_number(*gold_reward)
            );
        }
        TickEvent::EncounterTimedOut {
            level, retreat_to, ..
        } => {
            println!("Out of time at level {level}. Falling back to level {retreat_to}.");
        }
        TickEvent::CriticalHit { .. } => {}
    }
}

fn run(seconds: Option<u64>) -> io::Result<()> {
    let mut session = open_session()?;
    print_status(&session);

    let tick = Duration::from_millis(TICK_INTERVAL_MS);
    let started = Instant::now();
    let mut last_frame = Instant::now();
    let mut last_status = Instant::now();

    loop {
        if let Some(limit) = seconds {
            if started.elapsed() >= Duration::from_secs(limit) {
                break;
            }
        }
        std::thread::sleep(tick);

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;

        let result = session.tick(dt);
        for event in &result.events {
            print_event(event);
        }

        if last_status.elapsed() >= Duration::from_secs(STATUS_INTERVAL_SECONDS) {
            let snap = session.snapshot();
            println!(
                "[lvl {}] hp {}/{} time {:.1}s gold {} dps {}",
                snap.level,
                format_number(snap.current_hp),
                format_number(snap.max_hp),
                snap.time_left.max(0.0),
                format_number(snap.gold),
                format_number(snap.total_dps)
            );
            last_status = now;
        }
    }

    session.save()
}

fn buy(id: &str) -> io::Result<()> {
    let mut session = open_session()?;
    let purchase = if id == "click" {
        session.buy_click_upgrade()
    } else if session.data().upgrade(id).is_some() {
        session.buy_upgrade(id)
    } else {
        session.buy_artifact(id)
    };
    match purchase {
        bounty::core::Purchase::Bought { id, cost, owned } => {
            println!("Bought {id} for {} (now {owned}).", format_number(cost));
        }
        bounty::core::Purchase::Refused(reason) => {
            println!("Purchase refused: {reason:?}");
        }
    }
    Ok(())
}

fn click(times: u32) -> io::Result<()> {
    let mut session = open_session()?;
    for _ in 0..times {
        if let Some(event) = session.click().kill {
            print_event(&event);
        }
    }
    print_status(&session);
    Ok(())
}

fn prestige() -> io::Result<()> {
    let mut session = open_session()?;
    match session.prestige() {
        Some(gained) => println!(
            "Prestiged! +{gained} soul gems (total {}).",
            session.snapshot().soul_gems
        ),
        None => println!(
            "Prestige unlocks at level {}.",
            bounty::core::constants::PRESTIGE_UNLOCK_LEVEL
        ),
    }
    Ok(())
}

fn reset() -> io::Result<()> {
    let mut session = open_session()?;
    session.hard_reset();
    println!("Save wiped. New player {}.", session.stats().player_id);
    Ok(())
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("run");
    let rest: &[String] = args.get(2..).unwrap_or_default();

    match command {
        "run" => {
            let seconds = match rest.first().map(String::as_str) {
                Some("--seconds") => Some(parse_value("--seconds", rest.get(1))),
                Some(other) => fail(format!("Unknown run option: {other}")),
                None => None,
            };
            run(seconds)
        }
        "status" => {
            let session = open_session()?;
            print_status(&session);
            Ok(())
        }
        "buy" => match rest.first() {
            Some(id) => buy(id),
            None => fail("buy requires an item id"),
        },
        "click" => {
            let times = match rest.first() {
                Some(_) => parse_value("click", rest.first()),
                None => 1,
            };
            click(times)
        }
        "prestige" => prestige(),
        "reset" => {
            if rest.first().map(String::as_str) != Some("--yes") {
                fail("reset deletes all progress; confirm with 'bounty reset --yes'");
            }
            reset()
        }
        "simulate" => {
            let config = parse_sim_args(rest);
            let report = run_simulation(game_data(), &config);
            println!(
                "seed {} policy {} clicks/s {} prestige {}",
                config.seed, config.buy_policy, config.clicks_per_second, config.prestige
            );
            println!("{report}");
            Ok(())
        }
        "--version" | "-v" => {
            println!("bounty {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "--help" | "-h" => {
            print_help();
            Ok(())
        }
        other => fail(format!("Unknown command: {other}")),
    }
}
