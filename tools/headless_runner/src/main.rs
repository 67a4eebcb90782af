use clap::Parser;
use glam::Vec2;
use sim_core::{EntityId, Game};
use sim_host::GameHost;
use sim_server::{spawn_tick_loop, EventCursor, SessionConfig, SessionHandle, SessionStatus};
use sim_td::systems::find_path;
use sim_td::{
    build_snapshot, JsonFileStore, LedgerStore, MemoryStore, TdConfig, TdEvent, TdGame, TowerKind,
};
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "headless-runner")]
#[command(about = "Run a tower-defense level without a renderer")]
struct Args {
    /// Level to play
    #[arg(long, default_value = "1")]
    level: u32,

    #[arg(long, default_value = "12345")]
    seed: u64,

    /// Stop after this many ticks if the game has not ended
    #[arg(long, default_value = "36000")]
    ticks: u64,

    #[arg(long, default_value = "60")]
    tick_hz: u32,

    /// Run at wall-clock speed on the tokio tick loop
    #[arg(long, short)]
    realtime: bool,

    /// Directory for the persisted ledger. In-memory when omitted.
    #[arg(long)]
    store: Option<PathBuf>,

    /// Write the final world snapshot as JSON
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Print the JSON schema of the snapshot and exit
    #[arg(long)]
    schema: bool,
}

/// Screen size the scripted tower slots are computed for.
const SCREEN: (f32, f32) = (1000.0, 1000.0);

/// Offset of a tower slot from the route corner it guards.
const SLOT_OFFSET: Vec2 = Vec2::new(40.0, -40.0);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if args.schema {
        return print_schema();
    }

    let config = TdConfig::default();
    let store: Box<dyn LedgerStore> = match &args.store {
        Some(dir) => Box::new(JsonFileStore::new(dir, &config.store_name)),
        None => Box::new(MemoryStore::new()),
    };
    let mut game = TdGame::new(config, args.level, args.seed, store)?;
    game.set_screen_size(SCREEN.0, SCREEN.1);
    let slots = tower_slots(&game);
    tracing::info!(level = args.level, seed = args.seed, slots = slots.len(), "starting");

    if args.realtime {
        run_realtime(game, slots, &args).await
    } else {
        run_fast(game, slots, &args)
    }
}

fn write_dump(game: &TdGame, path: &Path) -> Result<(), Box<dyn Error>> {
    let snapshot = build_snapshot(game);
    serde_json::to_writer_pretty(File::create(path)?, &snapshot)?;
    tracing::info!(path = %path.display(), "snapshot written");
    Ok(())
}

/// One tower slot per route corner, alternating archers and cannons.
fn tower_slots(game: &TdGame) -> Vec<(TowerKind, Vec2)> {
    let viewport = game.resources().viewport;
    let mut slots = Vec::new();
    for route in &game.resources().routes {
        let path = match find_path(game.registry(), route) {
            Some(path) => path,
            None => continue,
        };
        for (i, corner) in path.to_absolute(&viewport).into_iter().enumerate().skip(1) {
            let kind = if i % 2 == 1 {
                TowerKind::Archer
            } else {
                TowerKind::Cannon
            };
            slots.push((kind, corner + SLOT_OFFSET));
        }
    }
    slots
}

/// Place the next slot if the ledger covers it.
fn build_next(game: &mut TdGame, slots: &mut Vec<(TowerKind, Vec2)>) -> Option<EntityId> {
    let &(kind, at) = slots.first()?;
    if !game.ledger().balance().covers(kind.stats().cost) {
        return None;
    }
    match game.place_tower(at.x, at.y, kind) {
        Ok(id) => {
            slots.remove(0);
            Some(id)
        }
        Err(e) => {
            tracing::warn!("dropping tower slot: {}", e);
            slots.remove(0);
            None
        }
    }
}

fn run_fast(
    game: TdGame,
    mut slots: Vec<(TowerKind, Vec2)>,
    args: &Args,
) -> Result<(), Box<dyn Error>> {
    let mut host = GameHost::new(game, args.tick_hz);
    let mut events = Vec::new();

    while host.current_tick() < args.ticks {
        while build_next(host.game_mut(), &mut slots).is_some() {}
        match host.step_one_tick() {
            Some(tick_events) => {
                for event in &tick_events {
                    log_event(host.current_tick(), event);
                }
                events.extend(tick_events);
            }
            None => break,
        }
    }

    print_summary(host.game(), host.current_tick(), &events);
    match &args.dump {
        Some(path) => write_dump(host.game(), path),
        None => Ok(()),
    }
}

async fn run_realtime(
    game: TdGame,
    mut slots: Vec<(TowerKind, Vec2)>,
    args: &Args,
) -> Result<(), Box<dyn Error>> {
    let config = SessionConfig {
        tick_hz: args.tick_hz,
        ..SessionConfig::default()
    };
    let session = SessionHandle::new(game, &config);
    let task = spawn_tick_loop(session.clone());
    let mut cursor = EventCursor(0);
    let mut events = Vec::new();

    loop {
        session
            .with_game_mut(|game| while build_next(game, &mut slots).is_some() {})
            .await?;

        let batch = session.poll_events(cursor).await;
        if batch.dropped > 0 {
            tracing::warn!(dropped = batch.dropped, "event buffer overflowed");
        }
        for event in batch.events {
            log_event(event.tick, &event.event);
            events.push(event.event);
        }
        cursor = batch.cursor;

        let finished = matches!(session.status().await, SessionStatus::Finished(_));
        if finished || session.current_tick().await >= args.ticks {
            break;
        }
        sleep(Duration::from_millis(100)).await;
    }

    session.shutdown().await;
    task.await?;

    let tick = session.current_tick().await;
    session
        .with_game(|game| {
            print_summary(game, tick, &events);
            match &args.dump {
                Some(path) => write_dump(game, path),
                None => Ok(()),
            }
        })
        .await
}

fn log_event(tick: u64, event: &TdEvent) {
    match event {
        TdEvent::WaveStarted { wave, size } => {
            tracing::info!(tick, wave, size, "wave started")
        }
        TdEvent::TowerPlaced { id, kind, position } => tracing::info!(
            tick,
            %id,
            kind = kind.name(),
            x = position.x,
            y = position.y,
            "tower placed"
        ),
        TdEvent::EnemyReachedEnd { id } => tracing::info!(tick, %id, "enemy leaked"),
        TdEvent::LivesChanged { lives } => tracing::info!(tick, lives, "lives changed"),
        TdEvent::GameOver => tracing::info!(tick, "game over"),
        TdEvent::GameWon => tracing::info!(tick, "game won"),
        TdEvent::TutorialStepStarted { message, .. } => tracing::info!(tick, "{}", message),
        other => tracing::debug!(tick, ?other, "event"),
    }
}

fn print_summary(game: &TdGame, tick: u64, events: &[TdEvent]) {
    let mut spawned = 0;
    let mut defeated = 0;
    let mut leaked = 0;
    let mut shots = 0;
    let mut towers = 0;

    for event in events {
        match event {
            TdEvent::EnemySpawned { .. } => spawned += 1,
            TdEvent::EnemyDefeated { .. } => defeated += 1,
            TdEvent::EnemyReachedEnd { .. } => leaked += 1,
            TdEvent::ProjectileFired { .. } => shots += 1,
            TdEvent::TowerPlaced { .. } => towers += 1,
            _ => {}
        }
    }

    let balance = game.ledger().balance();
    println!("=== Tower Defense Simulation Complete ===");
    println!("Level: {}", game.layout().id);
    println!("Outcome: {:?}", game.is_terminal());
    println!("Final tick: {}", tick);
    println!("Wave: {}", game.wave());
    println!("Lives: {}", game.lives());
    println!("Manpower: {}, Supply: {}", balance.manpower, balance.supply);
    println!("\n=== Event Summary ===");
    println!("Towers placed: {}", towers);
    println!("Enemies spawned: {}", spawned);
    println!("Enemies defeated: {}", defeated);
    println!("Enemies leaked: {}", leaked);
    println!("Shots fired: {}", shots);
}

#[cfg(feature = "schema")]
fn print_schema() -> Result<(), Box<dyn Error>> {
    let schema = schemars::schema_for!(td_types::WorldSnapshot);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

#[cfg(not(feature = "schema"))]
fn print_schema() -> Result<(), Box<dyn Error>> {
    Err("built without the `schema` feature".into())
}
