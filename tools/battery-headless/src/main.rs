//! battery-headless: run a BatteryCollector level without a renderer.
//!
//! Usage:
//!   battery-headless --seconds 300 --autopilot
//!   battery-headless --config level.json --fps 30 --collect-every 15

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use glam::DVec3;

use battery_core::commands::PlayerCommand;
use battery_core::components::{Location, Pickup};
use battery_core::constants::DEFAULT_FRAME_RATE;
use battery_core::events::GameEvent;
use battery_sim::{SimConfig, SimulationEngine};

#[derive(Debug, Parser)]
#[command(name = "battery-headless", about = "Run a BatteryCollector level headless")]
struct Cli {
    /// JSON session config. Defaults are used for missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated seconds to run before stopping.
    #[arg(long, default_value_t = 120.0)]
    seconds: f64,

    /// Frames per simulated second.
    #[arg(
        long,
        default_value_t = DEFAULT_FRAME_RATE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    fps: u32,

    /// Override the config's RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Frames between automatic collect commands (0 disables).
    #[arg(long, default_value_t = 15)]
    collect_every: u64,

    /// Walk toward the nearest battery every frame.
    #[arg(long)]
    autopilot: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let dt = 1.0 / cli.fps as f64;
    let frames = (cli.seconds.max(0.0) * cli.fps as f64).ceil() as u64;

    let mut engine = SimulationEngine::new(config)?;
    engine.begin_play();

    let mut spawned = 0u32;
    let mut collected = 0u32;
    let mut snapshot = engine.tick(0.0);
    for frame in 0..frames {
        if cli.collect_every > 0 && frame % cli.collect_every == 0 {
            engine.queue_command(PlayerCommand::Collect);
        }
        if cli.autopilot {
            if let Some(direction) = direction_to_nearest_battery(&engine) {
                engine.queue_command(PlayerCommand::Walk { direction });
            }
        }

        snapshot = engine.tick(dt);
        for event in &snapshot.events {
            match event {
                GameEvent::PickupSpawned { .. } => spawned += 1,
                GameEvent::PickupCollected { count, .. } => collected += count,
                _ => {}
            }
        }
        if snapshot.state.is_terminal() {
            break;
        }
    }

    log::info!(
        "finished in {:?} after {:.1}s: {spawned} spawned, {collected} collected",
        snapshot.state,
        snapshot.time.elapsed_secs
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Unit direction from the player to the closest active battery.
fn direction_to_nearest_battery(engine: &SimulationEngine) -> Option<DVec3> {
    let player = engine.player()?;
    let origin = engine.world().get::<&Location>(player).ok()?.0;

    let mut query = engine.world().query::<(&Pickup, &Location)>();
    let target = query
        .iter()
        .filter(|(_, (pickup, _))| pickup.active)
        .map(|(_, (_, location))| location.0)
        .min_by(|a, b| a.distance_squared(origin).total_cmp(&b.distance_squared(origin)))?;

    let offset = target - origin;
    (offset.length_squared() > 1.0).then(|| offset.normalize())
}
