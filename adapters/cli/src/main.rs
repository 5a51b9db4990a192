#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Tank Battle levels headlessly.

mod render;
mod script;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use tank_battle_core::{LevelConfig, Material, GAME_TITLE};
use tank_battle_world::{query, World};

use script::Script;

#[derive(Parser)]
#[command(name = "tank-battle", about = GAME_TITLE, version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a level with scripted player input
    Run {
        /// Level file (TOML, or JSON when the extension is .json)
        #[arg(short, long)]
        level: PathBuf,

        /// Simulated seconds to run before stopping
        #[arg(short, long, default_value_t = 60)]
        seconds: u64,

        /// Ticks per simulated second
        #[arg(long, default_value_t = 30)]
        fps: u32,

        /// Per-tick intents: U/D/L/R move, F fire, W cycle weapon, . idle
        #[arg(long, default_value = ".")]
        script: String,

        /// Print the final snapshot as JSON instead of a grid
        #[arg(long)]
        json: bool,
    },

    /// Validate a level file
    Check {
        /// Level file (TOML, or JSON when the extension is .json)
        #[arg(short, long)]
        level: PathBuf,
    },
}

/// Entry point for the Tank Battle command-line interface.
fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Commands::Run {
            level,
            seconds,
            fps,
            script,
            json,
        } => run(&level, seconds, fps, &script, json),
        Commands::Check { level } => check(&level),
    }
}

fn run(path: &Path, seconds: u64, fps: u32, script: &str, json: bool) -> Result<()> {
    ensure!(fps > 0, "--fps must be positive");
    let level = load_level(path)?;
    let script = Script::parse(script)?;
    let mut world = World::new(&level)
        .with_context(|| format!("invalid level {}", path.display()))?;

    let step = Duration::from_secs(1) / fps;
    let frames = seconds.saturating_mul(u64::from(fps));
    for frame in 0..=frames {
        let now = Duration::from_secs(frame / u64::from(fps))
            + step * u32::try_from(frame % u64::from(fps)).unwrap_or(0);
        for event in world.tick(now, Some(script.intent(frame))) {
            log::debug!("{now:?}: {event:?}");
        }
        if query::outcome(&world).is_some() {
            break;
        }
    }

    log::info!(
        "stopped at {:?} with score {}",
        query::elapsed(&world),
        query::score(&world)
    );

    let snapshot = world.snapshot();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?
        );
    } else {
        print!("{}", render::frame(&snapshot));
        println!("{}", render::summary(&snapshot));
    }
    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let level = load_level(path)?;
    let world = World::new(&level).with_context(|| format!("invalid level {}", path.display()))?;
    let terrain = query::terrain(&world);
    let breakable = terrain
        .cells()
        .iter()
        .filter(|cell| cell.material() == Material::Destructible)
        .count();
    println!(
        "{}: {}x{} grid, objective at {}, {} spawn points, {breakable} breakable cells",
        path.display(),
        terrain.columns(),
        terrain.rows(),
        query::objective(&world),
        query::spawn_points(&world).len(),
    );
    println!("{} scheduled units", level.scheduled_units());
    Ok(())
}

fn load_level(path: &Path) -> Result<LevelConfig> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let is_json = path
        .extension()
        .map_or(false, |extension| extension.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&source)
            .with_context(|| format!("failed to parse {} as JSON", path.display()))
    } else {
        toml::from_str(&source)
            .with_context(|| format!("failed to parse {} as TOML", path.display()))
    }
}
