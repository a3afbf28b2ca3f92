use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::sync::Notify;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mk3_age_cycles::simulation::{
    DEFAULT_AGE_TURNS, GameSpeed, Ruleset, SaveGame, SimulationConfig, SimulationWorld,
};

#[derive(Parser, Debug)]
#[command(name = "mk3_age_cycles")]
#[command(about = "Run Golden Age / Dark Age cycles for a set of civilizations")]
struct Args {
    /// Stop after this many turns (0 runs until Ctrl-C)
    #[arg(short, long, default_value = "300")]
    turns: u64,

    /// Milliseconds between turns
    #[arg(long, default_value = "250")]
    tick_ms: u64,

    /// Seed for per-turn happiness drift
    #[arg(short, long, default_value = "911")]
    seed: u64,

    #[arg(long, value_enum, default_value_t = GameSpeed::Standard)]
    speed: GameSpeed,

    /// Base length of an age before modifiers
    #[arg(long, default_value_t = DEFAULT_AGE_TURNS)]
    age_turns: i32,

    /// JSON ruleset with age length modifiers and triggered effects
    #[arg(long)]
    ruleset: Option<PathBuf>,

    /// Resume from a save written by --save
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write the final state here on shutdown
    #[arg(long)]
    save: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let config = SimulationConfig {
        tick_duration: Duration::from_millis(args.tick_ms.max(1)),
        turn_limit: (args.turns > 0).then_some(args.turns),
        seed: args.seed,
        speed: args.speed,
        base_age_turns: args.age_turns,
        ..Default::default()
    };
    let ruleset = match &args.ruleset {
        Some(path) => Ruleset::load(path)?,
        None => Ruleset::default(),
    };

    let mut simulation = SimulationWorld::new(config, ruleset);
    if let Some(path) = &args.load {
        let save = SaveGame::read(path)?;
        simulation.restore(save);
    }
    let observer = simulation.observer();
    info!(
        turn = simulation.turn(),
        speed = ?simulation.config().speed,
        limit = ?simulation.config().turn_limit,
        "simulation starting"
    );

    let shutdown_notify = Arc::new(Notify::new());
    let notify_for_simulation = shutdown_notify.clone();
    let simulation_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(simulation.config().tick_duration);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    simulation.tick();
                    if simulation.finished() {
                        break;
                    }
                },
                _ = notify_for_simulation.notified() => break,
            }
        }
        simulation
    });

    let ctrlc_notify = shutdown_notify.clone();
    let ctrl_c_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping after the current turn");
            ctrlc_notify.notify_one();
        }
    });

    let simulation = simulation_task.await.context("simulation task failed")?;
    ctrl_c_task.abort();

    if let Some(path) = &args.save {
        simulation.save().write(path)?;
        info!(path = %path.display(), turn = simulation.turn(), "saved");
    }

    let snapshot = observer
        .read()
        .map_err(|_| anyhow::anyhow!("observer lock is poisoned"))?
        .clone();
    let golden: Vec<&str> = snapshot.in_golden_age().map(|nation| nation.name()).collect();
    info!(turn = snapshot.turn, golden = ?golden, "simulation finished");
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
