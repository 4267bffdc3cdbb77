//! `agentdeck` command-line driver.

use agentdeck_core::logging::{self, LogFormat};
use agentdeck_orchestrator::{
    interpret, is_actionable, write_snapshot, DashboardEvent, DeckConfig, DeckEngine, DeckRuntime,
    DisplayMode,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

const DEFAULT_SEED: u64 = 42;

#[derive(Parser)]
#[command(name = "agentdeck", about = "AgentDeck: agent team simulation and scoring")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "agentdeck.toml")]
    config: PathBuf,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a deterministic simulation and print stats and risks
    Simulate {
        /// Number of status ticks to simulate
        #[arg(long, default_value_t = 20)]
        ticks: u32,
        /// RNG seed (overrides config)
        #[arg(long)]
        seed: Option<u64>,
        /// Display mode used for the final layout
        #[arg(long)]
        mode: Option<String>,
    },
    /// Run live on real timers, then print the final summary
    Run {
        #[arg(long, default_value_t = 10)]
        duration_secs: u64,
    },
    /// Simulate, then write the full JSON report
    Export {
        #[arg(long, default_value_t = 20)]
        ticks: u32,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Interpret a voice transcript
    Voice {
        transcript: String,
    },
    /// Print canvas geometry for the initial roster
    Layout {
        #[arg(long, default_value = "standard")]
        mode: String,
    },
}

/// Build a virtual-time engine and advance it by `ticks` status periods.
fn simulate(config: &DeckConfig, ticks: u32, seed: Option<u64>) -> anyhow::Result<DeckEngine> {
    let seed = seed.or(config.simulation.seed).unwrap_or(DEFAULT_SEED);
    let mut engine = DeckEngine::deterministic(config, seed, Utc::now());
    let span = config.simulation.status_interval().saturating_mul(ticks);
    let ran = engine.advance(span)?;
    engine.dispatch(DashboardEvent::RefreshAllocations)?;
    info!(seed, ticks, events = ran, "Simulation finished");
    Ok(engine)
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    logging::init(format, "info");

    let config = DeckConfig::load(&cli.config).await?;

    match cli.command {
        Commands::Simulate { ticks, seed, mode } => {
            let mut engine = simulate(&config, ticks, seed)?;
            if let Some(mode) = mode {
                engine.dispatch(DashboardEvent::SetMode(DisplayMode::parse_mode(&mode)))?;
            }
            let state = engine.state();
            print_json(&serde_json::json!({
                "stats": state.stats(),
                "risks": state.risk,
                "synergies": state.synergies,
                "mode": state.mode,
            }))?;
        }
        Commands::Run { duration_secs } => {
            let runtime = DeckRuntime::start(&config);
            info!(duration_secs, "Running dashboard on live timers");
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(duration_secs)) => {}
                _ = tokio::signal::ctrl_c() => info!("Interrupted"),
            }
            let engine = runtime.shutdown().await?;
            print_json(&engine.snapshot().to_json())?;
        }
        Commands::Export { ticks, output } => {
            let engine = simulate(&config, ticks, None)?;
            write_snapshot(&engine.snapshot(), &output).await?;
            println!("Snapshot written to {}", output.display());
        }
        Commands::Voice { transcript } => {
            let seed = config.simulation.seed.unwrap_or(DEFAULT_SEED);
            let engine = DeckEngine::deterministic(&config, seed, Utc::now());
            let command = interpret(
                &transcript,
                &engine.state().agents,
                &mut StdRng::seed_from_u64(seed),
                Utc::now(),
            );
            let actionable = is_actionable(&command, config.voice.confidence_threshold);
            print_json(&serde_json::json!({
                "command": command,
                "actionable": actionable,
            }))?;
        }
        Commands::Layout { mode } => {
            let seed = config.simulation.seed.unwrap_or(DEFAULT_SEED);
            let mut engine = DeckEngine::deterministic(&config, seed, Utc::now());
            engine.dispatch(DashboardEvent::SetMode(DisplayMode::parse_mode(&mode)))?;
            print_json(&engine.state().canvas())?;
        }
    }

    Ok(())
}
