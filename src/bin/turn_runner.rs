//! Headless Turn Runner
//!
//! Plans one turn against a snapshot and prints the intents the engine issued.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use stardash_commander::ai::{Commander, TurnAI, TurnReport};
use stardash_commander::core::config::{load_strategy, load_strategy_file, StrategyConfig};
use stardash_commander::core::error::Result;
use stardash_commander::game::{Intent, LocalArbiter, Snapshot};
use stardash_commander::scenario::demo_snapshot;

/// Headless Turn Runner - plan a single Stardash turn
#[derive(Parser, Debug)]
#[command(name = "turn_runner")]
#[command(about = "Plan one turn from a snapshot and print the issued intents")]
struct Args {
    /// Snapshot JSON file to plan against
    #[arg(long, conflicts_with = "demo_seed")]
    snapshot: Option<PathBuf>,

    /// Generate a demo map from this seed instead of reading a snapshot
    #[arg(long)]
    demo_seed: Option<u64>,

    /// Strategy name (loaded from data/strategies/)
    #[arg(long, default_value = "default")]
    strategy: String,

    /// Strategy TOML file; overrides --strategy
    #[arg(long)]
    strategy_file: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Enable per-unit decision logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct TurnOutput {
    strategy: String,
    report: TurnReport,
    intents: Vec<Intent>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        "stardash_commander=debug"
    } else {
        "stardash_commander=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.strategy_file {
        Some(path) => load_strategy_file(path)?,
        None => load_strategy(&args.strategy).unwrap_or_else(|e| {
            tracing::warn!("Failed to load strategy '{}': {}; using default", args.strategy, e);
            StrategyConfig::default()
        }),
    };
    config.validate()?;

    let mut state = match &args.snapshot {
        Some(path) => Snapshot::from_json(&fs::read_to_string(path)?)?,
        None => {
            let seed = args.demo_seed.unwrap_or_else(|| rand::random());
            tracing::info!("Generating demo snapshot from seed {}", seed);
            demo_snapshot(seed)
        }
    };

    let mut commander = Commander::new(config);
    let mut arbiter = LocalArbiter::default();
    commander.start(&state);
    let report = commander.run_turn(&mut state, &mut arbiter);

    let output = TurnOutput {
        strategy: commander.strategy().name.clone(),
        report,
        intents: arbiter.accepted().to_vec(),
    };

    match args.format.as_str() {
        "text" => {
            println!("Turn {} ({})", output.report.turn, output.strategy);
            println!("==============");
            for intent in &output.intents {
                println!("  {}", intent);
            }
            println!();
            println!(
                "Issued: {}  Rejected: {}  Dropped: {}  Spawns: {}",
                output.report.issued, output.report.rejected, output.report.dropped, output.report.spawns
            );
            println!(
                "Fleet: {} miners, {} transports, {} combat, {} martyrs",
                output.report.miners, output.report.transports, output.report.combat, output.report.martyrs
            );
        }
        other => {
            if other != "json" {
                eprintln!("Unknown format '{}', defaulting to json", other);
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
