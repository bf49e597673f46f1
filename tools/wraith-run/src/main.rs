//! wraith-run: headless runner for WRAITH scenarios.
//!
//! Usage:
//!   wraith-run --scenario corridor --ticks 600
//!   wraith-run --file level.json --seed 7 --snapshots
//!
//! Prints one JSON object per line on stdout: every agent event, plus the
//! full snapshot of each tick with `--snapshots`. Logs go to stderr.

mod logging;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use wraith_core::enums::ScenarioId;
use wraith_sim::{Scenario, SimConfig, SimulationEngine};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Builtin {
    Corridor,
    Courtyard,
    RandomPatrol,
}

impl From<Builtin> for ScenarioId {
    fn from(value: Builtin) -> Self {
        match value {
            Builtin::Corridor => ScenarioId::Corridor,
            Builtin::Courtyard => ScenarioId::Courtyard,
            Builtin::RandomPatrol => ScenarioId::RandomPatrol,
        }
    }
}

/// Run a patrol/chase scenario without a renderer
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Built-in scenario to run
    #[arg(long, value_enum, default_value = "corridor", conflicts_with = "file")]
    scenario: Builtin,

    /// Scenario JSON file to run instead of a built-in
    #[arg(long)]
    file: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 900)]
    ticks: u64,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the full snapshot after every tick
    #[arg(long)]
    snapshots: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(err) = run(&args) {
        eprintln!("wraith-run: {err}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = SimulationEngine::new(SimConfig { seed: args.seed });
    match &args.file {
        Some(path) => engine.load_scenario(&Scenario::load(path)?)?,
        None => engine.load_builtin(args.scenario.into())?,
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for _ in 0..args.ticks {
        let snapshot = engine.tick();
        if args.snapshots {
            serde_json::to_writer(&mut out, &snapshot)?;
            writeln!(out)?;
        } else {
            for event in &snapshot.events {
                serde_json::to_writer(&mut out, event)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()?;

    log::info!(
        "ran {} ticks ({:.1} s), target {}",
        engine.time().tick,
        engine.time().elapsed_secs,
        if engine.target_caught() {
            "caught"
        } else {
            "escaped"
        }
    );
    Ok(())
}
