//! Ant War - command line entry point
//!
//! `run` plays a match and prints a summary, `check` validates brain files,
//! `trace` writes the per-round debug dump used for conformance testing.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use ant_war::brain::Brain;
use ant_war::core::config::MatchConfig;
use ant_war::core::error::Result;
use ant_war::core::types::Color;
use ant_war::sim::{write_trace, MatchRunner, Sim};
use ant_war::world::load_world;
use clap::{Parser, Subcommand};
use rand::Rng as _;

#[derive(Parser, Debug)]
#[command(name = "ant-war", version, about = "Deterministic two-colony ant war simulation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a match and print the result
    Run {
        /// World map file
        #[arg(long)]
        world: PathBuf,

        /// Brain for the red colony
        #[arg(long)]
        red: PathBuf,

        /// Brain for the black colony
        #[arg(long)]
        black: PathBuf,

        /// Random seed (from the config file, or drawn at random, when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Rounds to play
        #[arg(long)]
        rounds: Option<u64>,

        /// TOML match configuration; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the JSON match report here
        #[arg(long)]
        report: Option<PathBuf>,

        /// Write a JSON snapshot of the final state here
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Parse brain files and report errors
    Check {
        /// Brain files to check
        #[arg(required = true)]
        brains: Vec<PathBuf>,
    },
    /// Write the debug dump of every round
    Trace {
        #[arg(long)]
        world: PathBuf,

        #[arg(long)]
        red: PathBuf,

        #[arg(long)]
        black: PathBuf,

        #[arg(long, default_value_t = ant_war::core::config::DEFAULT_SEED)]
        seed: u64,

        #[arg(long, default_value_t = 10_000)]
        rounds: u64,

        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ant_war=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            world,
            red,
            black,
            seed,
            rounds,
            config,
            report,
            snapshot,
        } => {
            let from_file = config.is_some();
            let mut match_config = match config {
                Some(path) => MatchConfig::load(&path)?,
                None => MatchConfig::default(),
            };
            match_config.seed = match seed {
                Some(seed) => seed,
                None if from_file => match_config.seed,
                None => {
                    let seed = rand::thread_rng().gen_range(1..(1u64 << 30));
                    tracing::info!(seed, "No seed given, drew one at random");
                    seed
                }
            };
            if let Some(rounds) = rounds {
                match_config.rounds = rounds;
            }
            run_match(&world, &red, &black, match_config, report.as_deref(), snapshot.as_deref())
        }
        Command::Check { brains } => {
            if !check_brains(&brains) {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Trace {
            world,
            red,
            black,
            seed,
            rounds,
            out,
        } => {
            let world = load_world(&world)?;
            let mut sim = Sim::new(&world, Brain::load(&red)?, Brain::load(&black)?, seed)?;
            match out {
                Some(path) => {
                    let mut writer = BufWriter::new(File::create(&path)?);
                    write_trace(&mut sim, rounds, &mut writer)?;
                    writer.flush()?;
                    tracing::info!(path = %path.display(), rounds, "Trace written");
                }
                None => {
                    let mut writer = BufWriter::new(io::stdout().lock());
                    write_trace(&mut sim, rounds, &mut writer)?;
                    writer.flush()?;
                }
            }
            Ok(())
        }
    }
}

fn run_match(
    world: &Path,
    red: &Path,
    black: &Path,
    config: MatchConfig,
    report_path: Option<&Path>,
    snapshot_path: Option<&Path>,
) -> Result<()> {
    let world = load_world(world)?;
    let mut runner = MatchRunner::new(&world, Brain::load(red)?, Brain::load(black)?, config)?;

    runner.run_to_end(|sim| {
        tracing::debug!(round = sim.round(), "Progress");
    });

    let snapshot = runner.sim().snapshot();
    let report = runner.finish();

    println!("Ant War - {} rounds, seed {}", report.rounds, report.seed);
    for color in Color::ALL {
        println!(
            "  {:<5}  food {:>4}  ants {:>3}/{:<3}",
            color.name(),
            report.final_tally.hill.get(color),
            report.surviving_ants.get(color),
            report.initial_ants.get(color),
        );
    }
    println!("Result: {}", report.outcome);

    if let Some(path) = report_path {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        tracing::info!(path = %path.display(), "Report written");
    }
    if let Some(path) = snapshot_path {
        std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        tracing::info!(path = %path.display(), "Snapshot written");
    }
    Ok(())
}

/// Print one line per brain file; returns whether all of them parsed
fn check_brains(paths: &[PathBuf]) -> bool {
    let mut ok = true;
    for path in paths {
        match Brain::load(path) {
            Ok(brain) => println!("{}: ok, {} instructions", path.display(), brain.len()),
            Err(e) => {
                println!("{}: {}", path.display(), e);
                ok = false;
            }
        }
    }
    ok
}
