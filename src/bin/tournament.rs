//! Round-robin tournament runner
//!
//! Plays every pair of brains against each other with both colour
//! assignments on every seed and prints the standings.

use std::path::PathBuf;

use ant_war::brain::Brain;
use ant_war::core::config::{DEFAULT_ROUNDS, DEFAULT_SEED};
use ant_war::core::error::Result;
use ant_war::tournament::{run_tournament, Entry};
use ant_war::world::load_world;
use clap::Parser;

/// Ant War tournament - rank brains by wins, draws and food delivered
#[derive(Parser, Debug)]
#[command(name = "tournament")]
struct Args {
    /// World map file
    #[arg(long)]
    world: PathBuf,

    /// Comma separated seeds; every pairing is played once per seed
    #[arg(long, value_delimiter = ',', default_values_t = [DEFAULT_SEED])]
    seeds: Vec<u64>,

    /// Rounds per game
    #[arg(long, default_value_t = DEFAULT_ROUNDS)]
    rounds: u64,

    /// Write games and standings as JSON here
    #[arg(long)]
    json: Option<PathBuf>,

    /// Brain files; each file's stem is its name in the standings
    #[arg(required = true, num_args = 2..)]
    brains: Vec<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ant_war=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let world = load_world(&args.world)?;

    let mut entries = Vec::with_capacity(args.brains.len());
    for path in &args.brains {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        entries.push(Entry::new(name, Brain::load(path)?));
    }

    let result = run_tournament(&world, &entries, &args.seeds, args.rounds)?;

    println!(
        "{:<4} {:<20} {:>6} {:>4} {:>4} {:>4} {:>6} {:>8}",
        "#", "brain", "played", "W", "D", "L", "points", "food"
    );
    for (rank, s) in result.standings.iter().enumerate() {
        println!(
            "{:<4} {:<20} {:>6} {:>4} {:>4} {:>4} {:>6} {:>8}",
            rank + 1,
            s.name,
            s.played,
            s.wins,
            s.draws,
            s.losses,
            s.points,
            s.food
        );
    }

    if let Some(path) = args.json {
        std::fs::write(&path, serde_json::to_string_pretty(&result)?)?;
        tracing::info!(path = %path.display(), "Results written");
    }
    Ok(())
}
