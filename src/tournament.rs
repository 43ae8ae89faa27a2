//! Round-robin tournament between brains
//!
//! Every ordered pair of distinct entries plays on every seed, so each pair
//! meets once with each colour assignment per seed. Games are independent
//! and run in parallel; results do not depend on scheduling.

use rayon::prelude::*;
use serde::Serialize;

use crate::brain::Brain;
use crate::core::config::{ConfigError, MatchConfig};
use crate::core::error::Result;
use crate::core::types::{Color, PerColor, Round};
use crate::sim::{MatchOutcome, MatchRunner};
use crate::world::World;

/// Points for a win
pub const WIN_POINTS: u32 = 2;

/// Points for a draw
pub const DRAW_POINTS: u32 = 1;

/// A named brain taking part in a tournament
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub brain: Brain,
}

impl Entry {
    pub fn new(name: impl Into<String>, brain: Brain) -> Self {
        Self {
            name: name.into(),
            brain,
        }
    }
}

/// One scheduled game: entry indices and the seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixture {
    pub red: usize,
    pub black: usize,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub red: String,
    pub black: String,
    pub seed: u64,
    pub outcome: MatchOutcome,
    /// Final hill stockpiles
    pub food: PerColor<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,
    /// Food delivered to its own hills over all games
    pub food: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TournamentResult {
    pub games: Vec<GameResult>,
    /// Best first
    pub standings: Vec<Standing>,
}

/// Schedule of a tournament: seeds outermost, then red entry, then black
pub fn fixtures(entries: usize, seeds: &[u64]) -> Vec<Fixture> {
    let mut out = Vec::with_capacity(seeds.len() * entries * entries.saturating_sub(1));
    for &seed in seeds {
        for red in 0..entries {
            for black in (0..entries).filter(|&b| b != red) {
                out.push(Fixture { red, black, seed });
            }
        }
    }
    out
}

/// Play one full game
pub fn play_game(world: &World, red: &Entry, black: &Entry, seed: u64, rounds: Round) -> Result<GameResult> {
    let config = MatchConfig {
        seed,
        rounds,
        batch_size: rounds.max(1),
        tally_interval: rounds.max(1),
    };
    let mut runner = MatchRunner::new(world, red.brain.clone(), black.brain.clone(), config)?;
    runner.run_to_end(|_| {});
    let report = runner.finish();

    tracing::debug!(
        red = %red.name,
        black = %black.name,
        seed,
        outcome = %report.outcome,
        "Game finished"
    );

    Ok(GameResult {
        red: red.name.clone(),
        black: black.name.clone(),
        seed,
        outcome: report.outcome,
        food: report.final_tally.hill,
    })
}

/// Play every fixture in parallel and rank the entries
pub fn run_tournament(world: &World, entries: &[Entry], seeds: &[u64], rounds: Round) -> Result<TournamentResult> {
    if entries.len() < 2 {
        return Err(ConfigError::Invalid("a tournament needs at least two brains".into()).into());
    }
    if seeds.is_empty() {
        return Err(ConfigError::Invalid("a tournament needs at least one seed".into()).into());
    }

    let schedule = fixtures(entries.len(), seeds);
    tracing::info!(
        entries = entries.len(),
        seeds = seeds.len(),
        games = schedule.len(),
        rounds,
        "Tournament started"
    );

    let games = schedule
        .par_iter()
        .map(|f| play_game(world, &entries[f.red], &entries[f.black], f.seed, rounds))
        .collect::<Result<Vec<_>>>()?;

    let standings = standings(entries, &games);
    if let Some(leader) = standings.first() {
        tracing::info!(leader = %leader.name, points = leader.points, "Tournament finished");
    }
    Ok(TournamentResult { games, standings })
}

/// Tally results per entry, sorted by points, then food, then name
pub fn standings(entries: &[Entry], games: &[GameResult]) -> Vec<Standing> {
    let mut table: Vec<Standing> = entries
        .iter()
        .map(|e| Standing {
            name: e.name.clone(),
            ..Standing::default()
        })
        .collect();

    for game in games {
        for color in Color::ALL {
            let name = match color {
                Color::Red => &game.red,
                Color::Black => &game.black,
            };
            let Some(row) = table.iter_mut().find(|s| &s.name == name) else {
                continue;
            };
            row.played += 1;
            row.food += *game.food.get(color);
            match game.outcome {
                MatchOutcome::Winner(winner) if winner == color => {
                    row.wins += 1;
                    row.points += WIN_POINTS;
                }
                MatchOutcome::Winner(_) => row.losses += 1,
                MatchOutcome::Draw => {
                    row.draws += 1;
                    row.points += DRAW_POINTS;
                }
            }
        }
    }

    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.food.cmp(&a.food))
            .then_with(|| a.name.cmp(&b.name))
    });
    table
}
