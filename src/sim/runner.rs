//! Match runner - plays a configured match in batches
//!
//! The runner is the only place a host regains control during a match:
//! between batches. Batch size never changes the result.

use serde::Serialize;
use std::fmt;

use crate::brain::Brain;
use crate::core::config::MatchConfig;
use crate::core::error::Result;
use crate::core::types::{Color, PerColor, Round};
use crate::sim::{FoodTally, Sim};
use crate::world::World;

/// Result of a finished match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    Winner(Color),
    Draw,
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::Winner(color) => write!(f, "{color} wins"),
            MatchOutcome::Draw => f.write_str("draw"),
        }
    }
}

/// Summary of a played match, written out as JSON by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub seed: u64,
    pub rounds: Round,
    pub outcome: MatchOutcome,
    pub final_tally: FoodTally,
    pub initial_ants: PerColor<usize>,
    pub surviving_ants: PerColor<usize>,
    /// Tallies at round 0, every `tally_interval` rounds and the last round
    pub history: Vec<FoodTally>,
}

pub struct MatchRunner {
    sim: Sim,
    config: MatchConfig,
    history: Vec<FoodTally>,
}

impl MatchRunner {
    /// Build the simulation for a match; the seed comes from `config`
    pub fn new(world: &World, red: Brain, black: Brain, config: MatchConfig) -> Result<Self> {
        config.validate()?;
        let sim = Sim::new(world, red, black, config.seed)?;

        tracing::info!(
            seed = config.seed,
            rounds = config.rounds,
            red_ants = sim.initial_ants(Color::Red),
            black_ants = sim.initial_ants(Color::Black),
            "Match started"
        );

        let history = vec![sim.tally()];
        Ok(Self { sim, config, history })
    }

    pub fn sim(&self) -> &Sim {
        &self.sim
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn history(&self) -> &[FoodTally] {
        &self.history
    }

    pub fn rounds_remaining(&self) -> Round {
        self.config.rounds.saturating_sub(self.sim.round())
    }

    pub fn is_finished(&self) -> bool {
        self.rounds_remaining() == 0
    }

    /// Play up to `batch_size` rounds; returns how many were played
    pub fn run_batch(&mut self) -> Round {
        let batch = self.config.batch_size.min(self.rounds_remaining());
        for _ in 0..batch {
            self.sim.step();
            let round = self.sim.round();
            if round % self.config.tally_interval == 0 || round == self.config.rounds {
                self.history.push(self.sim.tally());
            }
        }

        let tally = self.sim.tally();
        tracing::debug!(
            round = tally.round,
            red_food = tally.hill.red,
            black_food = tally.hill.black,
            red_ants = tally.living.red,
            black_ants = tally.living.black,
            "Batch complete"
        );
        batch
    }

    /// Play the rest of the match, calling `on_batch` after every batch
    pub fn run_to_end<F: FnMut(&Sim)>(&mut self, mut on_batch: F) {
        while !self.is_finished() {
            self.run_batch();
            on_batch(&self.sim);
        }
    }

    pub fn finish(self) -> MatchReport {
        let final_tally = self.sim.tally();
        let outcome = final_tally.outcome();

        tracing::info!(
            rounds = final_tally.round,
            red_food = final_tally.hill.red,
            black_food = final_tally.hill.black,
            %outcome,
            "Match finished"
        );

        MatchReport {
            seed: self.sim.seed(),
            rounds: final_tally.round,
            outcome,
            final_tally,
            initial_ants: PerColor::new(
                self.sim.initial_ants(Color::Red),
                self.sim.initial_ants(Color::Black),
            ),
            surviving_ants: final_tally.living,
            history: self.history,
        }
    }
}
