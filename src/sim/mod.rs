//! Simulation engine - the deterministic ant war
//!
//! A [`Sim`] is built once from a world, two brains and a seed, then
//! advanced one round at a time with [`Sim::step`]. Everything is
//! sequential and reproducible: the same inputs always produce the same
//! debug dump at every round.
//!
//! Branching (replay, rewind, what-if) goes through `clone()`, which copies
//! all mutable state and shares the immutable topology and brains.

pub mod combat;
pub mod rng;
pub mod runner;
pub mod snapshot;
pub mod step;
pub mod topology;
pub mod trace;

use std::sync::Arc;
use thiserror::Error;

use crate::brain::{Brain, State};
use crate::core::types::{AntId, Color, PerColor, Round};
use crate::world::{CellKind, World, WorldPos};

pub use rng::Rng;
pub use runner::{MatchOutcome, MatchReport, MatchRunner};
pub use snapshot::{AntView, CellView, FoodTally, SimSnapshot};
pub use topology::Topology;
pub use trace::write_trace;

/// Resting rounds after a successful move
pub const MOVE_REST: u32 = 14;

/// Opposing neighbours needed to kill an ant
pub const SURROUND_THRESHOLD: usize = 5;

/// Food left behind by a killed ant (plus one if it was carrying)
pub const CORPSE_FOOD: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("world has no cells")]
    EmptyWorld,
    #[error("world lists cell ({x}, {y}) more than once")]
    DuplicatePosition { x: i32, y: i32 },
}

/// One slot of the index space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub is_rock: bool,
    pub occupant: Option<AntId>,
    pub hill: Option<Color>,
    pub food: u32,
    /// 6-bit marker masks, one per colour
    pub markers: PerColor<u8>,
}

impl Cell {
    /// Filler for slots that are not part of the world
    fn rock() -> Self {
        Self {
            is_rock: true,
            occupant: None,
            hill: None,
            food: 0,
            markers: PerColor::new(0, 0),
        }
    }

    fn from_kind(kind: CellKind) -> Self {
        let (is_rock, food) = match kind {
            CellKind::Rock => (true, 0),
            CellKind::Food(n) => (false, n),
            CellKind::Clear | CellKind::RedHill | CellKind::BlackHill => (false, 0),
        };
        Self {
            is_rock,
            occupant: None,
            hill: kind.hill(),
            food,
            markers: PerColor::new(0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ant {
    pub color: Color,
    /// Index of the occupied cell; meaningless once dead
    pub cell_idx: usize,
    pub state: State,
    pub resting: u32,
    /// 0..5, see `world::hex::HEX_DELTAS`
    pub facing: u8,
    pub has_food: bool,
    pub alive: bool,
}

/// Where all the food in the world currently is
///
/// Hill stockpiles mirror the food lying on each colour's anthill cells,
/// unclaimed is the food on every other cell, carried is food held by live
/// ants. Only instruction execution and the surround rule change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FoodLedger {
    hill: PerColor<u64>,
    carried: PerColor<u64>,
    unclaimed: u64,
}

impl FoodLedger {
    pub fn hill_food(&self, color: Color) -> u64 {
        *self.hill.get(color)
    }

    pub fn carried(&self, color: Color) -> u64 {
        *self.carried.get(color)
    }

    pub fn unclaimed(&self) -> u64 {
        self.unclaimed
    }

    pub fn total(&self) -> u64 {
        self.hill.red + self.hill.black + self.carried.red + self.carried.black + self.unclaimed
    }

    /// Food placed on a cell
    fn add_to_cell(&mut self, hill: Option<Color>, amount: u64) {
        match hill {
            Some(owner) => *self.hill.get_mut(owner) += amount,
            None => self.unclaimed += amount,
        }
    }

    /// Food taken off a cell
    fn take_from_cell(&mut self, hill: Option<Color>, amount: u64) {
        match hill {
            Some(owner) => *self.hill.get_mut(owner) -= amount,
            None => self.unclaimed -= amount,
        }
    }

    fn pick_up(&mut self, carrier: Color, hill: Option<Color>) {
        self.take_from_cell(hill, 1);
        *self.carried.get_mut(carrier) += 1;
    }

    fn put_down(&mut self, carrier: Color, hill: Option<Color>) {
        *self.carried.get_mut(carrier) -= 1;
        self.add_to_cell(hill, 1);
    }

    /// A carrier died: its load is gone from the carried total
    fn drop_carried(&mut self, carrier: Color) {
        *self.carried.get_mut(carrier) -= 1;
    }
}

/// The simulation state
#[derive(Debug)]
pub struct Sim {
    topology: Arc<Topology>,
    brains: PerColor<Brain>,
    cells: Vec<Cell>,
    /// Every ant ever spawned; dead ants stay as tombstones
    ants: Vec<Ant>,
    rng: Rng,
    seed: u64,
    round: Round,
    food: FoodLedger,
    initial_ants: PerColor<usize>,
}

impl Sim {
    /// Build a simulation. Every anthill cell spawns one ant of its colour,
    /// with ids assigned in world order.
    pub fn new(world: &World, red_brain: Brain, black_brain: Brain, seed: u64) -> Result<Self, SimError> {
        let topology = Topology::build(world)?;
        let mut cells = vec![Cell::rock(); topology.len()];
        let mut ants = Vec::new();
        let mut food = FoodLedger::default();
        let mut initial_ants = PerColor::new(0, 0);

        for (placed, &(_, idx)) in world.iter().zip(topology.positions()) {
            let mut cell = Cell::from_kind(placed.kind);
            food.add_to_cell(cell.hill, u64::from(cell.food));
            if let Some(color) = cell.hill {
                cell.occupant = Some(AntId(ants.len()));
                ants.push(Ant {
                    color,
                    cell_idx: idx,
                    state: 0,
                    resting: 0,
                    facing: 0,
                    has_food: false,
                    alive: true,
                });
                *initial_ants.get_mut(color) += 1;
            }
            cells[idx] = cell;
        }

        tracing::debug!(
            cells = world.len(),
            red_ants = initial_ants.red,
            black_ants = initial_ants.black,
            food = food.total(),
            seed,
            "Simulation created"
        );

        Ok(Self {
            topology: Arc::new(topology),
            brains: PerColor::new(red_brain, black_brain),
            cells,
            ants,
            rng: Rng::new(seed),
            seed,
            round: 0,
            food,
            initial_ants,
        })
    }

    /// Rounds played so far
    pub fn round(&self) -> Round {
        self.round
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn brain(&self, color: Color) -> &Brain {
        self.brains.get(color)
    }

    /// All slots of the index space, filler included
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Every ant ever spawned, dead ones included
    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn ant(&self, id: AntId) -> Option<&Ant> {
        self.ants.get(id.index())
    }

    /// Cell at a world position; `None` if the position is not in the world
    pub fn cell_at(&self, pos: WorldPos) -> Option<&Cell> {
        self.topology
            .positions()
            .iter()
            .find(|(p, _)| *p == pos)
            .map(|&(_, idx)| &self.cells[idx])
    }

    pub fn food(&self) -> &FoodLedger {
        &self.food
    }

    pub fn initial_ants(&self, color: Color) -> usize {
        *self.initial_ants.get(color)
    }

    pub fn living_ants(&self, color: Color) -> usize {
        self.ants.iter().filter(|a| a.alive && a.color == color).count()
    }

    /// Run `rounds` more rounds
    pub fn run(&mut self, rounds: Round) {
        for _ in 0..rounds {
            self.step();
        }
    }
}

/// Copies every mutable table and the generator; topology and brains are
/// shared.
impl Clone for Sim {
    fn clone(&self) -> Self {
        Self {
            topology: Arc::clone(&self.topology),
            brains: self.brains.clone(),
            cells: self.cells.clone(),
            ants: self.ants.clone(),
            rng: self.rng,
            seed: self.seed,
            round: self.round,
            food: self.food,
            initial_ants: self.initial_ants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::parse_brain;
    use crate::world::parse_world;

    fn idle() -> Brain {
        parse_brain("turn left 0").unwrap()
    }

    #[test]
    fn test_ants_spawn_on_hills_in_world_order() {
        let world = parse_world("3\n2\n- . +\n + 4 #\n").unwrap();
        let sim = Sim::new(&world, idle(), idle(), 1).unwrap();

        assert_eq!(sim.ants().len(), 3);
        assert_eq!(sim.ants()[0].color, Color::Black);
        assert_eq!(sim.ants()[1].color, Color::Red);
        assert_eq!(sim.ants()[2].color, Color::Red);
        assert_eq!(sim.initial_ants(Color::Red), 2);
        assert_eq!(sim.initial_ants(Color::Black), 1);

        for (i, ant) in sim.ants().iter().enumerate() {
            assert_eq!(sim.cells()[ant.cell_idx].occupant, Some(AntId(i)));
            assert_eq!(ant.state, 0);
            assert_eq!(ant.facing, 0);
        }
    }

    #[test]
    fn test_initial_food_is_unclaimed() {
        let world = parse_world("3\n1\n+ 4 7\n").unwrap();
        let sim = Sim::new(&world, idle(), idle(), 1).unwrap();
        assert_eq!(sim.food().unclaimed(), 11);
        assert_eq!(sim.food().hill_food(Color::Red), 0);
        assert_eq!(sim.food().total(), world.total_food());
    }

    #[test]
    fn test_filler_is_rock() {
        let world = parse_world("2\n2\n. .\n. .\n").unwrap();
        let sim = Sim::new(&world, idle(), idle(), 1).unwrap();
        let world_cells: Vec<usize> = sim.topology().positions().iter().map(|(_, i)| *i).collect();
        for (idx, cell) in sim.cells().iter().enumerate() {
            assert_eq!(cell.is_rock, !world_cells.contains(&idx));
        }
    }

    #[test]
    fn test_clone_shares_topology() {
        let world = parse_world("1\n1\n+\n").unwrap();
        let sim = Sim::new(&world, idle(), idle(), 1).unwrap();
        let copy = sim.clone();
        assert!(Arc::ptr_eq(&sim.topology, &copy.topology));
        assert_eq!(copy.ants(), sim.ants());
    }

    #[test]
    fn test_cell_at() {
        let world = parse_world("2\n1\n. 5\n").unwrap();
        let sim = Sim::new(&world, idle(), idle(), 1).unwrap();
        assert_eq!(sim.cell_at(WorldPos::new(1, 0)).map(|c| c.food), Some(5));
        assert!(sim.cell_at(WorldPos::new(2, 0)).is_none());
    }
}
