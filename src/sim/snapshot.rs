//! Read-only views of a simulation for rendering, reports and debug dumps

use serde::Serialize;

use crate::brain::{State, MARKER_COUNT};
use crate::core::types::{AntId, Color, PerColor, Round};
use crate::sim::runner::MatchOutcome;
use crate::sim::{Cell, Sim};
use crate::world::WorldPos;

/// One world cell as seen from outside the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub pos: WorldPos,
    pub rock: bool,
    pub food: u32,
    pub hill: Option<Color>,
    pub markers: PerColor<u8>,
    pub occupant: Option<AntId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AntView {
    pub id: AntId,
    pub color: Color,
    /// Last position; for a dead ant, where it died
    pub pos: WorldPos,
    pub facing: u8,
    pub has_food: bool,
    pub state: State,
    pub resting: u32,
    pub alive: bool,
}

/// Aggregate food and population counters at one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FoodTally {
    pub round: Round,
    pub hill: PerColor<u64>,
    pub carried: PerColor<u64>,
    pub unclaimed: u64,
    pub living: PerColor<usize>,
}

impl FoodTally {
    /// All food in the world
    pub fn total(&self) -> u64 {
        self.hill.red + self.hill.black + self.carried.red + self.carried.black + self.unclaimed
    }

    /// The colour with the larger stockpile wins
    pub fn outcome(&self) -> MatchOutcome {
        use std::cmp::Ordering;
        match self.hill.red.cmp(&self.hill.black) {
            Ordering::Greater => MatchOutcome::Winner(Color::Red),
            Ordering::Less => MatchOutcome::Winner(Color::Black),
            Ordering::Equal => MatchOutcome::Draw,
        }
    }
}

/// Full state of a simulation at one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimSnapshot {
    pub round: Round,
    pub seed: u64,
    pub cells: Vec<CellView>,
    pub ants: Vec<AntView>,
    pub tally: FoodTally,
}

impl Sim {
    pub fn tally(&self) -> FoodTally {
        FoodTally {
            round: self.round,
            hill: PerColor::new(self.food.hill_food(Color::Red), self.food.hill_food(Color::Black)),
            carried: PerColor::new(self.food.carried(Color::Red), self.food.carried(Color::Black)),
            unclaimed: self.food.unclaimed(),
            living: PerColor::new(self.living_ants(Color::Red), self.living_ants(Color::Black)),
        }
    }

    pub fn outcome(&self) -> MatchOutcome {
        self.tally().outcome()
    }

    pub fn snapshot(&self) -> SimSnapshot {
        let cells = self
            .topology
            .positions()
            .iter()
            .map(|&(pos, idx)| {
                let cell = &self.cells[idx];
                CellView {
                    pos,
                    rock: cell.is_rock,
                    food: cell.food,
                    hill: cell.hill,
                    markers: cell.markers,
                    occupant: cell.occupant,
                }
            })
            .collect();

        let ants = self
            .ants
            .iter()
            .enumerate()
            .map(|(i, ant)| AntView {
                id: AntId(i),
                color: ant.color,
                pos: self.topology.world_pos_of(ant.cell_idx),
                facing: ant.facing,
                has_food: ant.has_food,
                state: ant.state,
                resting: ant.resting,
                alive: ant.alive,
            })
            .collect();

        SimSnapshot {
            round: self.round,
            seed: self.seed,
            cells,
            ants,
            tally: self.tally(),
        }
    }

    /// Debug dump, one line per world cell in world order
    pub fn dump_lines(&self) -> Vec<String> {
        self.topology
            .positions()
            .iter()
            .map(|&(pos, idx)| self.dump_cell(pos, &self.cells[idx]))
            .collect()
    }

    fn dump_cell(&self, pos: WorldPos, cell: &Cell) -> String {
        let mut line = format!("cell ({}, {}): ", pos.x, pos.y);
        if cell.is_rock {
            line.push_str("rock");
        }
        if cell.food > 0 {
            line.push_str(&format!("{} food; ", cell.food));
        }
        if let Some(hill) = cell.hill {
            line.push_str(&format!("{hill} hill; "));
        }
        for color in Color::ALL {
            let mask = *cell.markers.get(color);
            if mask != 0 {
                line.push_str(&format!("{color} marks: {}; ", marker_digits(mask)));
            }
        }
        if let Some(id) = cell.occupant {
            let ant = &self.ants[id.index()];
            line.push_str(&format!(
                "{} ant of id {id}, dir {}, food {}, state {}, resting {}",
                ant.color,
                ant.facing,
                u8::from(ant.has_food),
                ant.state,
                ant.resting
            ));
        }
        line
    }
}

/// Set marker indices in ascending order, e.g. `0b100101` -> "025"
fn marker_digits(mask: u8) -> String {
    (0..MARKER_COUNT)
        .filter(|i| mask & (1 << i) != 0)
        .map(|i| char::from(b'0' + i))
        .collect()
}
