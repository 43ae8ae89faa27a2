//! The surround rule
//!
//! An ant with at least [`SURROUND_THRESHOLD`] opposing ants on adjacent
//! cells dies and leaves food behind. Only a successful move can change
//! adjacency, so the rule is applied around the destination cell right
//! after each move.

use crate::core::types::{AntId, DIRECTIONS};
use crate::sim::{Sim, CORPSE_FOOD, SURROUND_THRESHOLD};

impl Sim {
    /// Check the ant on `idx`, then the ants on its neighbours in facing order
    pub(crate) fn check_surrounded_around(&mut self, idx: usize) {
        self.check_surrounded(idx);
        for dir in 0..DIRECTIONS {
            let neighbor = self.topology.neighbor(idx, dir);
            self.check_surrounded(neighbor);
        }
    }

    fn check_surrounded(&mut self, idx: usize) {
        let Some(id) = self.cells[idx].occupant else {
            return;
        };
        if self.adjacent_foes(idx, id) >= SURROUND_THRESHOLD {
            self.kill(id);
        }
    }

    /// Opposing ants next to the cell `idx` that `id` stands on
    pub fn adjacent_foes(&self, idx: usize, id: AntId) -> usize {
        let color = self.ants[id.index()].color;
        (0..DIRECTIONS)
            .filter_map(|dir| self.cells[self.topology.neighbor(idx, dir)].occupant)
            .filter(|other| self.ants[other.index()].color != color)
            .count()
    }

    fn kill(&mut self, id: AntId) {
        let ant = &mut self.ants[id.index()];
        ant.alive = false;
        let idx = ant.cell_idx;
        let color = ant.color;
        let carrying = ant.has_food;
        ant.has_food = false;

        let cell = &mut self.cells[idx];
        cell.occupant = None;
        let dropped = CORPSE_FOOD + u32::from(carrying);
        cell.food += dropped;
        self.food.add_to_cell(cell.hill, u64::from(dropped));
        if carrying {
            self.food.drop_carried(color);
        }

        tracing::debug!(
            ant = %id,
            color = %color,
            round = self.round,
            food = dropped,
            "Ant surrounded and killed"
        );
    }
}
