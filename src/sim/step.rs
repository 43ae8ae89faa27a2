//! One round of the simulation
//!
//! Ants act in id order. Each ant's instruction, including any surround
//! checks it triggers, completes before the next ant acts.

use crate::brain::{Condition, Instruction, SenseDir, State};
use crate::core::types::{AntId, Color, DIRECTIONS};
use crate::sim::{Sim, MOVE_REST};

impl Sim {
    /// Advance the world by exactly one round
    pub fn step(&mut self) {
        for idx in 0..self.ants.len() {
            self.step_ant(AntId(idx));
        }
        self.round += 1;
    }

    fn step_ant(&mut self, id: AntId) {
        let ant = &mut self.ants[id.index()];
        if !ant.alive {
            return;
        }
        if ant.resting > 0 {
            ant.resting -= 1;
            return;
        }
        let insn = self.brains.get(ant.color)[ant.state];
        let next = self.execute(id, insn);
        self.ants[id.index()].state = next;
    }

    /// Run one instruction for a live, non-resting ant; returns its next state
    fn execute(&mut self, id: AntId, insn: Instruction) -> State {
        let ant = self.ants[id.index()];
        let here = ant.cell_idx;

        match insn {
            Instruction::Sense { dir, on_true, on_false, cond } => {
                let target = self.sensed_cell(here, ant.facing, dir);
                if self.holds(target, ant.color, cond) {
                    on_true
                } else {
                    on_false
                }
            }
            Instruction::Mark { marker, next } => {
                *self.cells[here].markers.get_mut(ant.color) |= marker.bit();
                next
            }
            Instruction::Unmark { marker, next } => {
                *self.cells[here].markers.get_mut(ant.color) &= !marker.bit();
                next
            }
            Instruction::PickUp { on_success, on_fail } => {
                let cell = &mut self.cells[here];
                if ant.has_food || cell.food == 0 {
                    return on_fail;
                }
                cell.food -= 1;
                self.food.pick_up(ant.color, cell.hill);
                self.ants[id.index()].has_food = true;
                on_success
            }
            Instruction::Drop { next } => {
                if ant.has_food {
                    let cell = &mut self.cells[here];
                    cell.food += 1;
                    self.food.put_down(ant.color, cell.hill);
                    self.ants[id.index()].has_food = false;
                }
                next
            }
            Instruction::Turn { dir, next } => {
                self.ants[id.index()].facing = (ant.facing + dir.facing_delta()) % DIRECTIONS as u8;
                next
            }
            Instruction::Move { on_success, on_blocked } => {
                let target = self.topology.neighbor(here, usize::from(ant.facing));
                let dest = &self.cells[target];
                if dest.is_rock || dest.occupant.is_some() {
                    return on_blocked;
                }
                self.cells[here].occupant = None;
                self.cells[target].occupant = Some(id);
                let moved = &mut self.ants[id.index()];
                moved.cell_idx = target;
                moved.resting = MOVE_REST;
                self.check_surrounded_around(target);
                on_success
            }
            Instruction::Flip { p, on_zero, on_other } => {
                if self.rng.random_int(p) == 0 {
                    on_zero
                } else {
                    on_other
                }
            }
        }
    }

    fn sensed_cell(&self, here: usize, facing: u8, dir: SenseDir) -> usize {
        let facing = usize::from(facing);
        match dir {
            SenseDir::Here => here,
            SenseDir::Ahead => self.topology.neighbor(here, facing),
            SenseDir::LeftAhead => self.topology.neighbor(here, (facing + 5) % DIRECTIONS),
            SenseDir::RightAhead => self.topology.neighbor(here, (facing + 1) % DIRECTIONS),
        }
    }

    /// Evaluate `cond` on cell `idx` from the point of view of `color`
    fn holds(&self, idx: usize, color: Color, cond: Condition) -> bool {
        let cell = &self.cells[idx];
        let occupant = cell.occupant.map(|id| &self.ants[id.index()]);
        match cond {
            Condition::Friend => occupant.is_some_and(|a| a.color == color),
            Condition::Foe => occupant.is_some_and(|a| a.color != color),
            Condition::FriendWithFood => occupant.is_some_and(|a| a.color == color && a.has_food),
            Condition::FoeWithFood => occupant.is_some_and(|a| a.color != color && a.has_food),
            Condition::Food => cell.food > 0,
            Condition::Rock => cell.is_rock,
            Condition::Marker(marker) => cell.markers.get(color) & marker.bit() != 0,
            Condition::FoeMarker => *cell.markers.get(color.opponent()) != 0,
            Condition::Home => cell.hill == Some(color),
            Condition::FoeHome => cell.hill.is_some_and(|owner| owner != color),
        }
    }
}
