//! Ant worlds: the static map a match is played on

pub mod hex;
pub mod loader;

pub use hex::{HexCoord, WorldPos};
pub use loader::{load_world, parse_world, WorldError};

use serde::{Deserialize, Serialize};

use crate::core::types::Color;

/// Initial content of a world cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Rock,
    Clear,
    /// Red anthill; spawns one red ant
    RedHill,
    /// Black anthill; spawns one black ant
    BlackHill,
    /// Clear cell holding 1-9 food
    Food(u32),
}

impl CellKind {
    /// Owner of the anthill on this cell, if any
    pub fn hill(self) -> Option<Color> {
        match self {
            CellKind::RedHill => Some(Color::Red),
            CellKind::BlackHill => Some(Color::Black),
            CellKind::Rock | CellKind::Clear | CellKind::Food(_) => None,
        }
    }
}

/// A world cell together with its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedCell {
    pub pos: WorldPos,
    pub kind: CellKind,
}

/// A loaded world: every grid position with its initial content
///
/// Cells are kept in file order (row-major), which is also the order of
/// debug dumps and of ant ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    width: usize,
    height: usize,
    cells: Vec<PlacedCell>,
}

impl World {
    pub fn new(width: usize, height: usize, cells: Vec<PlacedCell>) -> Self {
        Self { width, height, cells }
    }

    /// Width declared by the world file
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height declared by the world file
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedCell> {
        self.cells.iter()
    }

    pub fn cells(&self) -> &[PlacedCell] {
        &self.cells
    }

    /// Content at `pos`, if it is part of the world
    pub fn get(&self, pos: WorldPos) -> Option<CellKind> {
        self.cells.iter().find(|c| c.pos == pos).map(|c| c.kind)
    }

    /// Total food lying on the map
    pub fn total_food(&self) -> u64 {
        self.cells
            .iter()
            .map(|c| match c.kind {
                CellKind::Food(n) => u64::from(n),
                _ => 0,
            })
            .sum()
    }

    /// Number of anthill cells of `color` (= ants it starts with)
    pub fn hill_count(&self, color: Color) -> usize {
        self.cells.iter().filter(|c| c.kind.hill() == Some(color)).count()
    }
}
