//! Hex coordinate system for ant worlds (axial coordinates)
//!
//! World files address cells by offset `(x, y)` = (column, row), with odd
//! rows shifted half a cell to the right. The engine works in axial
//! `(u, v)` coordinates where all six neighbours are constant deltas.
//!
//! Layout of the first rows, as `(u, v)`:
//! ```text
//!  (0, 0) (0, 1) (0, 2)
//!     (1, 0) (1, 1) (1, 2)
//!  (2,-1) (2, 0) (2, 1)
//! ```

use serde::{Deserialize, Serialize};

use crate::core::types::DIRECTIONS;

/// Offset position of a cell in a world file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPos {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl WorldPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axial hex coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexCoord {
    pub u: i32,
    pub v: i32,
}

/// Axial deltas for facings 0..5: E, SE, SW, W, NW, NE
pub const HEX_DELTAS: [(i32, i32); DIRECTIONS] = [
    (0, 1),  // E
    (1, 0),  // SE
    (1, -1), // SW
    (0, -1), // W
    (-1, 0), // NW
    (-1, 1), // NE
];

impl HexCoord {
    pub fn new(u: i32, v: i32) -> Self {
        Self { u, v }
    }

    /// Implicit third axial component
    pub fn w(&self) -> i32 {
        -self.u - self.v
    }

    pub fn from_world(pos: WorldPos) -> Self {
        Self {
            u: pos.y,
            v: pos.x - pos.y.div_euclid(2),
        }
    }

    pub fn to_world(self) -> WorldPos {
        WorldPos {
            x: self.v + self.u.div_euclid(2),
            y: self.u,
        }
    }

    /// Neighbour in facing `dir` (0..5)
    pub fn neighbor(&self, dir: usize) -> HexCoord {
        let (du, dv) = HEX_DELTAS[dir];
        HexCoord::new(self.u + du, self.v + dv)
    }

    /// All 6 neighbouring coordinates, in facing order
    pub fn neighbors(&self) -> [HexCoord; DIRECTIONS] {
        std::array::from_fn(|dir| self.neighbor(dir))
    }

    /// Step distance in hex space
    pub fn distance(&self, other: &Self) -> u32 {
        let du = (self.u - other.u).abs();
        let dv = (self.v - other.v).abs();
        let dw = (self.w() - other.w()).abs();
        ((du + dv + dw) / 2) as u32
    }
}
