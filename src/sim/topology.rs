//! Dense index space over a hex world
//!
//! World positions are converted to axial coordinates and laid out in a
//! row-major rectangle covering their bounding box, padded by one cell on
//! every side. In that layout each of the six hex directions is a constant
//! linear offset, so neighbour lookup is a single addition.

use std::collections::HashMap;

use crate::core::types::DIRECTIONS;
use crate::sim::SimError;
use crate::world::hex::{HexCoord, WorldPos, HEX_DELTAS};
use crate::world::World;

/// Cells of padding around the bounding box
const PADDING: i32 = 1;

/// Immutable layout shared by a simulation and all of its clones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    /// Axial coordinate of index 0
    min_u: i32,
    min_v: i32,
    width: usize,
    height: usize,
    offsets: [isize; DIRECTIONS],
    /// World positions in world order with their index
    positions: Vec<(WorldPos, usize)>,
}

impl Topology {
    pub fn build(world: &World) -> Result<Self, SimError> {
        let hexes: Vec<HexCoord> = world.iter().map(|c| HexCoord::from_world(c.pos)).collect();
        let (Some(min_u), Some(max_u), Some(min_v), Some(max_v)) = (
            hexes.iter().map(|h| h.u).min(),
            hexes.iter().map(|h| h.u).max(),
            hexes.iter().map(|h| h.v).min(),
            hexes.iter().map(|h| h.v).max(),
        ) else {
            return Err(SimError::EmptyWorld);
        };

        let min_u = min_u - PADDING;
        let min_v = min_v - PADDING;
        let width = (max_v - min_v + 1 + PADDING) as usize;
        let height = (max_u - min_u + 1 + PADDING) as usize;
        let stride = width as isize;
        let offsets = HEX_DELTAS.map(|(du, dv)| du as isize * stride + dv as isize);

        let mut seen = HashMap::with_capacity(hexes.len());
        let mut positions = Vec::with_capacity(hexes.len());
        for (cell, hex) in world.iter().zip(&hexes) {
            let idx = (hex.u - min_u) as usize * width + (hex.v - min_v) as usize;
            if seen.insert(idx, cell.pos).is_some() {
                return Err(SimError::DuplicatePosition {
                    x: cell.pos.x,
                    y: cell.pos.y,
                });
            }
            positions.push((cell.pos, idx));
        }

        Ok(Self {
            min_u,
            min_v,
            width,
            height,
            offsets,
            positions,
        })
    }

    /// Row stride of the index space
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of slots in the index space (world cells plus filler)
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear offsets for facings 0..5
    pub fn offsets(&self) -> &[isize; DIRECTIONS] {
        &self.offsets
    }

    /// Index of the cell next to `idx` in facing `dir`
    ///
    /// `idx` must be a world cell; padding guarantees the result is in range.
    #[inline]
    pub fn neighbor(&self, idx: usize, dir: usize) -> usize {
        idx.wrapping_add_signed(self.offsets[dir])
    }

    /// World positions with their indices, in world order
    pub fn positions(&self) -> &[(WorldPos, usize)] {
        &self.positions
    }

    pub fn index_of_hex(&self, hex: HexCoord) -> Option<usize> {
        let row = hex.u - self.min_u;
        let col = hex.v - self.min_v;
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    /// Index of a world position (whether or not it is part of the world)
    pub fn index_of(&self, pos: WorldPos) -> Option<usize> {
        self.index_of_hex(HexCoord::from_world(pos))
    }

    /// Axial coordinate of a slot
    pub fn hex_of(&self, idx: usize) -> HexCoord {
        HexCoord::new(
            self.min_u + (idx / self.width) as i32,
            self.min_v + (idx % self.width) as i32,
        )
    }

    pub fn world_pos_of(&self, idx: usize) -> WorldPos {
        self.hex_of(idx).to_world()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{parse_world, CellKind, PlacedCell};
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn clear_world(width: usize, height: usize) -> World {
        let mut cells = Vec::new();
        for y in 0..height {
            for x in 0..width {
                cells.push(PlacedCell {
                    pos: WorldPos::new(x as i32, y as i32),
                    kind: CellKind::Clear,
                });
            }
        }
        World::new(width, height, cells)
    }

    #[test]
    fn test_empty_world_rejected() {
        let world = World::new(0, 0, Vec::new());
        assert_eq!(Topology::build(&world), Err(SimError::EmptyWorld));
    }

    #[test]
    fn test_duplicate_position_rejected() {
        let cell = PlacedCell {
            pos: WorldPos::new(1, 1),
            kind: CellKind::Clear,
        };
        let world = World::new(2, 2, vec![cell, cell]);
        assert_eq!(
            Topology::build(&world),
            Err(SimError::DuplicatePosition { x: 1, y: 1 })
        );
    }

    #[test]
    fn test_positions_follow_world_order() {
        let world = parse_world("2\n2\n. #\n+ 3\n").unwrap();
        let topo = Topology::build(&world).unwrap();
        let order: Vec<WorldPos> = topo.positions().iter().map(|(p, _)| *p).collect();
        let expected: Vec<WorldPos> = world.iter().map(|c| c.pos).collect();
        assert_eq!(order, expected);
        for (pos, idx) in topo.positions() {
            assert_eq!(topo.world_pos_of(*idx), *pos);
            assert_eq!(topo.index_of(*pos), Some(*idx));
        }
    }

    #[test]
    fn test_offsets_match_stride() {
        let topo = Topology::build(&clear_world(4, 4)).unwrap();
        let w = topo.width() as isize;
        assert_eq!(topo.offsets(), &[1, w, w - 1, -1, -w, -w + 1]);
    }

    proptest! {
        #[test]
        fn prop_offsets_are_uniform(width in 1usize..12, height in 1usize..12) {
            let topo = Topology::build(&clear_world(width, height)).unwrap();
            for (pos, idx) in topo.positions() {
                let hex = HexCoord::from_world(*pos);
                for dir in 0..DIRECTIONS {
                    let n = topo.neighbor(*idx, dir);
                    prop_assert!(n < topo.len());
                    prop_assert_eq!(topo.hex_of(n), hex.neighbor(dir));
                }
            }
        }

        #[test]
        fn prop_indices_are_unique(width in 1usize..12, height in 1usize..12) {
            let topo = Topology::build(&clear_world(width, height)).unwrap();
            let mut indices: Vec<usize> = topo.positions().iter().map(|(_, i)| *i).collect();
            indices.sort_unstable();
            indices.dedup();
            prop_assert_eq!(indices.len(), width * height);
        }
    }
}
