//! Load ant worlds from the plain-text map format
//!
//! ```text
//! 4
//! 3
//! # # # #
//!  # + 5 #
//! # # # #
//! ```
//! Line 1 is the width, line 2 the height, then one row per line with
//! `width` whitespace-separated single-character cells.

use std::path::Path;
use thiserror::Error;

use crate::core::error::Result;
use crate::world::hex::WorldPos;
use crate::world::{CellKind, PlacedCell, World};

/// Errors that can occur when loading a world
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("missing {0} line")]
    MissingDimension(&'static str),
    #[error("invalid {name}: {value:?}")]
    InvalidDimension { name: &'static str, value: String },
    #[error("world must have at least one cell")]
    Empty,
    #[error("missing row {row}")]
    MissingRow { row: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("more than {expected} rows")]
    ExtraRows { expected: usize },
    #[error("Invalid character: {ch} (row {row}, column {col})")]
    InvalidCell { ch: String, row: usize, col: usize },
}

/// Parse world text into positioned cells, row by row
pub fn parse_world(text: &str) -> std::result::Result<World, WorldError> {
    let mut lines = text.trim().lines();
    let width = parse_dimension(lines.next(), "width")?;
    let height = parse_dimension(lines.next(), "height")?;
    if width == 0 || height == 0 {
        return Err(WorldError::Empty);
    }

    let mut cells = Vec::with_capacity(width * height);
    for row in 0..height {
        let line = lines.next().ok_or(WorldError::MissingRow { row })?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != width {
            return Err(WorldError::RowLength {
                row,
                expected: width,
                found: tokens.len(),
            });
        }
        for (col, token) in tokens.into_iter().enumerate() {
            let kind = parse_cell(token).ok_or_else(|| WorldError::InvalidCell {
                ch: token.to_string(),
                row,
                col,
            })?;
            cells.push(PlacedCell {
                pos: WorldPos::new(col as i32, row as i32),
                kind,
            });
        }
    }
    if lines.any(|line| !line.trim().is_empty()) {
        return Err(WorldError::ExtraRows { expected: height });
    }

    Ok(World::new(width, height, cells))
}

/// Read and parse a world file
pub fn load_world(path: &Path) -> Result<World> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_world(&text)?)
}

fn parse_dimension(line: Option<&str>, name: &'static str) -> std::result::Result<usize, WorldError> {
    let line = line.ok_or(WorldError::MissingDimension(name))?.trim();
    line.parse().map_err(|_| WorldError::InvalidDimension {
        name,
        value: line.to_string(),
    })
}

fn parse_cell(token: &str) -> Option<CellKind> {
    match token.as_bytes() {
        [b'#'] => Some(CellKind::Rock),
        [b'.'] => Some(CellKind::Clear),
        [b'+'] => Some(CellKind::RedHill),
        [b'-'] => Some(CellKind::BlackHill),
        [digit @ b'1'..=b'9'] => Some(CellKind::Food(u32::from(digit - b'0'))),
        _ => None,
    }
}
