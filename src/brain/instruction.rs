//! Instruction set of the ant brain language
//!
//! A brain is a finite state machine: every instruction names the state(s)
//! the ant moves to once it has executed. States are indices into the
//! brain's instruction list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of an instruction within a brain
pub type State = usize;

/// Number of distinct markers per colour
pub const MARKER_COUNT: u8 = 6;

/// Which cell a `Sense` instruction looks at, relative to the ant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SenseDir {
    Here,
    Ahead,
    LeftAhead,
    RightAhead,
}

impl SenseDir {
    fn keyword(self) -> &'static str {
        match self {
            SenseDir::Here => "here",
            SenseDir::Ahead => "ahead",
            SenseDir::LeftAhead => "leftahead",
            SenseDir::RightAhead => "rightahead",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnDir {
    Left,
    Right,
}

impl TurnDir {
    /// Amount added to the facing (mod 6) when turning this way
    pub fn facing_delta(self) -> u8 {
        match self {
            TurnDir::Left => 5,
            TurnDir::Right => 1,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            TurnDir::Left => "left",
            TurnDir::Right => "right",
        }
    }
}

/// One of the six per-colour marker bits of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Marker(u8);

impl Marker {
    /// Returns `None` unless `index < 6`
    pub fn new(index: u8) -> Option<Self> {
        (index < MARKER_COUNT).then_some(Self(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Bit of this marker within a 6-bit marker mask
    pub fn bit(self) -> u8 {
        1 << self.0
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Condition tested by a `Sense` instruction
///
/// Friend/foe and home/foe-home are always relative to the colour of the
/// sensing ant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Friend,
    Foe,
    FriendWithFood,
    FoeWithFood,
    Food,
    Rock,
    Marker(Marker),
    FoeMarker,
    Home,
    FoeHome,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Friend => f.write_str("friend"),
            Condition::Foe => f.write_str("foe"),
            Condition::FriendWithFood => f.write_str("friendwithfood"),
            Condition::FoeWithFood => f.write_str("foewithfood"),
            Condition::Food => f.write_str("food"),
            Condition::Rock => f.write_str("rock"),
            Condition::Marker(marker) => write!(f, "marker {marker}"),
            Condition::FoeMarker => f.write_str("foemarker"),
            Condition::Home => f.write_str("home"),
            Condition::FoeHome => f.write_str("foehome"),
        }
    }
}

/// A single brain instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    Sense {
        dir: SenseDir,
        on_true: State,
        on_false: State,
        cond: Condition,
    },
    Mark {
        marker: Marker,
        next: State,
    },
    Unmark {
        marker: Marker,
        next: State,
    },
    PickUp {
        on_success: State,
        on_fail: State,
    },
    Drop {
        next: State,
    },
    Turn {
        dir: TurnDir,
        next: State,
    },
    Move {
        on_success: State,
        on_blocked: State,
    },
    /// Random branch: `on_zero` with probability `1/p`
    Flip {
        p: u32,
        on_zero: State,
        on_other: State,
    },
}

impl Instruction {
    /// Every state this instruction can transition to
    pub fn successors(&self) -> Vec<State> {
        match *self {
            Instruction::Sense { on_true, on_false, .. } => vec![on_true, on_false],
            Instruction::Mark { next, .. }
            | Instruction::Unmark { next, .. }
            | Instruction::Drop { next }
            | Instruction::Turn { next, .. } => vec![next],
            Instruction::PickUp { on_success, on_fail } => vec![on_success, on_fail],
            Instruction::Move { on_success, on_blocked } => vec![on_success, on_blocked],
            Instruction::Flip { on_zero, on_other, .. } => vec![on_zero, on_other],
        }
    }
}

/// Canonical source form; parsing it yields the same instruction.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Sense { dir, on_true, on_false, cond } => {
                write!(f, "sense {} {on_true} {on_false} {cond}", dir.keyword())
            }
            Instruction::Mark { marker, next } => write!(f, "mark {marker} {next}"),
            Instruction::Unmark { marker, next } => write!(f, "unmark {marker} {next}"),
            Instruction::PickUp { on_success, on_fail } => write!(f, "pickup {on_success} {on_fail}"),
            Instruction::Drop { next } => write!(f, "drop {next}"),
            Instruction::Turn { dir, next } => write!(f, "turn {} {next}", dir.keyword()),
            Instruction::Move { on_success, on_blocked } => write!(f, "move {on_success} {on_blocked}"),
            Instruction::Flip { p, on_zero, on_other } => write!(f, "flip {p} {on_zero} {on_other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_range() {
        assert!(Marker::new(0).is_some());
        assert!(Marker::new(5).is_some());
        assert!(Marker::new(6).is_none());
    }

    #[test]
    fn test_marker_bit() {
        assert_eq!(Marker::new(0).unwrap().bit(), 0b000001);
        assert_eq!(Marker::new(5).unwrap().bit(), 0b100000);
    }

    #[test]
    fn test_turn_delta_wraps_left() {
        assert_eq!((0 + TurnDir::Left.facing_delta()) % 6, 5);
        assert_eq!((5 + TurnDir::Right.facing_delta()) % 6, 0);
    }

    #[test]
    fn test_successors() {
        let insn = Instruction::Sense {
            dir: SenseDir::Ahead,
            on_true: 3,
            on_false: 7,
            cond: Condition::Food,
        };
        assert_eq!(insn.successors(), vec![3, 7]);
        assert_eq!(Instruction::Drop { next: 2 }.successors(), vec![2]);
    }

    #[test]
    fn test_display_is_source_form() {
        let insn = Instruction::Sense {
            dir: SenseDir::LeftAhead,
            on_true: 1,
            on_false: 2,
            cond: Condition::Marker(Marker::new(4).unwrap()),
        };
        assert_eq!(insn.to_string(), "sense leftahead 1 2 marker 4");
        let flip = Instruction::Flip { p: 3, on_zero: 0, on_other: 9 };
        assert_eq!(flip.to_string(), "flip 3 0 9");
    }
}
