//! Ant brains - the programs that drive every ant of one colour
//!
//! Brains are parsed from plain text (see [`parser`]) and are immutable
//! afterwards. A parsed brain only ever refers to states inside itself, so
//! the engine can index it without further checks.

pub mod instruction;
pub mod parser;

use std::ops::Index;
use std::path::Path;
use std::sync::Arc;

pub use instruction::{Condition, Instruction, Marker, SenseDir, State, TurnDir, MARKER_COUNT};
pub use parser::{parse_brain, parse_insn, BrainError, InsnError};

use crate::core::error::Result;

/// A validated, immutable instruction list
///
/// Cloning is cheap: the instructions are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brain {
    instructions: Arc<[Instruction]>,
}

impl Brain {
    /// Build a brain from already-parsed instructions, validating every
    /// state operand against the brain length.
    pub fn new(instructions: Vec<Instruction>) -> std::result::Result<Self, BrainError> {
        if instructions.is_empty() {
            return Err(BrainError::Empty);
        }
        if let Some((i, state)) = parser::first_out_of_range(&instructions) {
            return Err(BrainError::Line {
                line: i + 1,
                text: instructions[i].to_string(),
                source: InsnError::StateOutOfRange {
                    state,
                    len: instructions.len(),
                },
            });
        }
        Ok(Self::from_validated(instructions))
    }

    pub(crate) fn from_validated(instructions: Vec<Instruction>) -> Self {
        Self {
            instructions: instructions.into(),
        }
    }

    /// Read and parse a brain file
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(parse_brain(&source)?)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Always `false` for a constructed brain
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Render back to source text, one instruction per line
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        for insn in self.instructions.iter() {
            out.push_str(&insn.to_string());
            out.push('\n');
        }
        out
    }
}

impl Index<State> for Brain {
    type Output = Instruction;

    fn index(&self, state: State) -> &Instruction {
        &self.instructions[state]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(Brain::new(Vec::new()), Err(BrainError::Empty));
    }

    #[test]
    fn test_new_rejects_dangling_state() {
        let err = Brain::new(vec![Instruction::Move { on_success: 0, on_blocked: 4 }]).unwrap_err();
        assert_eq!(
            err.insn_error(),
            Some(&InsnError::StateOutOfRange { state: 4, len: 1 })
        );
    }

    #[test]
    fn test_clone_shares_instructions() {
        let brain = parse_brain("turn left 0").unwrap();
        let copy = brain.clone();
        assert!(Arc::ptr_eq(&brain.instructions, &copy.instructions));
    }

    #[test]
    fn test_source_reparses_to_same_brain() {
        let text = "Sense Ahead 1 3 Food ; look\nMove 2 0\nPickUp 0 0\nFlip 2 0 1\n";
        let brain = parse_brain(text).unwrap();
        assert_eq!(parse_brain(&brain.to_source()).unwrap(), brain);
    }

    #[test]
    fn test_index() {
        let brain = parse_brain("drop 1\nturn right 0").unwrap();
        assert_eq!(brain[1], Instruction::Turn { dir: TurnDir::Right, next: 0 });
    }
}
