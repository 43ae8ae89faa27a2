//! Brain loading integration tests
//!
//! Exercises the bundled brains and the file-level error path.

use std::path::Path;

use ant_war::brain::{parse_brain, Brain, BrainError, Condition, InsnError, Instruction, SenseDir};
use ant_war::core::error::AntWarError;

#[test]
fn test_bundled_brains_parse() {
    for name in ["forager", "drifter"] {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(format!("data/brains/{name}.ant"));
        let brain = Brain::load(&path).unwrap_or_else(|e| panic!("{name}: {e}"));
        assert!(!brain.is_empty());
    }
}

#[test]
fn test_forager_first_instruction() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/brains/forager.ant");
    let brain = Brain::load(&path).unwrap();
    assert_eq!(brain.len(), 17);
    assert_eq!(
        brain[0],
        Instruction::Sense {
            dir: SenseDir::Ahead,
            on_true: 1,
            on_false: 3,
            cond: Condition::Food,
        }
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Brain::load(Path::new("no/such/brain.ant")).unwrap_err();
    assert!(matches!(err, AntWarError::IoError(_)));
}

#[test]
fn test_error_message_names_line() {
    let err = parse_brain("move 1 0\nmarch 0 0\n").unwrap_err();
    assert_eq!(err.to_string(), "line 2: \"march 0 0\"\nunrecognized instruction");
    assert_eq!(err.insn_error(), Some(&InsnError::UnknownInstruction));
}

#[test]
fn test_error_wraps_into_crate_error() {
    let err: AntWarError = parse_brain("move 0 0 0").unwrap_err().into();
    assert!(matches!(
        err,
        AntWarError::Brain(BrainError::Line { line: 1, source: InsnError::ExtraTokens, .. })
    ));
    assert!(err.to_string().starts_with("Brain error: line 1"));
}

#[test]
fn test_brains_are_shared_between_clones() {
    let brain = parse_brain("sense here 0 0 home").unwrap();
    let copy = brain.clone();
    assert_eq!(copy, brain);
    assert_eq!(copy.to_source(), "sense here 0 0 home\n");
}
