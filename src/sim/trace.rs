//! Golden trace output
//!
//! The trace is the debug dump of every round from 0 through `rounds`,
//! in the format of the contest's published `dump.all` reference:
//!
//! ```text
//! random seed: 12345
//!
//! After round 0...
//! cell (0, 0): rock
//! ...
//!
//! After round 1...
//! ```

use std::io::{self, Write};

use crate::core::types::Round;
use crate::sim::Sim;

/// Write the trace of rounds `0..=rounds`, stepping `sim` in between
///
/// `sim` is expected to be freshly built; round numbers are taken from it.
pub fn write_trace<W: Write>(sim: &mut Sim, rounds: Round, out: &mut W) -> io::Result<()> {
    writeln!(out, "random seed: {}", sim.seed())?;
    writeln!(out)?;
    for k in 0..=rounds {
        if k > 0 {
            sim.step();
        }
        writeln!(out, "After round {}...", sim.round())?;
        for line in sim.dump_lines() {
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::parse_brain;
    use crate::world::parse_world;

    #[test]
    fn test_trace_layout() {
        let world = parse_world("2\n1\n+ .\n").unwrap();
        let brain = parse_brain("move 1 1\nturn left 1").unwrap();
        let mut sim = Sim::new(&world, brain.clone(), brain, 42).unwrap();

        let mut out = Vec::new();
        write_trace(&mut sim, 1, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = [
            "random seed: 42",
            "",
            "After round 0...",
            "cell (0, 0): red hill; red ant of id 0, dir 0, food 0, state 0, resting 0",
            "cell (1, 0): ",
            "",
            "After round 1...",
            "cell (0, 0): red hill; ",
            "cell (1, 0): red ant of id 0, dir 0, food 0, state 1, resting 14",
            "",
        ]
        .map(|line| format!("{line}\n"))
        .concat();
        assert_eq!(text, expected);
        assert_eq!(sim.round(), 1);
    }
}
