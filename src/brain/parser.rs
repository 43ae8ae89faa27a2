//! Parse brain source text into validated instructions
//!
//! One instruction per line. Tokens are case-insensitive and whitespace
//! separated; everything after `;` is a comment. The first bad line aborts
//! the whole parse: a brain is either complete and valid or not produced.

use nom::character::complete::{char, digit0, digit1, one_of};
use nom::combinator::{all_consuming, opt, recognize};
use nom::sequence::{pair, preceded};
use nom::{IResult, Parser};
use thiserror::Error;

use crate::brain::instruction::{Condition, Instruction, Marker, SenseDir, State, TurnDir};
use crate::brain::Brain;

/// Why a single line failed to parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsnError {
    #[error("empty line")]
    EmptyLine,
    #[error("unrecognized instruction")]
    UnknownInstruction,
    #[error("missing sense direction")]
    MissingSenseDir,
    #[error("unrecognized sense direction")]
    UnknownSenseDir,
    #[error("missing marker number")]
    MissingMarker,
    #[error("invalid marker number")]
    InvalidMarker,
    #[error("missing condition")]
    MissingCondition,
    #[error("unrecognized condition")]
    UnknownCondition,
    #[error("missing turn direction")]
    MissingTurnDir,
    #[error("unrecognized turn direction")]
    UnknownTurnDir,
    #[error("missing state number")]
    MissingState,
    #[error("invalid state number")]
    InvalidState,
    #[error("state number must be an integer")]
    FractionalState,
    #[error("state number must not be negative")]
    NegativeState,
    #[error("missing p")]
    MissingP,
    #[error("invalid p")]
    InvalidP,
    #[error("p must be an integer")]
    FractionalP,
    #[error("p must be positive")]
    NonPositiveP,
    #[error("extra tokens at end of line")]
    ExtraTokens,
    #[error("state {state} is out of range for a brain of {len} instructions")]
    StateOutOfRange { state: State, len: usize },
}

/// A failed brain parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrainError {
    /// `line` is 1-based; `text` is the raw source line
    #[error("line {line}: {text:?}\n{source}")]
    Line {
        line: usize,
        text: String,
        source: InsnError,
    },
    #[error("brain has no instructions")]
    Empty,
}

impl BrainError {
    /// The underlying per-line error, if any
    pub fn insn_error(&self) -> Option<&InsnError> {
        match self {
            BrainError::Line { source, .. } => Some(source),
            BrainError::Empty => None,
        }
    }
}

/// Parse a whole brain.
///
/// Trailing whitespace of the text is ignored; every other line, blank
/// ones included, must hold exactly one instruction. After all lines
/// parse, every state operand is checked against the brain length.
pub fn parse_brain(source: &str) -> Result<Brain, BrainError> {
    let lines: Vec<&str> = source.trim_end().split('\n').collect();

    let mut instructions = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        let insn = parse_insn(line).map_err(|source| BrainError::Line {
            line: i + 1,
            text: line.to_string(),
            source,
        })?;
        instructions.push(insn);
    }

    if let Some((i, state)) = first_out_of_range(&instructions) {
        return Err(BrainError::Line {
            line: i + 1,
            text: lines[i].to_string(),
            source: InsnError::StateOutOfRange {
                state,
                len: instructions.len(),
            },
        });
    }

    Ok(Brain::from_validated(instructions))
}

/// Find the first instruction that jumps outside the brain
pub(crate) fn first_out_of_range(instructions: &[Instruction]) -> Option<(usize, State)> {
    let len = instructions.len();
    instructions.iter().enumerate().find_map(|(i, insn)| {
        insn.successors()
            .into_iter()
            .find(|&state| state >= len)
            .map(|state| (i, state))
    })
}

/// Parse a single line of brain source
pub fn parse_insn(line: &str) -> Result<Instruction, InsnError> {
    let code = line.split(';').next().unwrap_or("").to_lowercase();
    let mut tokens = code.split_whitespace();

    let insn = match tokens.next() {
        None => return Err(InsnError::EmptyLine),
        Some("sense") => {
            let dir = parse_sense_dir(&mut tokens)?;
            let on_true = parse_state(&mut tokens)?;
            let on_false = parse_state(&mut tokens)?;
            let cond = parse_condition(&mut tokens)?;
            Instruction::Sense { dir, on_true, on_false, cond }
        }
        Some("mark") => {
            let marker = parse_marker(&mut tokens)?;
            let next = parse_state(&mut tokens)?;
            Instruction::Mark { marker, next }
        }
        Some("unmark") => {
            let marker = parse_marker(&mut tokens)?;
            let next = parse_state(&mut tokens)?;
            Instruction::Unmark { marker, next }
        }
        Some("pickup") => {
            let on_success = parse_state(&mut tokens)?;
            let on_fail = parse_state(&mut tokens)?;
            Instruction::PickUp { on_success, on_fail }
        }
        Some("drop") => {
            let next = parse_state(&mut tokens)?;
            Instruction::Drop { next }
        }
        Some("turn") => {
            let dir = match tokens.next() {
                None => return Err(InsnError::MissingTurnDir),
                Some("left") => TurnDir::Left,
                Some("right") => TurnDir::Right,
                Some(_) => return Err(InsnError::UnknownTurnDir),
            };
            let next = parse_state(&mut tokens)?;
            Instruction::Turn { dir, next }
        }
        Some("move") => {
            let on_success = parse_state(&mut tokens)?;
            let on_blocked = parse_state(&mut tokens)?;
            Instruction::Move { on_success, on_blocked }
        }
        Some("flip") => {
            let p = parse_p(&mut tokens)?;
            let on_zero = parse_state(&mut tokens)?;
            let on_other = parse_state(&mut tokens)?;
            Instruction::Flip { p, on_zero, on_other }
        }
        Some(_) => return Err(InsnError::UnknownInstruction),
    };

    if tokens.next().is_some() {
        return Err(InsnError::ExtraTokens);
    }
    Ok(insn)
}

fn parse_sense_dir<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<SenseDir, InsnError> {
    match tokens.next() {
        None => Err(InsnError::MissingSenseDir),
        Some("here") => Ok(SenseDir::Here),
        Some("ahead") => Ok(SenseDir::Ahead),
        Some("leftahead") => Ok(SenseDir::LeftAhead),
        Some("rightahead") => Ok(SenseDir::RightAhead),
        Some(_) => Err(InsnError::UnknownSenseDir),
    }
}

fn parse_marker<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<Marker, InsnError> {
    let token = tokens.next().ok_or(InsnError::MissingMarker)?;
    // Exactly one digit: "05" or "+1" are not marker numbers.
    match token.as_bytes() {
        [digit @ b'0'..=b'9'] => Marker::new(digit - b'0').ok_or(InsnError::InvalidMarker),
        _ => Err(InsnError::InvalidMarker),
    }
}

fn parse_condition<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<Condition, InsnError> {
    match tokens.next() {
        None => Err(InsnError::MissingCondition),
        Some("friend") => Ok(Condition::Friend),
        Some("foe") => Ok(Condition::Foe),
        Some("friendwithfood") => Ok(Condition::FriendWithFood),
        Some("foewithfood") => Ok(Condition::FoeWithFood),
        Some("food") => Ok(Condition::Food),
        Some("rock") => Ok(Condition::Rock),
        Some("home") => Ok(Condition::Home),
        Some("foehome") => Ok(Condition::FoeHome),
        Some("foemarker") => Ok(Condition::FoeMarker),
        Some("marker") => Ok(Condition::Marker(parse_marker(tokens)?)),
        Some(_) => Err(InsnError::UnknownCondition),
    }
}

fn parse_state<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<State, InsnError> {
    let token = tokens.next().ok_or(InsnError::MissingState)?;
    let literal = decimal_literal(token).ok_or(InsnError::InvalidState)?;
    if literal.fractional {
        return Err(InsnError::FractionalState);
    }
    if literal.value < 0 {
        return Err(InsnError::NegativeState);
    }
    State::try_from(literal.value).map_err(|_| InsnError::InvalidState)
}

fn parse_p<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<u32, InsnError> {
    let token = tokens.next().ok_or(InsnError::MissingP)?;
    let literal = decimal_literal(token).ok_or(InsnError::InvalidP)?;
    if literal.fractional {
        return Err(InsnError::FractionalP);
    }
    if literal.value <= 0 {
        return Err(InsnError::NonPositiveP);
    }
    u32::try_from(literal.value).map_err(|_| InsnError::InvalidP)
}

/// A numeric token: `[+-]digits[.digits]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DecimalLiteral {
    value: i64,
    /// The literal had a non-zero fractional part
    fractional: bool,
}

fn decimal_parts(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    (
        recognize(pair(opt(one_of("+-")), digit1)),
        opt(preceded(char('.'), digit0)),
    )
        .parse(input)
}

/// Parse a whole token as a decimal literal; `None` if the token is not one
/// or its integer part does not fit in an `i64`.
fn decimal_literal(token: &str) -> Option<DecimalLiteral> {
    let (_, (whole, fraction)) = all_consuming(decimal_parts).parse(token).ok()?;
    let value = whole.parse::<i64>().ok()?;
    let fractional = fraction.is_some_and(|digits| digits.bytes().any(|b| b != b'0'));
    Some(DecimalLiteral { value, fractional })
}
