//! Ant War - deterministic two-colony ant simulation
//!
//! Two colonies of ants, each driven by a small state-machine program (a
//! "brain"), forage for food on a hexagonal world. The colony with more
//! food on its anthills at the end wins.

pub mod brain;
pub mod core;
pub mod sim;
pub mod tournament;
pub mod world;
