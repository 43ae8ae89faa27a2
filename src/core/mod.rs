pub mod config;
pub mod error;
pub mod types;

pub use types::{AntId, Color, PerColor, Round};
