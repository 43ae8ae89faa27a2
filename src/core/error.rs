use thiserror::Error;

use crate::brain::BrainError;
use crate::core::config::ConfigError;
use crate::sim::SimError;
use crate::world::WorldError;

#[derive(Error, Debug)]
pub enum AntWarError {
    #[error("Brain error: {0}")]
    Brain(#[from] BrainError),

    #[error("World error: {0}")]
    World(#[from] WorldError),

    #[error("Simulation error: {0}")]
    Sim(#[from] SimError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AntWarError>;
