use super::config::ConfigError;
use crate::core::lattice::LatticeError;
use crate::core::models::population::PopulationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Lattice error: {0}")]
    Lattice(#[from] LatticeError),

    #[error("Population error: {0}")]
    Population(#[from] PopulationError),

    #[error("Target size {target} is outside the valid range 1..={capacity}")]
    InvalidTargetSize { target: usize, capacity: usize },

    #[error("Growth requires an empty population, found {occupants} occupant(s)")]
    PopulationNotEmpty { occupants: usize },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
