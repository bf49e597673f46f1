//! Errors raised while building or loading a simulation.

use std::path::PathBuf;

use thiserror::Error;

use wraith_core::error::ControllerError;

/// A scenario description that cannot be used.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed scenario: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("agent tag {0} is used more than once")]
    DuplicateAgent(u32),
    #[error("obstacle {index} has a non-positive size")]
    DegenerateObstacle { index: usize },
    #[error("agent {tag}: trigger radius must be positive, got {radius}")]
    InvalidTrigger { tag: u32, radius: f64 },
    #[error("target path speed must be a non-negative number, got {0}")]
    InvalidPathSpeed(f64),
    #[error("obstacle {index} is on layer {layer}, past the last layer")]
    InvalidLayer { index: usize, layer: u32 },
    #[error("{field} is not a finite number")]
    NotFinite { field: String },
}

/// Failure to bring a scenario into the running simulation.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error("agent {tag} could not be built: {source}")]
    Agent {
        tag: u32,
        source: ControllerError,
    },
}
