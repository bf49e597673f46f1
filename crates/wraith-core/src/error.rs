//! Error types shared by the AI and simulation crates.

use thiserror::Error;

/// A configuration value outside its allowed range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("detection radius must be greater than zero, got {0}")]
    NonPositiveRadius(f64),
    #[error("field of view must lie in [0, 180] degrees, got {0}")]
    FieldOfViewOutOfRange(f64),
}

/// Failure to construct a controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    #[error("no target entity was supplied; the controller cannot run without one")]
    MissingTarget,
    #[error("invalid agent configuration: {0}")]
    Config(#[from] ConfigError),
}
