//! Simulation host for WRAITH.
//!
//! Owns the hecs ECS world, runs agent controllers against it at a fixed
//! tick rate, and produces `SimSnapshot`s for the host.

pub mod components;
pub mod engine;
pub mod error;
pub mod nav;
pub mod scenario;
pub mod sight;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use error::{ScenarioError, SimError};
pub use scenario::Scenario;
pub use wraith_core as core;

#[cfg(test)]
mod tests;
