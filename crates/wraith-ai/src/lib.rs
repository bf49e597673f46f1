//! Agent AI for WRAITH.
//!
//! Implements the perception-driven patrol/chase controller: sight checks,
//! the state machine with loss-timeout hysteresis, per-state behaviors and
//! archetype tuning presets.

mod chase;
pub mod controller;
pub mod fsm;
pub mod kinematics;
mod patrol;
pub mod perception;
pub mod profiles;

pub use controller::{Agent, ControllerBuilder, PerceptionChaseController, TickInputs};
pub use perception::{detect, detect_report, TargetPose};
pub use wraith_core as core;
