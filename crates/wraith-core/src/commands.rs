//! Commands sent from the host game to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// All possible host actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Teleport the target.
    SetTargetPosition { position: DVec3 },
    /// Move the target at a constant velocity (m/s), replacing any scripted path.
    SetTargetVelocity { velocity: DVec3 },
    /// The target touched an agent's trigger volume this tick.
    TriggerEnter { agent: u32 },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
