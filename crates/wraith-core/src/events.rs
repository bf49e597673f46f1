//! Notifications emitted by agents for game-level logic.

use serde::{Deserialize, Serialize};

use crate::enums::AgentState;

/// Emitted by a controller during `update`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AgentEvent {
    /// The active behavior changed.
    StateChanged { from: AgentState, to: AgentState },
    /// The target came within kill distance while chasing.
    TargetCaught { distance: f64 },
}

/// An agent event stamped by the simulation host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimEvent {
    pub tick: u64,
    /// Agent tag from the scenario.
    pub agent: u32,
    pub event: AgentEvent,
}
