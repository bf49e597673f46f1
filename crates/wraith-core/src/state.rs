//! Simulation snapshot: the complete visible state after each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::AgentState;
use crate::events::SimEvent;
use crate::types::SimTime;

/// State broadcast to the host after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub paused: bool,
    pub agents: Vec<AgentView>,
    pub target: TargetView,
    /// Events raised during this tick.
    pub events: Vec<SimEvent>,
    /// Latched once any agent has caught the target.
    pub target_caught: bool,
}

/// One agent as seen from outside.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentView {
    pub agent: u32,
    pub position: DVec3,
    pub forward: DVec3,
    pub state: AgentState,
    pub waypoint_index: usize,
    pub wait_timer: f64,
    /// Animation hint: the agent moved this tick.
    pub walking: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetView {
    pub position: DVec3,
    pub velocity: DVec3,
}
