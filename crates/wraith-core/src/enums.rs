//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Behavior state of an agent. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentState {
    /// Cycling through waypoints with pauses.
    #[default]
    Patrol,
    /// Pursuing the live target position.
    Chase,
}

/// Tuning preset for an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentArchetype {
    /// Balanced wanderer.
    #[default]
    Ghost,
    /// Slow guard with long, narrow sight.
    Sentinel,
    /// Fast hunter with wide sight that gives up late.
    Stalker,
}

/// Explicit trigger-volume input to perception for a single tick.
///
/// `Entered` forces detection for that tick regardless of range,
/// field of view or line of sight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerOverride {
    #[default]
    None,
    Entered,
}

/// Why a perception query succeeded or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionOutcome {
    /// Forced by a trigger volume.
    Triggered,
    /// All geometric checks passed.
    Seen,
    /// Target beyond detection radius.
    OutOfRange,
    /// Target outside the field-of-view cone.
    OutsideFov,
    /// Probe hit something else first, or nothing.
    Occluded,
}

impl DetectionOutcome {
    pub fn is_detected(self) -> bool {
        matches!(self, DetectionOutcome::Triggered | DetectionOutcome::Seen)
    }
}

/// Built-in scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioId {
    /// One ghost pacing a walled corridor.
    Corridor,
    /// Two ghosts around a courtyard with pillars.
    Courtyard,
    /// Seeded random routes.
    RandomPatrol,
}
