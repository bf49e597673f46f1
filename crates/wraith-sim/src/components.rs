//! ECS components for the simulation world.
//!
//! Agents carry `Ghost` + `Pose` (+ optional `NavAgent`, `TriggerVolume`).
//! The target carries `Target` + `Position` + `Velocity` + `Collider`.
//! Obstacles carry `Obstacle` + `Position` + `Collider`.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use wraith_ai::PerceptionChaseController;
use wraith_core::enums::TriggerOverride;
use wraith_core::types::LayerMask;

/// An agent driven by a perception/chase controller.
pub struct Ghost {
    /// Scenario-assigned tag, stable across runs.
    pub tag: u32,
    pub controller: PerceptionChaseController,
    /// Trigger contact to feed into the next controller update.
    pub trigger: TriggerOverride,
}

/// Marker for the entity agents hunt.
#[derive(Debug, Clone, Copy, Default)]
pub struct Target;

/// Marker for static sight blockers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Obstacle;

/// World-space position of a non-agent entity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position(pub DVec3);

/// Velocity (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub DVec3);

/// Collision geometry used by sight probes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Shape {
    Sphere { radius: f64 },
    /// Axis-aligned box.
    Box { half_extents: DVec3 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub shape: Shape,
    /// Shape center relative to the entity position.
    pub offset: DVec3,
    pub layers: LayerMask,
}

/// Sphere around an agent that reports the target touching it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerVolume {
    pub radius: f64,
    /// Target was inside at the end of the previous tick.
    pub occupied: bool,
}

impl TriggerVolume {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            occupied: false,
        }
    }
}

/// Target moving along a fixed loop of points.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedPath {
    pub points: Vec<DVec3>,
    pub speed: f64,
    pub index: usize,
}
