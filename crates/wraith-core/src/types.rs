//! Fundamental geometric and simulation types.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// World up axis. Facing and planar motion are measured against it.
pub const UP: DVec3 = DVec3::Y;

/// Local forward axis; a pose's forward is `rotation * FORWARD`.
pub const FORWARD: DVec3 = DVec3::Z;

/// Opaque identity of something a line-of-sight probe can hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Set of collision layers, used to filter line-of-sight probes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Number of addressable layers.
    pub const COUNT: u32 = u32::BITS;

    /// Mask containing only layer `index`, or `None` past the last layer.
    pub const fn try_layer(index: u32) -> Option<Self> {
        match 1u32.checked_shl(index) {
            Some(bits) => Some(LayerMask(bits)),
            None => None,
        }
    }

    /// Mask containing only layer `index`, which must be below `COUNT`.
    ///
    /// An out-of-range index gives an empty mask in release builds rather
    /// than aliasing onto a low layer.
    pub const fn layer(index: u32) -> Self {
        debug_assert!(index < Self::COUNT, "layer index out of range");
        match Self::try_layer(index) {
            Some(mask) => mask,
            None => LayerMask::NONE,
        }
    }

    pub const fn union(self, other: LayerMask) -> Self {
        LayerMask(self.0 | other.0)
    }

    /// True if any layer is shared between the two masks.
    pub const fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Position and orientation of an agent. +Y is up, forward is +Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    pub rotation: DQuat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(position: DVec3, rotation: DQuat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` facing along `direction` projected on the ground plane.
    /// A vertical or zero direction keeps the identity rotation.
    pub fn facing(position: DVec3, direction: DVec3) -> Self {
        let rotation = look_rotation(direction).unwrap_or(DQuat::IDENTITY);
        Self { position, rotation }
    }

    /// Unit forward vector.
    pub fn forward(&self) -> DVec3 {
        self.rotation * FORWARD
    }

    /// Heading in radians around the up axis (0 = +Z, positive toward +X).
    pub fn yaw(&self) -> f64 {
        let f = self.forward();
        f.x.atan2(f.z)
    }
}

/// Rotation about the up axis that faces `direction` on the ground plane.
///
/// Returns `None` when the direction has no horizontal component.
pub fn look_rotation(direction: DVec3) -> Option<DQuat> {
    let flat = flatten(direction);
    if flat.length_squared() <= 1e-6 {
        return None;
    }
    Some(DQuat::from_rotation_y(flat.x.atan2(flat.z)))
}

/// Drop the vertical component of a vector.
pub fn flatten(v: DVec3) -> DVec3 {
    DVec3::new(v.x, 0.0, v.z)
}

/// Distance between two points on the ground plane.
pub fn planar_distance(a: DVec3, b: DVec3) -> f64 {
    flatten(b - a).length()
}

/// First hit reported by a line-of-sight probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub entity: EntityId,
    pub point: DVec3,
    pub normal: DVec3,
    /// Distance from the ray origin to `point`.
    pub distance: f64,
}

/// Cyclic patrol route, fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Waypoints(Vec<DVec3>);

impl Waypoints {
    pub fn new(points: Vec<DVec3>) -> Self {
        Self(points)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<DVec3> {
        self.0.get(index).copied()
    }

    /// Index following `index`, wrapping after the last waypoint.
    pub fn next_index(&self, index: usize) -> usize {
        if self.0.is_empty() {
            0
        } else {
            (index + 1) % self.0.len()
        }
    }

    pub fn as_slice(&self) -> &[DVec3] {
        &self.0
    }
}

impl From<Vec<DVec3>> for Waypoints {
    fn from(points: Vec<DVec3>) -> Self {
        Self(points)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs = self.tick as f64 * self.dt();
    }
}
