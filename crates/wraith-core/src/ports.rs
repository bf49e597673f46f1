//! Boundary contracts between the agent AI and its host.
//!
//! The AI never reaches for engine globals. Everything it reads or
//! commands goes through these traits, so a controller can run against a
//! full simulation or against hand-written fakes in tests.

use glam::DVec3;

use crate::events::AgentEvent;
use crate::types::{LayerMask, RayHit, SimTime};

/// World-space visibility probe.
pub trait LineOfSightQuery {
    /// Cast a ray and return the first hit on any layer in `layers`,
    /// no farther than `max_distance`. `direction` is normalized.
    fn cast(
        &self,
        origin: DVec3,
        direction: DVec3,
        max_distance: f64,
        layers: LayerMask,
    ) -> Option<RayHit>;
}

/// Path-following service that moves the agent toward a point.
///
/// While a controller is active it is the only caller; the adapter is lent
/// to it for the duration of one update.
pub trait LocomotionAdapter {
    fn set_destination(&mut self, point: DVec3);
    fn set_speed(&mut self, speed: f64);
    fn set_stopping_distance(&mut self, distance: f64);
    fn has_path(&self) -> bool;
    fn remaining_distance(&self) -> f64;
}

/// Monotonic simulation time source.
pub trait Clock {
    /// Seconds since the simulation started.
    fn now(&self) -> f64;
    /// Seconds covered by the current tick.
    fn delta_time(&self) -> f64;
}

/// Read-only pose of the tracked target.
pub trait TargetProvider {
    fn current_position(&self) -> DVec3;
}

/// Receiver for agent notifications.
pub trait EventSink {
    fn emit(&mut self, event: AgentEvent);
}

/// Clock frozen at a given time with a given step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedClock {
    pub now: f64,
    pub delta: f64,
}

impl FixedClock {
    pub fn new(now: f64, delta: f64) -> Self {
        Self { now, delta }
    }

    /// Move time forward by one step.
    pub fn advance(&mut self) {
        self.now += self.delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> f64 {
        self.now
    }

    fn delta_time(&self) -> f64 {
        self.delta
    }
}

impl Clock for SimTime {
    fn now(&self) -> f64 {
        self.elapsed_secs
    }

    fn delta_time(&self) -> f64 {
        self.dt()
    }
}

/// A target standing still at a known point.
impl TargetProvider for DVec3 {
    fn current_position(&self) -> DVec3 {
        *self
    }
}

impl EventSink for Vec<AgentEvent> {
    fn emit(&mut self, event: AgentEvent) {
        self.push(event);
    }
}
