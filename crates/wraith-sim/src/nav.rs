//! Straight-line locomotion service.
//!
//! `NavAgent` holds the last command a controller issued. The controller
//! talks to it through a `NavHandle`, which also knows where the agent
//! currently stands; the navigation system then does the actual moving.

use glam::DVec3;

use wraith_core::ports::LocomotionAdapter;
use wraith_core::types::planar_distance;

/// Locomotion command state for one agent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NavAgent {
    pub destination: Option<DVec3>,
    pub speed: f64,
    pub stopping_distance: f64,
}

impl NavAgent {
    /// Lend this service to a controller for one update.
    pub fn attach(&mut self, position: DVec3) -> NavHandle<'_> {
        NavHandle {
            nav: self,
            position,
        }
    }

    /// Planar distance from `position` to the destination, 0 without one.
    pub fn remaining_from(&self, position: DVec3) -> f64 {
        self.destination
            .map(|d| planar_distance(position, d))
            .unwrap_or(0.0)
    }

    /// Position after one tick of travel from `position`.
    ///
    /// Stands still once inside the stopping distance; otherwise heads for
    /// the destination itself, so the agent ends up strictly inside.
    pub fn advance(&self, position: DVec3, dt: f64) -> DVec3 {
        let Some(destination) = self.destination else {
            return position;
        };
        let remaining = self.remaining_from(position);
        if remaining <= self.stopping_distance {
            return position;
        }
        wraith_ai::kinematics::step_towards(position, destination, self.speed, dt)
    }
}

/// A `NavAgent` bound to the agent's position for the current tick.
pub struct NavHandle<'a> {
    nav: &'a mut NavAgent,
    position: DVec3,
}

impl LocomotionAdapter for NavHandle<'_> {
    fn set_destination(&mut self, point: DVec3) {
        self.nav.destination = Some(point);
    }

    fn set_speed(&mut self, speed: f64) {
        self.nav.speed = speed;
    }

    fn set_stopping_distance(&mut self, distance: f64) {
        self.nav.stopping_distance = distance;
    }

    fn has_path(&self) -> bool {
        self.nav.destination.is_some()
    }

    fn remaining_distance(&self) -> f64 {
        self.nav.remaining_from(self.position)
    }
}
