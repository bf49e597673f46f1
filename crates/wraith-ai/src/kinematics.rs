//! Direct movement used when no locomotion service is attached.
//!
//! Motion stays on the ground plane: vertical offsets to the goal are ignored.

use glam::{DQuat, DVec3};

use wraith_core::types::{flatten, look_rotation};

/// Squared horizontal distance below which the agent does not turn.
const MIN_TURN_DIST_SQ: f64 = 0.001;

/// Position after moving toward `goal` at `speed` for `dt` seconds.
///
/// The step never overshoots the goal.
pub fn step_towards(from: DVec3, goal: DVec3, speed: f64, dt: f64) -> DVec3 {
    let to = flatten(goal - from);
    let mut step = to.normalize_or_zero() * speed * dt;
    if step.length_squared() > to.length_squared() {
        step = to;
    }
    from + step
}

/// Rotation eased toward facing `goal` from `from` on the ground plane.
///
/// Interpolates by `smoothing * dt` (clamped to 1), so the turn spreads
/// over several ticks instead of snapping.
pub fn turn_towards(rotation: DQuat, from: DVec3, goal: DVec3, smoothing: f64, dt: f64) -> DQuat {
    let dir = flatten(goal - from);
    if dir.length_squared() <= MIN_TURN_DIST_SQ {
        return rotation;
    }
    match look_rotation(dir) {
        Some(look) => rotation.slerp(look, (smoothing * dt).clamp(0.0, 1.0)),
        None => rotation,
    }
}
