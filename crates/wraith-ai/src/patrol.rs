//! Patrol behavior: walk the waypoint cycle, pausing at each point.

use wraith_core::config::MotionConfig;
use wraith_core::ports::LocomotionAdapter;
use wraith_core::types::{planar_distance, Waypoints};

use crate::controller::Agent;
use crate::kinematics;

/// Remaining wait below which the timer counts as expired. Absorbs the
/// rounding left after subtracting non-binary step sizes such as 0.1.
const WAIT_EPSILON: f64 = 1e-9;

/// Run one patrol tick. No-op without waypoints.
pub(crate) fn update<L: LocomotionAdapter + ?Sized>(
    agent: &mut Agent,
    waypoints: &Waypoints,
    motion: &MotionConfig,
    dt: f64,
    locomotion: Option<&mut L>,
) {
    let Some(point) = waypoints.get(agent.waypoint_index) else {
        return;
    };

    match locomotion {
        Some(loco) => {
            command(loco, point, motion);
            let arrived =
                !loco.has_path() || loco.remaining_distance() <= motion.waypoint_threshold;
            if arrived && advance_after_wait(agent, waypoints, motion, dt) {
                if let Some(next) = waypoints.get(agent.waypoint_index) {
                    loco.set_destination(next);
                }
            }
        }
        None => {
            let from = agent.pose.position;
            agent.pose.position = kinematics::step_towards(from, point, motion.patrol_speed, dt);
            agent.pose.rotation = kinematics::turn_towards(
                agent.pose.rotation,
                from,
                point,
                motion.turn_smoothing,
                dt,
            );
            if planar_distance(agent.pose.position, point) <= motion.waypoint_threshold {
                advance_after_wait(agent, waypoints, motion, dt);
            }
        }
    }
}

/// Point locomotion at a waypoint with patrol settings.
pub(crate) fn command<L: LocomotionAdapter + ?Sized>(
    loco: &mut L,
    point: glam::DVec3,
    motion: &MotionConfig,
) {
    loco.set_speed(motion.patrol_speed);
    loco.set_stopping_distance(motion.waypoint_threshold);
    loco.set_destination(point);
}

/// Wait-timer step for an agent standing at its waypoint.
///
/// The first arrival tick starts the timer; later ticks count it down.
/// Returns true once the index has moved on to the next waypoint.
fn advance_after_wait(
    agent: &mut Agent,
    waypoints: &Waypoints,
    motion: &MotionConfig,
    dt: f64,
) -> bool {
    if agent.wait_timer <= 0.0 {
        if motion.wait_at_waypoint_secs > 0.0 {
            agent.wait_timer = motion.wait_at_waypoint_secs;
            return false;
        }
    } else {
        agent.wait_timer = (agent.wait_timer - dt).max(0.0);
        if agent.wait_timer > WAIT_EPSILON {
            return false;
        }
    }

    agent.wait_timer = 0.0;
    agent.waypoint_index = waypoints.next_index(agent.waypoint_index);
    log::trace!("patrol advancing to waypoint {}", agent.waypoint_index);
    true
}
