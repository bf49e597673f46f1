//! Chase behavior: pursue the live target position.

use glam::DVec3;

use wraith_core::config::MotionConfig;
use wraith_core::ports::LocomotionAdapter;

use crate::controller::Agent;
use crate::kinematics;

/// Run one chase tick.
///
/// Returns the distance to the target when it has just crossed into kill
/// distance. Staying inside does not report again until the agent has been
/// outside the radius or has left the chase.
pub(crate) fn update<L: LocomotionAdapter + ?Sized>(
    agent: &mut Agent,
    target: DVec3,
    motion: &MotionConfig,
    dt: f64,
    locomotion: Option<&mut L>,
) -> Option<f64> {
    match locomotion {
        Some(loco) => command(loco, target, motion),
        None => {
            let from = agent.pose.position;
            agent.pose.position = kinematics::step_towards(from, target, motion.chase_speed, dt);
            agent.pose.rotation = kinematics::turn_towards(
                agent.pose.rotation,
                agent.pose.position,
                target,
                motion.turn_smoothing,
                dt,
            );
        }
    }

    let distance = agent.pose.position.distance(target);
    if distance <= motion.kill_distance {
        if !agent.inside_kill_radius {
            agent.inside_kill_radius = true;
            return Some(distance);
        }
    } else {
        agent.inside_kill_radius = false;
    }
    None
}

/// Point locomotion at the target with chase settings.
pub(crate) fn command<L: LocomotionAdapter + ?Sized>(
    loco: &mut L,
    target: DVec3,
    motion: &MotionConfig,
) {
    loco.set_speed(motion.chase_speed);
    loco.set_stopping_distance(0.0);
    loco.set_destination(target);
}
