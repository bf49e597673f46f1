//! Target perception: range, field of view and line of sight.
//!
//! Pure queries. The only thing consulted beyond the arguments is the
//! caller-supplied sight probe.

use glam::{DQuat, DVec3};

use wraith_core::config::PerceptionConfig;
use wraith_core::enums::{DetectionOutcome, TriggerOverride};
use wraith_core::ports::LineOfSightQuery;
use wraith_core::types::{EntityId, Pose, UP};

/// What perception needs to know about the target this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPose {
    pub entity: EntityId,
    pub position: DVec3,
}

/// Is the target detectable this tick?
pub fn detect(
    agent: &Pose,
    target: &TargetPose,
    config: &PerceptionConfig,
    sight: &dyn LineOfSightQuery,
    trigger: TriggerOverride,
) -> bool {
    detect_report(agent, target, config, sight, trigger).is_detected()
}

/// Like [`detect`], but reports which check decided the result.
///
/// Checks run in order and stop at the first failure:
/// 1. distance to target <= detection radius
/// 2. angle off the forward axis <= half the field of view
/// 3. a probe from eye height toward the target hits the target first
///
/// A trigger override skips all three.
pub fn detect_report(
    agent: &Pose,
    target: &TargetPose,
    config: &PerceptionConfig,
    sight: &dyn LineOfSightQuery,
    trigger: TriggerOverride,
) -> DetectionOutcome {
    if trigger == TriggerOverride::Entered {
        return DetectionOutcome::Triggered;
    }

    let to_target = target.position - agent.position;
    let distance = to_target.length();
    if distance > config.detection_radius {
        return DetectionOutcome::OutOfRange;
    }

    // Standing on the target: no direction to test and nothing can occlude.
    let Some(direction) = to_target.try_normalize() else {
        return DetectionOutcome::Seen;
    };

    let angle = agent.forward().angle_between(direction);
    if angle > config.half_fov_radians() {
        return DetectionOutcome::OutsideFov;
    }

    let origin = agent.position + UP * config.eye_height;
    match sight.cast(
        origin,
        direction,
        config.detection_radius,
        config.probe_layers(),
    ) {
        Some(hit) if hit.entity == target.entity => DetectionOutcome::Seen,
        _ => DetectionOutcome::Occluded,
    }
}

/// Left and right edges of the view cone on the ground plane, as unit vectors.
pub fn fov_edges(agent: &Pose, config: &PerceptionConfig) -> (DVec3, DVec3) {
    let half = config.half_fov_radians();
    let forward = agent.forward();
    let left = DQuat::from_rotation_y(half) * forward;
    let right = DQuat::from_rotation_y(-half) * forward;
    (left, right)
}
