//! Entity spawn factories for setting up the simulation world.
//!
//! Turns a `Scenario` into target, obstacle and agent entities with the
//! appropriate component bundles.

use glam::{DQuat, DVec3};
use hecs::{EntityBuilder, World};

use wraith_ai::ControllerBuilder;
use wraith_core::constants::{TARGET_BODY_HEIGHT, TARGET_BODY_RADIUS, TARGET_LAYER};
use wraith_core::enums::TriggerOverride;
use wraith_core::types::{EntityId, LayerMask, Pose};

use crate::components::*;
use crate::error::SimError;
use crate::nav::NavAgent;
use crate::scenario::{AgentSpec, Locomotion, ObstacleSpec, Scenario, TargetMotion, TargetSpec};

/// Populate an empty world from a validated scenario.
pub fn setup_scenario(world: &mut World, scenario: &Scenario) -> Result<(), SimError> {
    let target = spawn_target(world, &scenario.target);
    for obstacle in &scenario.obstacles {
        spawn_obstacle(world, obstacle);
    }
    for spec in &scenario.agents {
        spawn_ghost(world, spec, target)?;
    }
    Ok(())
}

/// Spawn the target with an upright box body on the target layer.
pub fn spawn_target(world: &mut World, spec: &TargetSpec) -> hecs::Entity {
    let half_height = TARGET_BODY_HEIGHT * 0.5;
    let collider = Collider {
        shape: Shape::Box {
            half_extents: DVec3::new(TARGET_BODY_RADIUS, half_height, TARGET_BODY_RADIUS),
        },
        offset: DVec3::new(0.0, half_height, 0.0),
        layers: LayerMask::layer(TARGET_LAYER),
    };

    let mut builder = EntityBuilder::new();
    builder.add_bundle((Target, Position(spec.position), collider));
    match &spec.motion {
        TargetMotion::Still => {
            builder.add(Velocity::default());
        }
        TargetMotion::Velocity { velocity } => {
            builder.add(Velocity(*velocity));
        }
        TargetMotion::Path { points, speed } => {
            builder.add(Velocity::default()).add(ScriptedPath {
                points: points.clone(),
                speed: *speed,
                index: 0,
            });
        }
    }
    world.spawn(builder.build())
}

pub fn spawn_obstacle(world: &mut World, spec: &ObstacleSpec) -> hecs::Entity {
    world.spawn((
        Obstacle,
        Position(spec.position),
        Collider {
            shape: spec.shape,
            offset: DVec3::ZERO,
            layers: LayerMask::layer(spec.layer),
        },
    ))
}

/// Spawn one agent hunting `target`.
pub fn spawn_ghost(
    world: &mut World,
    spec: &AgentSpec,
    target: hecs::Entity,
) -> Result<hecs::Entity, SimError> {
    let pose = Pose::new(
        spec.position,
        DQuat::from_rotation_y(spec.heading_degrees.to_radians()),
    );
    let controller = ControllerBuilder::new(spec.resolved_config())
        .waypoints(spec.waypoints.clone())
        .pose(pose)
        .target(EntityId(target.id()))
        .build()
        .map_err(|source| SimError::Agent {
            tag: spec.tag,
            source,
        })?;

    let mut builder = EntityBuilder::new();
    builder.add_bundle((
        Ghost {
            tag: spec.tag,
            controller,
            trigger: TriggerOverride::None,
        },
        pose,
    ));
    if spec.locomotion == Locomotion::Nav {
        builder.add(NavAgent::default());
    }
    if let Some(radius) = spec.trigger_radius {
        builder.add(TriggerVolume::new(radius));
    }
    let entity = world.spawn(builder.build());
    log::debug!(
        "spawned agent {} ({:?}, {:?}) with {} waypoints",
        spec.tag,
        spec.archetype,
        spec.locomotion,
        spec.waypoints.len()
    );
    Ok(entity)
}
