//! Trigger volume system.
//!
//! Marks an agent's `Ghost::trigger` on the tick the target's body first
//! overlaps its trigger sphere. Staying inside does not fire again.

use hecs::World;

use wraith_core::constants::TARGET_BODY_RADIUS;
use wraith_core::enums::TriggerOverride;
use wraith_core::types::{planar_distance, Pose};

use crate::components::{Ghost, Position, Target, TriggerVolume};

pub fn run(world: &mut World) {
    let target = world
        .query::<(&Target, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| pos.0);
    let Some(target) = target else {
        return;
    };

    for (_entity, (ghost, pose, volume)) in
        world.query_mut::<(&mut Ghost, &Pose, &mut TriggerVolume)>()
    {
        let inside = planar_distance(pose.position, target) <= volume.radius + TARGET_BODY_RADIUS;
        if inside && !volume.occupied {
            log::debug!("agent {} trigger entered", ghost.tag);
            ghost.trigger = TriggerOverride::Entered;
        }
        volume.occupied = inside;
    }
}
