//! Navigation system: moves agents that have a `NavAgent` toward their
//! destination and turns them to face the direction of travel.

use hecs::World;

use wraith_core::types::{look_rotation, Pose};

use crate::nav::NavAgent;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pose, nav)) in world.query_mut::<(&mut Pose, &NavAgent)>() {
        let next = nav.advance(pose.position, dt);
        if let Some(rotation) = look_rotation(next - pose.position) {
            pose.rotation = rotation;
        }
        pose.position = next;
    }
}
