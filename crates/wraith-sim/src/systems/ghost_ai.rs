//! Ghost AI system: runs every agent controller once per tick.
//!
//! Sight probes see the world as it stood at the start of the system, and
//! the agent pose is synced into the controller before its update and read
//! back after, so a `NavAgent` and the direct fallback share one `Pose`.

use hecs::World;

use wraith_core::events::{AgentEvent, SimEvent};
use wraith_core::ports::LocomotionAdapter;
use wraith_core::types::{Pose, SimTime};

use wraith_ai::TickInputs;

use crate::components::{Ghost, Position, Target};
use crate::nav::NavAgent;
use crate::sight::WorldSight;

pub fn run(world: &mut World, time: &SimTime, events: &mut Vec<SimEvent>) {
    let target = world
        .query::<(&Target, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| pos.0);
    let Some(target) = target else {
        return;
    };
    let sight = WorldSight::collect(world);

    let mut agent_events: Vec<AgentEvent> = Vec::new();
    for (_entity, (ghost, pose, nav)) in
        world.query_mut::<(&mut Ghost, &mut Pose, Option<&mut NavAgent>)>()
    {
        let inputs = TickInputs {
            clock: time,
            target: &target,
            sight: &sight,
            trigger: std::mem::take(&mut ghost.trigger),
        };

        ghost.controller.set_pose(*pose);
        let mut handle = nav.map(|nav| nav.attach(pose.position));
        ghost.controller.update(
            &inputs,
            handle
                .as_mut()
                .map(|h| h as &mut dyn LocomotionAdapter),
            &mut agent_events,
        );
        *pose = ghost.controller.pose();

        events.extend(agent_events.drain(..).map(|event| SimEvent {
            tick: time.tick,
            agent: ghost.tag,
            event,
        }));
    }
}
