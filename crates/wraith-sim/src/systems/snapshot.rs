//! Snapshot system: queries the ECS world and builds a complete `SimSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use wraith_core::events::SimEvent;
use wraith_core::state::{AgentView, SimSnapshot, TargetView};
use wraith_core::types::{Pose, SimTime};

use crate::components::{Ghost, Position, Target, Velocity};

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    paused: bool,
    events: Vec<SimEvent>,
    target_caught: bool,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        paused,
        agents: build_agents(world),
        target: build_target(world),
        events,
        target_caught,
    }
}

/// Agent views ordered by tag.
fn build_agents(world: &World) -> Vec<AgentView> {
    let mut agents: Vec<AgentView> = world
        .query::<(&Ghost, &Pose)>()
        .iter()
        .map(|(_, (ghost, pose))| {
            let agent = ghost.controller.agent();
            AgentView {
                agent: ghost.tag,
                position: pose.position,
                forward: pose.forward(),
                state: agent.state,
                waypoint_index: agent.waypoint_index,
                wait_timer: agent.wait_timer,
                walking: agent.walking,
            }
        })
        .collect();

    agents.sort_by_key(|a| a.agent);
    agents
}

fn build_target(world: &World) -> TargetView {
    world
        .query::<(&Target, &Position, &Velocity)>()
        .iter()
        .next()
        .map(|(_, (_, pos, vel))| TargetView {
            position: pos.0,
            velocity: vel.0,
        })
        .unwrap_or_default()
}
