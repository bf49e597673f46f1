//! Tests for the simulation engine, world setup, systems and scenarios.

use glam::DVec3;

use wraith_core::commands::SimCommand;
use wraith_core::config::{AgentConfig, PerceptionConfig};
use wraith_core::enums::*;
use wraith_core::events::AgentEvent;
use wraith_core::state::SimSnapshot;

use crate::components::{Ghost, Shape};
use crate::engine::{SimConfig, SimulationEngine};
use crate::error::{ScenarioError, SimError};
use crate::nav::NavAgent;
use crate::scenario::{AgentSpec, Locomotion, ObstacleSpec, Scenario, TargetMotion, TargetSpec};

fn engine_with(scenario: &Scenario) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.load_scenario(scenario).unwrap();
    engine
}

/// One ghost at the origin facing +Z, no route, no trigger volume.
fn lone_ghost(target: DVec3, locomotion: Locomotion) -> Scenario {
    Scenario {
        name: "test".into(),
        agents: vec![AgentSpec {
            tag: 1,
            locomotion,
            trigger_radius: None,
            ..Default::default()
        }],
        obstacles: Vec::new(),
        target: TargetSpec {
            position: target,
            motion: TargetMotion::Still,
        },
    }
}

fn state_changes(snap: &SimSnapshot) -> Vec<(AgentState, AgentState)> {
    snap.events
        .iter()
        .filter_map(|e| match e.event {
            AgentEvent::StateChanged { from, to } => Some((from, to)),
            _ => None,
        })
        .collect()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig { seed: 12345 });
    let mut engine_b = SimulationEngine::new(SimConfig { seed: 12345 });
    engine_a.load_builtin(ScenarioId::RandomPatrol).unwrap();
    engine_b.load_builtin(ScenarioId::RandomPatrol).unwrap();

    for _ in 0..300 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig { seed: 111 });
    let mut engine_b = SimulationEngine::new(SimConfig { seed: 222 });
    engine_a.load_builtin(ScenarioId::RandomPatrol).unwrap();
    engine_b.load_builtin(ScenarioId::RandomPatrol).unwrap();

    let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
    let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
    assert_ne!(json_a, json_b, "Different seeds should scatter different routes");
}

// ---- Scenario loading ----

#[test]
fn test_all_builtins_load() {
    for id in [
        ScenarioId::Corridor,
        ScenarioId::Courtyard,
        ScenarioId::RandomPatrol,
    ] {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.load_builtin(id).unwrap();
        let snap = engine.tick();
        assert!(!snap.agents.is_empty(), "{id:?} has no agents");
        assert_eq!(snap.time.tick, 1);
    }
}

#[test]
fn test_scenario_json_defaults() {
    let json = r#"{
        "agents": [
            { "tag": 3, "archetype": "Sentinel", "waypoints": [[0, 0, 0], [1, 0, 0]] },
            { "tag": 4, "locomotion": "Direct", "trigger_radius": null }
        ],
        "obstacles": [
            { "position": [0, 1, 5], "shape": { "kind": "Sphere", "radius": 1.0 } }
        ],
        "target": { "position": [0, 0, 20], "motion": { "kind": "Velocity", "velocity": [0, 0, -1] } }
    }"#;
    let scenario = Scenario::from_json(json).unwrap();

    let sentinel = &scenario.agents[0];
    assert_eq!(sentinel.locomotion, Locomotion::Nav);
    assert_eq!(sentinel.trigger_radius, Some(1.0));
    assert_eq!(sentinel.waypoints.len(), 2);
    assert_eq!(
        sentinel.resolved_config(),
        wraith_ai::profiles::get_profile(AgentArchetype::Sentinel)
    );
    assert_eq!(scenario.agents[1].trigger_radius, None);
    assert_eq!(scenario.obstacles[0].layer, 0);

    let engine = engine_with(&scenario);
    let navs = engine.world().query::<&NavAgent>().iter().count();
    assert_eq!(navs, 1);
}

#[test]
fn test_duplicate_tags_rejected() {
    let mut scenario = lone_ghost(DVec3::new(0.0, 0.0, 50.0), Locomotion::Nav);
    scenario.agents.push(scenario.agents[0].clone());
    let err = Scenario::from_json(&serde_json::to_string(&scenario).unwrap()).unwrap_err();
    assert!(matches!(err, ScenarioError::DuplicateAgent(1)));
}

#[test]
fn test_degenerate_obstacle_rejected() {
    let mut scenario = lone_ghost(DVec3::new(0.0, 0.0, 50.0), Locomotion::Nav);
    scenario.obstacles.push(ObstacleSpec {
        position: DVec3::ZERO,
        shape: Shape::Sphere { radius: 0.0 },
        layer: 0,
    });
    let mut engine = SimulationEngine::new(SimConfig::default());
    let err = engine.load_scenario(&scenario).unwrap_err();
    assert!(matches!(
        err,
        SimError::Scenario(ScenarioError::DegenerateObstacle { index: 0 })
    ));
}

#[test]
fn test_obstacle_layer_past_last_rejected() {
    let mut scenario = lone_ghost(DVec3::new(0.0, 0.0, 5.0), Locomotion::Nav);
    scenario.obstacles.push(ObstacleSpec {
        position: DVec3::new(0.0, 1.0, 2.5),
        shape: Shape::Box {
            half_extents: DVec3::new(2.0, 1.0, 0.2),
        },
        layer: 32,
    });
    let mut engine = SimulationEngine::new(SimConfig::default());
    let err = engine.load_scenario(&scenario).unwrap_err();
    assert!(matches!(
        err,
        SimError::Scenario(ScenarioError::InvalidLayer { index: 0, layer: 32 })
    ));

    scenario.obstacles[0].layer = 31;
    assert!(engine.load_scenario(&scenario).is_ok());
}

#[test]
fn test_non_finite_values_rejected() {
    let base = lone_ghost(DVec3::new(0.0, 0.0, 5.0), Locomotion::Nav);

    let mut heading = base.clone();
    heading.agents[0].heading_degrees = f64::NAN;
    let mut waypoint = base.clone();
    waypoint.agents[0].waypoints = vec![DVec3::ZERO, DVec3::new(f64::INFINITY, 0.0, 0.0)];
    let mut target = base.clone();
    target.target.motion = TargetMotion::Velocity {
        velocity: DVec3::new(0.0, 0.0, f64::NAN),
    };
    let mut obstacle = base.clone();
    obstacle.obstacles.push(ObstacleSpec {
        position: DVec3::new(f64::NAN, 1.0, 2.5),
        shape: Shape::Sphere { radius: 1.0 },
        layer: 0,
    });

    for (scenario, field) in [
        (heading, "agent 1 heading"),
        (waypoint, "agent 1 waypoint 1"),
        (target, "target velocity"),
        (obstacle, "obstacle 0 position"),
    ] {
        match scenario.validate() {
            Err(ScenarioError::NotFinite { field: got }) => assert_eq!(got, field),
            other => panic!("expected {field} to be rejected, got {other:?}"),
        }
    }
}

#[test]
fn test_invalid_agent_config_keeps_previous_world() {
    let good = lone_ghost(DVec3::new(0.0, 0.0, 50.0), Locomotion::Nav);
    let mut engine = engine_with(&good);
    engine.tick();

    let mut bad = good.clone();
    bad.agents[0].tag = 9;
    bad.agents[0].config = Some(AgentConfig {
        perception: PerceptionConfig {
            detection_radius: 0.0,
            ..Default::default()
        },
        ..Default::default()
    });
    let err = engine.load_scenario(&bad).unwrap_err();
    assert!(matches!(err, SimError::Agent { tag: 9, .. }));

    let snap = engine.tick();
    assert_eq!(snap.agents.len(), 1);
    assert_eq!(snap.agents[0].agent, 1);
    assert_eq!(snap.time.tick, 2);
}

#[test]
fn test_missing_file_reports_path() {
    let err = Scenario::load(std::path::Path::new("/nonexistent/wraith.json")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/wraith.json"));
}

// ---- Perception in the world ----

#[test]
fn test_visible_target_starts_chase_on_first_tick() {
    let mut engine = engine_with(&lone_ghost(DVec3::new(0.0, 0.0, 5.0), Locomotion::Nav));
    let snap = engine.tick();
    assert_eq!(snap.agents[0].state, AgentState::Chase);
    assert_eq!(
        state_changes(&snap),
        vec![(AgentState::Patrol, AgentState::Chase)]
    );
    assert_eq!(snap.events[0].tick, 0);
    assert_eq!(snap.events[0].agent, 1);
}

#[test]
fn test_wall_blocks_sight() {
    let mut scenario = lone_ghost(DVec3::new(0.0, 0.0, 5.0), Locomotion::Nav);
    scenario.obstacles.push(ObstacleSpec {
        position: DVec3::new(0.0, 1.0, 2.5),
        shape: Shape::Box {
            half_extents: DVec3::new(2.0, 1.0, 0.2),
        },
        layer: 0,
    });
    let mut engine = engine_with(&scenario);
    for _ in 0..60 {
        let snap = engine.tick();
        assert_eq!(snap.agents[0].state, AgentState::Patrol);
    }
}

#[test]
fn test_obstacle_on_other_layer_does_not_block() {
    let mut scenario = lone_ghost(DVec3::new(0.0, 0.0, 5.0), Locomotion::Nav);
    scenario.obstacles.push(ObstacleSpec {
        position: DVec3::new(0.0, 1.0, 2.5),
        shape: Shape::Box {
            half_extents: DVec3::new(2.0, 1.0, 0.2),
        },
        layer: 5,
    });
    let mut engine = engine_with(&scenario);
    assert_eq!(engine.tick().agents[0].state, AgentState::Chase);
}

#[test]
fn test_target_behind_is_not_seen() {
    let mut engine = engine_with(&lone_ghost(DVec3::new(0.0, 0.0, -4.0), Locomotion::Nav));
    for _ in 0..30 {
        assert_eq!(engine.tick().agents[0].state, AgentState::Patrol);
    }
}

// ---- Triggers ----

#[test]
fn test_trigger_command_forces_chase() {
    let mut engine = engine_with(&lone_ghost(DVec3::new(0.0, 0.0, -4.0), Locomotion::Nav));
    engine.tick();
    engine.queue_command(SimCommand::TriggerEnter { agent: 1 });
    let snap = engine.tick();
    assert_eq!(snap.agents[0].state, AgentState::Chase);
}

#[test]
fn test_trigger_command_for_unknown_agent_ignored() {
    let mut engine = engine_with(&lone_ghost(DVec3::new(0.0, 0.0, -4.0), Locomotion::Nav));
    engine.queue_command(SimCommand::TriggerEnter { agent: 77 });
    let snap = engine.tick();
    assert_eq!(snap.agents[0].state, AgentState::Patrol);
}

#[test]
fn test_trigger_volume_fires_once_on_entry() {
    let mut scenario = lone_ghost(DVec3::new(0.0, 0.0, -2.0), Locomotion::Direct);
    scenario.agents[0].trigger_radius = Some(2.0);
    let mut engine = engine_with(&scenario);

    let first = engine.tick();
    assert_eq!(first.agents[0].state, AgentState::Chase);
    assert_eq!(state_changes(&first).len(), 1);

    // Still inside: no second entry, and the grace period holds the chase.
    for _ in 0..10 {
        let snap = engine.tick();
        assert!(state_changes(&snap).is_empty());
        assert_eq!(snap.agents[0].state, AgentState::Chase);
    }
}

// ---- Chase and catch ----

#[test]
fn test_corridor_target_is_caught() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.load_builtin(ScenarioId::Corridor).unwrap();

    let mut chased = false;
    let mut caught_events = 0;
    for _ in 0..900 {
        let snap = engine.tick();
        chased |= snap.agents[0].state == AgentState::Chase;
        caught_events += snap
            .events
            .iter()
            .filter(|e| matches!(e.event, AgentEvent::TargetCaught { .. }))
            .count();
        if snap.target_caught {
            break;
        }
    }
    assert!(chased, "ghost never started chasing");
    assert!(engine.target_caught(), "target was never caught");
    assert_eq!(caught_events, 1);
}

#[test]
fn test_catch_latch_survives_later_ticks() {
    let mut engine = engine_with(&lone_ghost(DVec3::new(0.0, 0.0, 1.0), Locomotion::Nav));
    let snap = engine.tick();
    assert!(snap.target_caught);
    engine.queue_command(SimCommand::SetTargetPosition {
        position: DVec3::new(0.0, 0.0, 40.0),
    });
    for _ in 0..10 {
        assert!(engine.tick().target_caught);
    }
}

#[test]
fn test_chase_gives_up_after_losing_target() {
    let mut engine = engine_with(&lone_ghost(DVec3::new(0.0, 0.0, 6.0), Locomotion::Nav));
    assert_eq!(engine.tick().agents[0].state, AgentState::Chase);

    // Far out of range: 3 s grace at 30 Hz, then back to patrol.
    engine.queue_command(SimCommand::SetTargetPosition {
        position: DVec3::new(0.0, 0.0, 500.0),
    });
    let mut ticks_in_chase = 0;
    loop {
        let snap = engine.tick();
        if snap.agents[0].state == AgentState::Patrol {
            break;
        }
        ticks_in_chase += 1;
        assert!(ticks_in_chase < 200, "never gave up the chase");
    }
    assert!((89..=91).contains(&ticks_in_chase), "gave up after {ticks_in_chase} ticks");
}

// ---- Patrol ----

#[test]
fn test_nav_patrol_cycles_route() {
    let mut scenario = lone_ghost(DVec3::new(50.0, 0.0, 50.0), Locomotion::Nav);
    scenario.agents[0].waypoints = vec![DVec3::ZERO, DVec3::new(0.0, 0.0, 4.0)];
    let mut engine = engine_with(&scenario);

    let mut indices = vec![0];
    let mut max_z: f64 = 0.0;
    let mut saw_walking = false;
    let mut saw_waiting = false;
    for _ in 0..240 {
        let snap = engine.tick();
        let agent = &snap.agents[0];
        if indices.last() != Some(&agent.waypoint_index) {
            indices.push(agent.waypoint_index);
        }
        max_z = max_z.max(agent.position.z);
        saw_walking |= agent.walking;
        saw_waiting |= agent.wait_timer > 0.0 && !agent.walking;
        assert_eq!(agent.state, AgentState::Patrol);
    }
    assert!(indices.starts_with(&[0, 1, 0]), "indices {indices:?}");
    assert!(max_z > 3.6);
    assert!(saw_walking && saw_waiting);
}

#[test]
fn test_nav_agent_faces_travel_direction() {
    let mut scenario = lone_ghost(DVec3::new(50.0, 0.0, 50.0), Locomotion::Nav);
    scenario.agents[0].waypoints = vec![DVec3::new(5.0, 0.0, 0.0)];
    let mut engine = engine_with(&scenario);
    let snap = engine.tick();
    assert!((snap.agents[0].forward - DVec3::X).length() < 1e-9);
    assert!(snap.agents[0].position.x > 0.0);
}

// ---- Host commands ----

#[test]
fn test_pause_freezes_world() {
    let mut scenario = lone_ghost(DVec3::new(50.0, 0.0, 50.0), Locomotion::Direct);
    scenario.agents[0].waypoints = vec![DVec3::new(0.0, 0.0, 10.0)];
    let mut engine = engine_with(&scenario);
    let before = engine.tick();

    engine.queue_command(SimCommand::Pause);
    for _ in 0..5 {
        let snap = engine.tick();
        assert!(snap.paused);
        assert_eq!(snap.time.tick, before.time.tick);
        assert_eq!(snap.agents[0].position, before.agents[0].position);
    }

    engine.queue_command(SimCommand::Resume);
    let snap = engine.tick();
    assert!(!snap.paused);
    assert_eq!(snap.time.tick, before.time.tick + 1);
    assert!(snap.agents[0].position.z > before.agents[0].position.z);
}

#[test]
fn test_set_target_velocity_replaces_path() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.load_builtin(ScenarioId::Courtyard).unwrap();
    engine.tick();

    engine.queue_command(SimCommand::SetTargetVelocity {
        velocity: DVec3::ZERO,
    });
    let held = engine.tick().target.position;
    for _ in 0..30 {
        let snap = engine.tick();
        assert_eq!(snap.target.position, held);
        assert_eq!(snap.target.velocity, DVec3::ZERO);
    }
}

#[test]
fn test_scripted_path_reports_velocity() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.load_builtin(ScenarioId::Courtyard).unwrap();
    let snap = engine.tick();
    assert!((snap.target.velocity.length() - 1.8).abs() < 1e-9);
}

#[test]
fn test_set_target_position_teleports() {
    let mut engine = engine_with(&lone_ghost(DVec3::new(50.0, 0.0, 50.0), Locomotion::Nav));
    let spot = DVec3::new(-30.0, 0.0, 12.0);
    engine.queue_command(SimCommand::SetTargetPosition { position: spot });
    assert_eq!(engine.tick().target.position, spot);
}

#[test]
fn test_commands_before_load_are_harmless() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        SimCommand::SetTargetPosition {
            position: DVec3::ONE,
        },
        SimCommand::TriggerEnter { agent: 1 },
    ]);
    let snap = engine.tick();
    assert!(snap.agents.is_empty());
    assert_eq!(snap.target.position, DVec3::ZERO);
}

#[test]
fn test_ghost_trigger_is_consumed() {
    let mut engine = engine_with(&lone_ghost(DVec3::new(0.0, 0.0, -4.0), Locomotion::Nav));
    engine.queue_command(SimCommand::TriggerEnter { agent: 1 });
    engine.tick();
    let pending = engine
        .world()
        .query::<&Ghost>()
        .iter()
        .map(|(_, g)| g.trigger)
        .collect::<Vec<_>>();
    assert_eq!(pending, vec![TriggerOverride::None]);
}

#[test]
fn test_snapshot_serializes_events() {
    let mut engine = engine_with(&lone_ghost(DVec3::new(0.0, 0.0, 5.0), Locomotion::Nav));
    let json = serde_json::to_string(&engine.tick()).unwrap();
    assert!(json.contains("\"type\":\"StateChanged\""));
    assert!(json.contains("\"to\":\"Chase\""));
}
