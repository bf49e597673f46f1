//! Scenario definitions: level layouts loaded from JSON or built in.
//!
//! A scenario lists the agents (archetype, route, locomotion), the sight
//! blockers and how the target moves. Built-in layouts cover a corridor,
//! a pillared courtyard and a seeded random patrol.

use std::path::Path;

use glam::DVec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use wraith_ai::profiles::get_profile;
use wraith_core::config::AgentConfig;
use wraith_core::constants::{DEFAULT_TRIGGER_RADIUS, OBSTACLE_LAYER};
use wraith_core::enums::{AgentArchetype, ScenarioId};
use wraith_core::types::LayerMask;

use crate::components::Shape;
use crate::error::ScenarioError;

/// How an agent gets around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locomotion {
    /// Driven through a `NavAgent`.
    #[default]
    Nav,
    /// No locomotion service: the controller moves the agent itself.
    Direct,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSpec {
    pub tag: u32,
    pub archetype: AgentArchetype,
    /// Replaces the archetype preset entirely when present.
    pub config: Option<AgentConfig>,
    pub position: DVec3,
    /// Initial heading, degrees from +Z toward +X.
    pub heading_degrees: f64,
    pub waypoints: Vec<DVec3>,
    pub locomotion: Locomotion,
    /// Trigger sphere radius; `null` for no trigger volume.
    pub trigger_radius: Option<f64>,
}

impl Default for AgentSpec {
    fn default() -> Self {
        Self {
            tag: 0,
            archetype: AgentArchetype::default(),
            config: None,
            position: DVec3::ZERO,
            heading_degrees: 0.0,
            waypoints: Vec::new(),
            locomotion: Locomotion::default(),
            trigger_radius: Some(DEFAULT_TRIGGER_RADIUS),
        }
    }
}

impl AgentSpec {
    /// Tuning for this agent: the explicit config, else the archetype preset.
    pub fn resolved_config(&self) -> AgentConfig {
        self.config.unwrap_or_else(|| get_profile(self.archetype))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub position: DVec3,
    pub shape: Shape,
    #[serde(default = "default_obstacle_layer")]
    pub layer: u32,
}

fn default_obstacle_layer() -> u32 {
    OBSTACLE_LAYER
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TargetMotion {
    #[default]
    Still,
    Velocity {
        velocity: DVec3,
    },
    /// Loop through `points` at `speed` m/s.
    Path {
        points: Vec<DVec3>,
        speed: f64,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSpec {
    pub position: DVec3,
    pub motion: TargetMotion,
}

/// Complete description of a level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    pub agents: Vec<AgentSpec>,
    pub obstacles: Vec<ObstacleSpec>,
    pub target: TargetSpec,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let json = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Structural checks. Agent tuning is validated when controllers are built.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let mut tags: Vec<u32> = self.agents.iter().map(|a| a.tag).collect();
        tags.sort_unstable();
        if let Some(pair) = tags.windows(2).find(|w| w[0] == w[1]) {
            return Err(ScenarioError::DuplicateAgent(pair[0]));
        }

        for agent in &self.agents {
            let owner = format!("agent {}", agent.tag);
            check_finite_point(&owner, "position", agent.position)?;
            if !agent.heading_degrees.is_finite() {
                return Err(not_finite(&owner, "heading"));
            }
            for (i, point) in agent.waypoints.iter().enumerate() {
                check_finite_point(&owner, &format!("waypoint {i}"), *point)?;
            }
            if let Some(radius) = agent.trigger_radius {
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(ScenarioError::InvalidTrigger {
                        tag: agent.tag,
                        radius,
                    });
                }
            }
        }

        for (index, obstacle) in self.obstacles.iter().enumerate() {
            check_finite_point(&format!("obstacle {index}"), "position", obstacle.position)?;
            let ok = match obstacle.shape {
                Shape::Sphere { radius } => radius.is_finite() && radius > 0.0,
                Shape::Box { half_extents } => {
                    half_extents.is_finite() && half_extents.min_element() > 0.0
                }
            };
            if !ok {
                return Err(ScenarioError::DegenerateObstacle { index });
            }
            if obstacle.layer >= LayerMask::COUNT {
                return Err(ScenarioError::InvalidLayer {
                    index,
                    layer: obstacle.layer,
                });
            }
        }

        check_finite_point("target", "position", self.target.position)?;
        match &self.target.motion {
            TargetMotion::Still => {}
            TargetMotion::Velocity { velocity } => {
                check_finite_point("target", "velocity", *velocity)?;
            }
            TargetMotion::Path { points, speed } => {
                if !(speed.is_finite() && *speed >= 0.0) {
                    return Err(ScenarioError::InvalidPathSpeed(*speed));
                }
                for (i, point) in points.iter().enumerate() {
                    check_finite_point("target", &format!("path point {i}"), *point)?;
                }
            }
        }
        Ok(())
    }
}

fn not_finite(owner: &str, what: &str) -> ScenarioError {
    ScenarioError::NotFinite {
        field: format!("{owner} {what}"),
    }
}

fn check_finite_point(owner: &str, what: &str, point: DVec3) -> Result<(), ScenarioError> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(not_finite(owner, what))
    }
}

/// Build a built-in scenario. Only `RandomPatrol` draws from `rng`.
pub fn build(id: ScenarioId, rng: &mut ChaCha8Rng) -> Scenario {
    match id {
        ScenarioId::Corridor => build_corridor(),
        ScenarioId::Courtyard => build_courtyard(),
        ScenarioId::RandomPatrol => build_random_patrol(rng),
    }
}

/// "Corridor": one ghost paces a walled hallway while the target walks in
/// from the far end.
fn build_corridor() -> Scenario {
    let wall = |x: f64| ObstacleSpec {
        position: DVec3::new(x, 1.0, 10.0),
        shape: Shape::Box {
            half_extents: DVec3::new(0.25, 1.0, 12.0),
        },
        layer: OBSTACLE_LAYER,
    };

    Scenario {
        name: "Corridor".into(),
        agents: vec![AgentSpec {
            tag: 1,
            position: DVec3::ZERO,
            waypoints: vec![DVec3::ZERO, DVec3::new(0.0, 0.0, 8.0)],
            ..Default::default()
        }],
        obstacles: vec![wall(-2.0), wall(2.0)],
        target: TargetSpec {
            position: DVec3::new(0.0, 0.0, 24.0),
            motion: TargetMotion::Velocity {
                velocity: DVec3::new(0.0, 0.0, -1.5),
            },
        },
    }
}

/// "Courtyard": a sentinel and a stalker circle a square of pillars while
/// the target walks a loop around the outside.
fn build_courtyard() -> Scenario {
    let pillar = |x: f64, z: f64| ObstacleSpec {
        position: DVec3::new(x, 1.0, z),
        shape: Shape::Sphere { radius: 1.0 },
        layer: OBSTACLE_LAYER,
    };

    Scenario {
        name: "Courtyard".into(),
        agents: vec![
            AgentSpec {
                tag: 1,
                archetype: AgentArchetype::Sentinel,
                position: DVec3::new(-8.0, 0.0, -8.0),
                waypoints: vec![DVec3::new(-8.0, 0.0, -8.0), DVec3::new(8.0, 0.0, -8.0)],
                ..Default::default()
            },
            AgentSpec {
                tag: 2,
                archetype: AgentArchetype::Stalker,
                position: DVec3::new(8.0, 0.0, 8.0),
                heading_degrees: 180.0,
                waypoints: vec![
                    DVec3::new(8.0, 0.0, 8.0),
                    DVec3::new(-8.0, 0.0, 8.0),
                    DVec3::new(-8.0, 0.0, 0.0),
                ],
                locomotion: Locomotion::Direct,
                ..Default::default()
            },
        ],
        obstacles: vec![
            pillar(-4.0, -4.0),
            pillar(4.0, -4.0),
            pillar(4.0, 4.0),
            pillar(-4.0, 4.0),
        ],
        target: TargetSpec {
            position: DVec3::new(-14.0, 0.0, -14.0),
            motion: TargetMotion::Path {
                points: vec![
                    DVec3::new(14.0, 0.0, -14.0),
                    DVec3::new(14.0, 0.0, 14.0),
                    DVec3::new(-14.0, 0.0, 14.0),
                    DVec3::new(-14.0, 0.0, -14.0),
                ],
                speed: 1.8,
            },
        },
    }
}

/// Half-width of the square area random routes are scattered over (m).
const RANDOM_AREA_HALF_WIDTH: f64 = 15.0;
const RANDOM_AGENT_COUNT: u32 = 3;
const RANDOM_WAYPOINT_COUNT: usize = 4;

/// "Random Patrol": ghosts on scattered routes, the target standing in the
/// middle. The layout depends only on the seed.
fn build_random_patrol(rng: &mut ChaCha8Rng) -> Scenario {
    let agents = (1..=RANDOM_AGENT_COUNT)
        .map(|tag| {
            let waypoints: Vec<DVec3> =
                (0..RANDOM_WAYPOINT_COUNT).map(|_| scatter(rng)).collect();
            AgentSpec {
                tag,
                position: waypoints[0],
                heading_degrees: rng.gen_range(0.0..360.0),
                waypoints,
                locomotion: if tag % 2 == 0 {
                    Locomotion::Direct
                } else {
                    Locomotion::Nav
                },
                ..Default::default()
            }
        })
        .collect();

    Scenario {
        name: "Random Patrol".into(),
        agents,
        obstacles: Vec::new(),
        target: TargetSpec::default(),
    }
}

/// Uniform point on the ground inside the random area.
fn scatter(rng: &mut ChaCha8Rng) -> DVec3 {
    DVec3::new(
        rng.gen_range(-RANDOM_AREA_HALF_WIDTH..RANDOM_AREA_HALF_WIDTH),
        0.0,
        rng.gen_range(-RANDOM_AREA_HALF_WIDTH..RANDOM_AREA_HALF_WIDTH),
    )
}
