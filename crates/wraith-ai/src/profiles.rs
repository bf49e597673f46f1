//! Archetype-specific tuning presets.

use wraith_core::config::{AgentConfig, MotionConfig, PerceptionConfig};
use wraith_core::enums::AgentArchetype;

/// Get the tuning preset for a given archetype.
pub fn get_profile(archetype: AgentArchetype) -> AgentConfig {
    match archetype {
        AgentArchetype::Ghost => AgentConfig::default(),
        AgentArchetype::Sentinel => AgentConfig {
            perception: PerceptionConfig {
                detection_radius: 18.0,
                field_of_view_degrees: 60.0,
                eye_height: 1.6,
                ..Default::default()
            },
            motion: MotionConfig {
                patrol_speed: 1.2,
                chase_speed: 3.0,
                wait_at_waypoint_secs: 3.0,
                loss_timeout_secs: 1.5,
                turn_smoothing: 6.0,
                ..Default::default()
            },
        },
        AgentArchetype::Stalker => AgentConfig {
            perception: PerceptionConfig {
                detection_radius: 12.0,
                field_of_view_degrees: 170.0,
                ..Default::default()
            },
            motion: MotionConfig {
                patrol_speed: 2.5,
                chase_speed: 5.5,
                wait_at_waypoint_secs: 0.5,
                kill_distance: 1.2,
                loss_timeout_secs: 6.0,
                turn_smoothing: 14.0,
                ..Default::default()
            },
        },
    }
}
