//! Agent tuning parameters, supplied once at construction.
//!
//! Every field has a serde default so scenario files only need to list
//! the values they override.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::LayerMask;

/// What the agent can perceive and how.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionConfig {
    /// Maximum detection distance (m). Must be > 0.
    pub detection_radius: f64,
    /// Full cone angle in degrees, [0, 180]. The test uses half of it.
    pub field_of_view_degrees: f64,
    /// Sight probe origin above the agent position (m).
    pub eye_height: f64,
    /// Layers that block sight.
    pub obstacle_layers: LayerMask,
    /// Layers the target lives on.
    pub target_layers: LayerMask,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            detection_radius: DEFAULT_DETECTION_RADIUS,
            field_of_view_degrees: DEFAULT_FIELD_OF_VIEW_DEG,
            eye_height: DEFAULT_EYE_HEIGHT,
            obstacle_layers: LayerMask::layer(OBSTACLE_LAYER),
            target_layers: LayerMask::layer(TARGET_LAYER),
        }
    }
}

impl PerceptionConfig {
    /// Half of the field of view, in radians.
    pub fn half_fov_radians(&self) -> f64 {
        (self.field_of_view_degrees * 0.5).to_radians()
    }

    /// Layer filter for the sight probe.
    pub fn probe_layers(&self) -> LayerMask {
        self.obstacle_layers.union(self.target_layers)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("detection_radius", self.detection_radius)?;
        if self.detection_radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius(self.detection_radius));
        }
        if !self.field_of_view_degrees.is_finite()
            || !(0.0..=MAX_FIELD_OF_VIEW_DEG).contains(&self.field_of_view_degrees)
        {
            return Err(ConfigError::FieldOfViewOutOfRange(self.field_of_view_degrees));
        }
        check_non_negative("eye_height", self.eye_height)?;
        Ok(())
    }
}

/// Speeds, thresholds and timers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub patrol_speed: f64,
    pub chase_speed: f64,
    /// Remaining distance at which a waypoint counts as reached.
    pub waypoint_threshold: f64,
    pub wait_at_waypoint_secs: f64,
    /// Distance at which the target is caught.
    pub kill_distance: f64,
    /// Seconds to keep chasing after the last detection.
    pub loss_timeout_secs: f64,
    /// Turn rate factor used when facing the target without a locomotion service.
    pub turn_smoothing: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            patrol_speed: DEFAULT_PATROL_SPEED,
            chase_speed: DEFAULT_CHASE_SPEED,
            waypoint_threshold: DEFAULT_WAYPOINT_THRESHOLD,
            wait_at_waypoint_secs: DEFAULT_WAIT_AT_WAYPOINT_SECS,
            kill_distance: DEFAULT_KILL_DISTANCE,
            loss_timeout_secs: DEFAULT_LOSS_TIMEOUT_SECS,
            turn_smoothing: DEFAULT_TURN_SMOOTHING,
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("patrol_speed", self.patrol_speed)?;
        check_non_negative("chase_speed", self.chase_speed)?;
        check_non_negative("waypoint_threshold", self.waypoint_threshold)?;
        check_non_negative("wait_at_waypoint_secs", self.wait_at_waypoint_secs)?;
        check_non_negative("kill_distance", self.kill_distance)?;
        check_non_negative("loss_timeout_secs", self.loss_timeout_secs)?;
        check_non_negative("turn_smoothing", self.turn_smoothing)?;
        Ok(())
    }
}

/// Complete tuning for one agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub perception: PerceptionConfig,
    pub motion: MotionConfig,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.perception.validate()?;
        self.motion.validate()
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field, value });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}
