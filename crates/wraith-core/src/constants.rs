//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Perception ---

/// Detection radius (m).
pub const DEFAULT_DETECTION_RADIUS: f64 = 10.0;

/// Full field-of-view cone angle (degrees).
pub const DEFAULT_FIELD_OF_VIEW_DEG: f64 = 120.0;

/// Maximum allowed field-of-view cone angle (degrees).
pub const MAX_FIELD_OF_VIEW_DEG: f64 = 180.0;

/// Height of the sight probe origin above the agent position (m).
pub const DEFAULT_EYE_HEIGHT: f64 = 0.5;

/// Layer index for obstacles that block sight.
pub const OBSTACLE_LAYER: u32 = 0;

/// Layer index for the tracked target.
pub const TARGET_LAYER: u32 = 1;

// --- Motion ---

/// Speed while patrolling (m/s).
pub const DEFAULT_PATROL_SPEED: f64 = 2.0;

/// Speed while chasing (m/s).
pub const DEFAULT_CHASE_SPEED: f64 = 4.0;

/// Remaining distance at which a waypoint counts as reached (m).
pub const DEFAULT_WAYPOINT_THRESHOLD: f64 = 0.3;

/// Pause at each waypoint (s).
pub const DEFAULT_WAIT_AT_WAYPOINT_SECS: f64 = 1.0;

/// Distance at which the target counts as caught (m).
pub const DEFAULT_KILL_DISTANCE: f64 = 1.5;

/// Grace period after losing sight before returning to patrol (s).
pub const DEFAULT_LOSS_TIMEOUT_SECS: f64 = 3.0;

/// Angular smoothing factor for turning toward the target (per second).
pub const DEFAULT_TURN_SMOOTHING: f64 = 10.0;

// --- Simulation host ---

/// Collision radius of the target body (m).
pub const TARGET_BODY_RADIUS: f64 = 0.4;

/// Height of the target body above its position (m).
pub const TARGET_BODY_HEIGHT: f64 = 1.8;

/// Default radius of an agent's trigger volume (m).
pub const DEFAULT_TRIGGER_RADIUS: f64 = 1.0;

/// Planar movement below this per tick does not count as walking (m).
pub const WALK_EPSILON: f64 = 1e-4;
