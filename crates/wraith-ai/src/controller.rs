//! Per-agent perception/chase controller.
//!
//! `PerceptionChaseController` owns one agent's state and is driven once per
//! tick. Each tick it runs perception, evaluates the state machine, applies
//! entry actions on a transition, then runs the active behavior. Everything
//! it needs from the outside world arrives through the ports in
//! `wraith_core::ports`.

use glam::DVec3;

use wraith_core::config::AgentConfig;
use wraith_core::constants::WALK_EPSILON;
use wraith_core::enums::{AgentState, DetectionOutcome, TriggerOverride};
use wraith_core::error::{ConfigError, ControllerError};
use wraith_core::events::AgentEvent;
use wraith_core::ports::{Clock, EventSink, LineOfSightQuery, LocomotionAdapter, TargetProvider};
use wraith_core::types::{planar_distance, EntityId, Pose, Waypoints};

use crate::fsm::{self, TransitionContext};
use crate::perception::{self, TargetPose};
use crate::{chase, patrol};

/// Mutable per-agent state. Only the controller writes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Agent {
    pub pose: Pose,
    pub state: AgentState,
    pub waypoint_index: usize,
    /// Seconds left to wait at the current waypoint; 0 when not waiting.
    pub wait_timer: f64,
    /// Time of the last positive detection.
    pub last_seen: Option<f64>,
    /// Set while the target is inside kill distance during a chase.
    pub inside_kill_radius: bool,
    /// Animation hint: the agent is moving this tick.
    pub walking: bool,
}

/// Collaborators read during one tick.
pub struct TickInputs<'a> {
    pub clock: &'a dyn Clock,
    pub target: &'a dyn TargetProvider,
    pub sight: &'a dyn LineOfSightQuery,
    /// Trigger-volume contact for this tick only.
    pub trigger: TriggerOverride,
}

/// Builds a controller, validating its configuration.
#[derive(Debug, Clone, Default)]
pub struct ControllerBuilder {
    config: AgentConfig,
    waypoints: Waypoints,
    pose: Pose,
    target: Option<EntityId>,
}

impl ControllerBuilder {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn waypoints(mut self, waypoints: impl Into<Waypoints>) -> Self {
        self.waypoints = waypoints.into();
        self
    }

    pub fn pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    /// Entity the agent hunts. Required.
    pub fn target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn build(self) -> Result<PerceptionChaseController, ControllerError> {
        let target = self.target.ok_or(ControllerError::MissingTarget)?;
        self.config.validate()?;
        Ok(PerceptionChaseController {
            agent: Agent {
                pose: self.pose,
                ..Default::default()
            },
            config: self.config,
            waypoints: self.waypoints,
            target,
            direct_mode_logged: false,
        })
    }
}

/// Patrol/chase state machine for one agent.
#[derive(Debug, Clone)]
pub struct PerceptionChaseController {
    agent: Agent,
    config: AgentConfig,
    waypoints: Waypoints,
    target: EntityId,
    direct_mode_logged: bool,
}

impl PerceptionChaseController {
    /// Advance the agent by one tick.
    ///
    /// `locomotion` is lent for the duration of the call; with `None` the
    /// agent moves itself in a straight line. Returns this tick's perception
    /// result.
    pub fn update(
        &mut self,
        inputs: &TickInputs<'_>,
        mut locomotion: Option<&mut dyn LocomotionAdapter>,
        events: &mut dyn EventSink,
    ) -> DetectionOutcome {
        let now = inputs.clock.now();
        let dt = inputs.clock.delta_time().max(0.0);
        let target_position = inputs.target.current_position();

        if locomotion.is_none() && !self.direct_mode_logged {
            log::debug!("no locomotion service attached, moving directly");
            self.direct_mode_logged = true;
        }

        let outcome = perception::detect_report(
            &self.agent.pose,
            &TargetPose {
                entity: self.target,
                position: target_position,
            },
            &self.config.perception,
            inputs.sight,
            inputs.trigger,
        );

        let transition = fsm::evaluate(&TransitionContext {
            state: self.agent.state,
            detected: outcome.is_detected(),
            now,
            last_seen: self.agent.last_seen,
            loss_timeout: self.config.motion.loss_timeout_secs,
        });
        self.agent.last_seen = transition.last_seen;

        if transition.state_changed {
            self.enter_state(
                transition.new_state,
                target_position,
                locomotion.as_deref_mut(),
                events,
            );
        }

        let start = self.agent.pose.position;
        match self.agent.state {
            AgentState::Patrol => patrol::update(
                &mut self.agent,
                &self.waypoints,
                &self.config.motion,
                dt,
                locomotion.as_deref_mut(),
            ),
            AgentState::Chase => {
                if let Some(distance) = chase::update(
                    &mut self.agent,
                    target_position,
                    &self.config.motion,
                    dt,
                    locomotion.as_deref_mut(),
                ) {
                    log::info!("target caught at {distance:.2} m");
                    events.emit(AgentEvent::TargetCaught { distance });
                }
            }
        }

        self.agent.walking = match locomotion.as_deref() {
            Some(loco) => loco.has_path() && loco.remaining_distance() > self.stopping_distance(),
            None => planar_distance(start, self.agent.pose.position) > WALK_EPSILON,
        };

        outcome
    }

    /// Switch behavior and run its entry action.
    fn enter_state<L: LocomotionAdapter + ?Sized>(
        &mut self,
        state: AgentState,
        target_position: DVec3,
        locomotion: Option<&mut L>,
        events: &mut dyn EventSink,
    ) {
        let from = self.agent.state;
        log::debug!("agent state {from:?} -> {state:?}");
        self.agent.state = state;
        self.agent.wait_timer = 0.0;
        self.agent.inside_kill_radius = false;

        if let Some(loco) = locomotion {
            match state {
                AgentState::Patrol => {
                    if let Some(point) = self.waypoints.get(self.agent.waypoint_index) {
                        patrol::command(loco, point, &self.config.motion);
                    }
                }
                AgentState::Chase => chase::command(loco, target_position, &self.config.motion),
            }
        }

        events.emit(AgentEvent::StateChanged { from, to: state });
    }

    fn stopping_distance(&self) -> f64 {
        match self.agent.state {
            AgentState::Patrol => self.config.motion.waypoint_threshold,
            AgentState::Chase => 0.0,
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn state(&self) -> AgentState {
        self.agent.state
    }

    pub fn pose(&self) -> Pose {
        self.agent.pose
    }

    /// Report where an external locomotion service has moved the agent.
    pub fn set_pose(&mut self, pose: Pose) {
        self.agent.pose = pose;
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Replace the tuning. Rejected values leave the current config in place.
    pub fn set_config(&mut self, config: AgentConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        if self.agent.wait_timer > config.motion.wait_at_waypoint_secs {
            self.agent.wait_timer = config.motion.wait_at_waypoint_secs;
        }
        Ok(())
    }

    pub fn waypoints(&self) -> &Waypoints {
        &self.waypoints
    }

    pub fn target(&self) -> EntityId {
        self.target
    }
}
