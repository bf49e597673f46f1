//! Patrol/chase state machine.
//!
//! Pure function that computes the next state from the current one and
//! this tick's perception result. No side effects; entry actions are
//! applied by the controller.

use wraith_core::enums::AgentState;

/// Input to the state machine for a single tick.
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext {
    pub state: AgentState,
    pub detected: bool,
    /// Current simulation time (s).
    pub now: f64,
    /// Time of the last positive detection, if any.
    pub last_seen: Option<f64>,
    /// Grace period after losing sight (s).
    pub loss_timeout: f64,
}

/// Output from the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionUpdate {
    pub new_state: AgentState,
    pub last_seen: Option<f64>,
    pub state_changed: bool,
}

/// Evaluate the transition rules for one tick.
///
/// - detected: remember the time and chase.
/// - not detected for longer than the loss timeout (or never seen): patrol.
/// - otherwise keep the current state.
pub fn evaluate(ctx: &TransitionContext) -> TransitionUpdate {
    if ctx.detected {
        return TransitionUpdate {
            new_state: AgentState::Chase,
            last_seen: Some(ctx.now),
            state_changed: ctx.state != AgentState::Chase,
        };
    }

    if sight_lost(ctx) {
        return TransitionUpdate {
            new_state: AgentState::Patrol,
            last_seen: ctx.last_seen,
            state_changed: ctx.state != AgentState::Patrol,
        };
    }

    TransitionUpdate {
        new_state: ctx.state,
        last_seen: ctx.last_seen,
        state_changed: false,
    }
}

fn sight_lost(ctx: &TransitionContext) -> bool {
    match ctx.last_seen {
        Some(seen) => ctx.now - seen > ctx.loss_timeout,
        None => true,
    }
}
