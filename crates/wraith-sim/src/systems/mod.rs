//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components.

pub mod ghost_ai;
pub mod navigation;
pub mod snapshot;
pub mod target_motion;
pub mod triggers;
