//! Core types and definitions for the WRAITH agent AI.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, configuration, ports to the host, events, commands,
//! snapshots and constants. It has no dependency on any runtime framework.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod ports;
pub mod state;
pub mod types;
