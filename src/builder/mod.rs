//! Builder API and configuration for state machines.
//!
//! This module provides a fluent builder and a serde-backed configuration
//! for constructing machines with their options and registered variants.

pub mod config;
pub mod error;
pub mod machine;

pub use config::MachineConfig;
pub use error::ConfigError;
pub use machine::MachineBuilder;
