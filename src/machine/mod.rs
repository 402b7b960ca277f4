//! The tick-driven state machine engine.
//!
//! # Key Concepts
//!
//! - **Deferred transitions**: requests are staged and committed by the next
//!   `update`, one at a time
//! - **Variant cache**: one persistent instance per state type, or a fresh
//!   instance per transition when caching is off
//! - **Registry**: resolves runtime type tokens to typed transitions
//! - **Timing**: per-state and per-machine elapsed time and update counters

mod cache;
mod engine;
pub mod error;
mod registry;

pub use engine::StateMachine;
pub use error::TransitionError;
pub use registry::StateRegistry;
