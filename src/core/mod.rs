//! Core state types.
//!
//! This module contains the pieces every machine is built from:
//! - State definitions via the `State` trait
//! - Shared, identity-compared handles to state instances
//! - Bounded transition history

mod history;
mod state;

pub use history::{TransitionLog, TransitionRecord};
pub use state::{shared, Shared, State, StateRef};
pub(crate) use state::short_type_name;
