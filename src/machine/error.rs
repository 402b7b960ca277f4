//! Transition request errors.

use thiserror::Error;

/// Reasons a transition request is rejected.
///
/// A rejected request never mutates the machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Transition to '{pending}' is already pending")]
    AlreadyPending { pending: String },

    #[error("Cannot transition to an empty state")]
    EmptyTarget,

    #[error("No state registered for '{token}'")]
    UnknownStateType { token: String },
}
