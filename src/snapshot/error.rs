//! Errors raised while encoding or decoding a [`MachineSnapshot`].
//!
//! [`MachineSnapshot`]: crate::snapshot::MachineSnapshot

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot could not be written as JSON or bincode
    #[error("Could not encode snapshot: {0}")]
    SerializationFailed(String),

    /// The input was not a well-formed JSON or bincode snapshot
    #[error("Could not decode snapshot: {0}")]
    DeserializationFailed(String),

    /// The input decoded, but was written by a different snapshot format
    #[error("Snapshot format v{found} cannot be read, expected v{supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
