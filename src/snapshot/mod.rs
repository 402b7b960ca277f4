//! Point-in-time snapshots of a state machine.
//!
//! A snapshot records every counter of a machine together with the names of
//! its current, previous and pending states. State instances themselves are
//! opaque, so snapshots are for inspection, logging and replay diffs rather
//! than for resuming a machine.

use crate::core::{StateRef, TransitionRecord};
#[cfg(doc)]
use crate::core::State;
use crate::machine::StateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable view of a machine at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// [`State::name`] of the current state
    pub current: Option<String>,

    /// Time accumulated in the current state
    pub current_time: f32,

    /// Updates since the current state was entered
    pub current_updates: u64,

    /// [`State::name`] of the previous state
    pub previous: Option<String>,

    /// Time spent in the previous state before it was left
    pub previous_time: f32,

    /// Updates the previous state received before it was left
    pub previous_updates: u64,

    /// [`State::name`] of the pending state, if a transition is queued
    pub next: Option<String>,

    /// `delta_time` of the most recent update
    pub delta_time: f32,

    /// Sum of every `delta_time` the machine has seen
    pub total_time: f32,

    /// Number of `update` calls
    pub total_updates: u64,

    /// Number of committed transitions
    pub total_transitions: u64,

    /// Whether the machine reuses one instance per variant
    pub caches_states: bool,

    /// [`State::name`] of every cached instance, sorted
    pub cached_states: Vec<String>,

    /// Retained transition history, oldest first. Records also carry
    /// [`State::name`] values
    pub history: Vec<TransitionRecord>,
}

impl MachineSnapshot {
    /// Capture the machine's current bookkeeping.
    pub fn capture(machine: &StateMachine) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            current: machine.current().map(StateRef::name),
            current_time: machine.current_time(),
            current_updates: machine.current_updates(),
            previous: machine.previous().map(StateRef::name),
            previous_time: machine.previous_time(),
            previous_updates: machine.previous_updates(),
            next: machine.next().map(StateRef::name),
            delta_time: machine.delta_time(),
            total_time: machine.total_time(),
            total_updates: machine.total_updates(),
            total_transitions: machine.total_transitions(),
            caches_states: machine.caches_states(),
            cached_states: machine.cached_names(),
            history: machine.history().records().cloned().collect(),
        }
    }

    /// True if the snapshot was taken on the tick its current state was
    /// entered.
    pub fn entered(&self) -> bool {
        self.current_updates == 0
    }

    /// True if a transition was pending.
    pub fn exiting(&self) -> bool {
        self.next.is_some()
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode from JSON, rejecting other format versions.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate_version()
    }

    /// Encode in a compact binary form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode from [`to_bytes`](MachineSnapshot::to_bytes) output, rejecting
    /// other format versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate_version()
    }

    fn validate_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}

impl StateMachine {
    /// Capture a [`MachineSnapshot`] of this machine.
    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot::capture(self)
    }
}
