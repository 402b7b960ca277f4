//! Bounded log of committed transitions.
//!
//! Records store state names rather than handles, so keeping a history never
//! extends the lifetime of a state instance.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Record of a single committed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being left, `None` for the first transition
    pub from: Option<String>,
    /// The state being entered
    pub to: String,
    /// Value of `total_updates` on the committing tick
    pub tick: u64,
    /// Updates spent in the state being left
    pub updates_in_previous: u64,
    /// Time spent in the state being left
    pub time_in_previous: f32,
    /// Value of `total_time` on the committing tick
    pub total_time: f32,
}

/// Ring buffer of the most recent transitions.
///
/// A log created with capacity zero is disabled and ignores every record,
/// which keeps the machine allocation-free on the commit path.
///
/// # Example
///
/// ```rust
/// use tickstate::core::{TransitionLog, TransitionRecord};
///
/// let mut log = TransitionLog::new(2);
/// for (from, to) in [(None, "Idle"), (Some("Idle"), "Walk"), (Some("Walk"), "Run")] {
///     log.record(TransitionRecord {
///         from: from.map(str::to_owned),
///         to: to.to_owned(),
///         tick: 0,
///         updates_in_previous: 0,
///         time_in_previous: 0.0,
///         total_time: 0.0,
///     });
/// }
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.path(), vec!["Idle", "Walk", "Run"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "StoredLog")]
pub struct TransitionLog {
    capacity: usize,
    records: VecDeque<TransitionRecord>,
}

/// Wire form of [`TransitionLog`], bounded on conversion.
#[derive(Deserialize)]
struct StoredLog {
    capacity: usize,
    records: VecDeque<TransitionRecord>,
}

impl From<StoredLog> for TransitionLog {
    /// Keeps only the newest `capacity` records.
    fn from(stored: StoredLog) -> Self {
        let StoredLog {
            capacity,
            mut records,
        } = stored;
        let excess = records.len().saturating_sub(capacity);
        records.drain(..excess);
        Self { capacity, records }
    }
}

impl TransitionLog {
    /// Create a log holding at most `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity),
        }
    }

    /// Whether the log keeps records at all.
    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Maximum number of records retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of records currently retained.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no transition has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record, dropping the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord) {
        if !self.is_enabled() {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Records from oldest to newest.
    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> + '_ {
        self.records.iter()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    /// Names of the states visited, oldest first.
    ///
    /// Starts with the `from` of the oldest retained record (when it has one),
    /// followed by the `to` of every record.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(from) = self.records.front().and_then(|r| r.from.as_deref()) {
            path.push(from);
        }
        path.extend(self.records.iter().map(|r| r.to.as_str()));
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: Option<&str>, to: &str, tick: u64) -> TransitionRecord {
        TransitionRecord {
            from: from.map(str::to_owned),
            to: to.to_owned(),
            tick,
            updates_in_previous: 0,
            time_in_previous: 0.0,
            total_time: 0.0,
        }
    }

    #[test]
    fn disabled_log_ignores_records() {
        let mut log = TransitionLog::new(0);
        log.record(record(None, "Idle", 1));

        assert!(!log.is_enabled());
        assert!(log.is_empty());
        assert!(log.path().is_empty());
        assert!(log.last().is_none());
    }

    #[test]
    fn records_are_kept_in_order() {
        let mut log = TransitionLog::new(8);
        log.record(record(None, "Idle", 1));
        log.record(record(Some("Idle"), "Walk", 4));

        let ticks: Vec<u64> = log.records().map(|r| r.tick).collect();
        assert_eq!(ticks, vec![1, 4]);
        assert_eq!(log.last().unwrap().to, "Walk");
        assert_eq!(log.path(), vec!["Idle", "Walk"]);
    }

    #[test]
    fn full_log_drops_oldest() {
        let mut log = TransitionLog::new(2);
        log.record(record(None, "A", 1));
        log.record(record(Some("A"), "B", 2));
        log.record(record(Some("B"), "C", 3));

        assert_eq!(log.len(), 2);
        assert_eq!(log.capacity(), 2);
        assert_eq!(log.records().next().unwrap().tick, 2);
        assert_eq!(log.path(), vec!["A", "B", "C"]);
    }

    #[test]
    fn log_serializes_correctly() {
        let mut log = TransitionLog::new(4);
        log.record(record(None, "Idle", 1));

        let json = serde_json::to_string(&log).unwrap();
        let deserialized: TransitionLog = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.capacity(), 4);
        assert_eq!(deserialized.last(), log.last());
    }

    #[test]
    fn oversized_log_is_trimmed_on_load() {
        let json = r#"{"capacity":2,"records":[
            {"from":null,"to":"A","tick":1,"updates_in_previous":0,"time_in_previous":0.0,"total_time":0.0},
            {"from":"A","to":"B","tick":2,"updates_in_previous":0,"time_in_previous":0.0,"total_time":0.0},
            {"from":"B","to":"C","tick":3,"updates_in_previous":0,"time_in_previous":0.0,"total_time":0.0}
        ]}"#;

        let mut log: TransitionLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.path(), vec!["A", "B", "C"]);

        log.record(record(Some("C"), "D", 4));
        assert_eq!(log.len(), 2);
        assert_eq!(log.path(), vec!["B", "C", "D"]);
    }

    #[test]
    fn disabled_log_loads_empty() {
        let json = r#"{"capacity":0,"records":[
            {"from":null,"to":"A","tick":1,"updates_in_previous":0,"time_in_previous":0.0,"total_time":0.0}
        ]}"#;

        let log: TransitionLog = serde_json::from_str(json).unwrap();
        assert!(!log.is_enabled());
        assert!(log.is_empty());
    }
}
