//! Committed-transition log.
//!
//! The machine appends one entry per committed dispatch. Failed dispatches
//! (no matching record, or a failing callback) never appear here. The log
//! is an immutable value: `record` returns a new log with the entry added.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One committed state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedTransition {
    /// The state held before the commit
    pub from: String,
    /// The event that triggered the transition
    pub event: String,
    /// The state committed
    pub to: String,
    /// When the commit happened
    pub timestamp: DateTime<Utc>,
}

/// Ordered log of committed transitions.
///
/// # Example
///
/// ```rust
/// use statetable::core::{CommittedTransition, TransitionLog};
/// use chrono::Utc;
///
/// let log = TransitionLog::new();
/// let log = log.record(CommittedTransition {
///     from: "opened".to_string(),
///     event: "close".to_string(),
///     to: "closed".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(log.transitions().len(), 1);
/// assert_eq!(log.path(), ["opened", "closed"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionLog {
    transitions: Vec<CommittedTransition>,
}

impl TransitionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, returning a new log. The original is unchanged.
    pub fn record(&self, transition: CommittedTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// All committed transitions, oldest first.
    pub fn transitions(&self) -> &[CommittedTransition] {
        &self.transitions
    }

    /// The states traversed: the first entry's `from`, then each `to`.
    /// Empty when nothing has committed yet.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(first.from.as_str());
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Elapsed time from the first commit to the last, `None` when the log
    /// is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
