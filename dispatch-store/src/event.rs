//! State snapshots emitted after dispatch
//!
//! Every reduced action produces a `StateChange` for each open
//! [`StateChanges`](crate::iter::StateChanges) iterator.

use std::time::Instant;

/// A snapshot of store state taken right after an action was reduced
///
/// # Example
///
/// ```rust,ignore
/// for change in store.changes() {
///     println!("after action #{}: {:?}", change.sequence, change.state);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StateChange<S> {
    /// State after the action was reduced
    pub state: S,

    /// Number of actions the store had reduced when the snapshot was taken
    pub sequence: u64,

    /// When the snapshot was taken
    pub timestamp: Instant,
}

impl<S> StateChange<S> {
    /// Create a new snapshot stamped with the current time
    pub fn new(state: S, sequence: u64) -> Self {
        Self {
            state,
            sequence,
            timestamp: Instant::now(),
        }
    }

    /// Create a new snapshot with a specific timestamp
    pub fn with_timestamp(state: S, sequence: u64, timestamp: Instant) -> Self {
        Self {
            state,
            sequence,
            timestamp,
        }
    }
}

impl<S: PartialEq> PartialEq for StateChange<S> {
    fn eq(&self, other: &Self) -> bool {
        // Timestamp not included in equality
        self.state == other.state && self.sequence == other.sequence
    }
}
