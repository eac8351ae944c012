//! Blocking iterator over state snapshots
//!
//! Provides various iteration patterns for consuming snapshots:
//! - Blocking: `recv()`, `for change in changes`
//! - Non-blocking: `try_recv()`, `try_iter()`
//! - Timeout: `recv_timeout()`, `timeout_iter()`

use std::sync::{mpsc, Weak};
use std::time::Duration;

use parking_lot::Mutex;

use crate::event::StateChange;
use crate::store::{ListenerId, StoreCore};

/// Blocking iterator over state snapshots
///
/// Created by [`Store::changes`](crate::Store::changes). Receives one
/// snapshot per reduced action via `std::sync::mpsc`. All methods are
/// synchronous. Dropping the iterator unsubscribes it from the store.
///
/// # Example
///
/// ```rust,ignore
/// // Blocking iteration
/// for change in store.changes() {
///     println!("state is now {:?}", change.state);
/// }
///
/// // With timeout
/// if let Some(change) = store.changes().recv_timeout(Duration::from_secs(1)) {
///     println!("got {:?}", change);
/// }
/// ```
pub struct StateChanges<S, A> {
    rx: Mutex<mpsc::Receiver<StateChange<S>>>,
    listener_id: ListenerId,
    core: Weak<StoreCore<S, A>>,
}

impl<S, A> StateChanges<S, A> {
    pub(crate) fn new(
        rx: mpsc::Receiver<StateChange<S>>,
        listener_id: ListenerId,
        core: Weak<StoreCore<S, A>>,
    ) -> Self {
        Self {
            rx: Mutex::new(rx),
            listener_id,
            core,
        }
    }

    /// Block until the next snapshot is available
    ///
    /// Returns `None` if the store has been dropped.
    pub fn recv(&self) -> Option<StateChange<S>> {
        self.rx.lock().recv().ok()
    }

    /// Block until the next snapshot or timeout expires
    ///
    /// Returns `None` if the timeout expires or the store has been dropped.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<StateChange<S>> {
        self.rx.lock().recv_timeout(timeout).ok()
    }

    /// Try to receive a snapshot without blocking
    pub fn try_recv(&self) -> Option<StateChange<S>> {
        self.rx.lock().try_recv().ok()
    }

    /// Get a non-blocking iterator over currently queued snapshots
    pub fn try_iter(&self) -> TryIter<'_, S, A> {
        TryIter { inner: self }
    }

    /// Get a blocking iterator with timeout
    ///
    /// Stops when a call to `next()` waits `timeout` without a snapshot.
    pub fn timeout_iter(&self, timeout: Duration) -> TimeoutIter<'_, S, A> {
        TimeoutIter {
            inner: self,
            timeout,
        }
    }
}

impl<S, A> Iterator for StateChanges<S, A> {
    type Item = StateChange<S>;

    /// Block until the next snapshot
    fn next(&mut self) -> Option<Self::Item> {
        self.recv()
    }
}

impl<S, A> Drop for StateChanges<S, A> {
    fn drop(&mut self) {
        if let Some(core) = self.core.upgrade() {
            core.unsubscribe(self.listener_id);
        }
    }
}

/// Non-blocking iterator over currently queued snapshots
pub struct TryIter<'a, S, A> {
    inner: &'a StateChanges<S, A>,
}

impl<'a, S, A> Iterator for TryIter<'a, S, A> {
    type Item = StateChange<S>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.try_recv()
    }
}

/// Blocking iterator with timeout
pub struct TimeoutIter<'a, S, A> {
    inner: &'a StateChanges<S, A>,
    timeout: Duration,
}

impl<'a, S, A> Iterator for TimeoutIter<'a, S, A> {
    type Item = StateChange<S>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.recv_timeout(self.timeout)
    }
}
