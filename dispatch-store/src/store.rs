//! Unidirectional state store
//!
//! This module provides the core store primitives:
//! - `Store<S, A>`: a cheap-clone handle over shared state, a reducer and listeners
//! - `Dispatch<A>`: the replaceable function every action goes through
//! - `create_store`: builds a store, optionally through a `StoreEnhancer`
//!
//! # Architecture
//!
//! ```text
//! Store<S, A>
//!     │
//!     ├── dispatch: Dispatch<A>        (replaceable by enhancers)
//!     │       │
//!     │       └── ... middleware ... → StoreCore::dispatch (raw)
//!     │
//!     └── core: Arc<StoreCore<S, A>>
//!             ├── state: RwLock<S>
//!             ├── reducer: Reducer<S, A>
//!             └── listeners: Mutex<Vec<(ListenerId, Listener)>>
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use crate::enhancer::StoreEnhancer;
use crate::event::StateChange;
use crate::iter::StateChanges;

/// Function every action is dispatched through
pub type Dispatch<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Pure state transition: `(current state, action) -> next state`
pub type Reducer<S, A> = Arc<dyn Fn(&S, &A) -> S + Send + Sync>;

/// Callback invoked after every reduced action
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Wrap a closure as a [`Reducer`]
pub fn reducer<S, A, F>(f: F) -> Reducer<S, A>
where
    F: Fn(&S, &A) -> S + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Identifier returned by [`Store::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

// ============================================================================
// StoreCore - state, reducer and listeners shared by every handle
// ============================================================================

pub(crate) struct StoreCore<S, A> {
    state: RwLock<S>,
    reducer: Reducer<S, A>,
    listeners: Mutex<Vec<(ListenerId, Listener)>>,
    next_listener_id: AtomicU64,
    dispatch_count: AtomicU64,
}

impl<S, A> StoreCore<S, A> {
    /// Reduce an action and notify listeners
    ///
    /// The state lock is released before listeners run, so a listener may
    /// dispatch, read state or unsubscribe.
    fn dispatch(&self, action: A) {
        {
            let mut state = self.state.write();
            let next = (self.reducer)(&state, &action);
            *state = next;
        }

        let sequence = self.dispatch_count.fetch_add(1, Ordering::SeqCst) + 1;
        trace!(sequence, "action reduced");

        // Snapshot so listeners can (un)subscribe while being notified
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener();
        }
    }

    fn subscribe(&self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener_id.fetch_add(1, Ordering::SeqCst));
        self.listeners.lock().push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }
}

// ============================================================================
// Store<S, A>
// ============================================================================

/// Unidirectional state container
///
/// State only changes by dispatching actions through the store's dispatch
/// function, which ends in the reducer. Store enhancers (middleware, external
/// dispatchers) may replace the dispatch function of the handle they return;
/// every clone of a handle shares the same state and listeners.
///
/// # Example
///
/// ```rust
/// use dispatch_store::{create_store, reducer};
///
/// let store = create_store(reducer(|count: &i32, delta: &i32| count + delta), 0, None);
///
/// store.dispatch(2);
/// store.dispatch(3);
///
/// assert_eq!(store.state(), 5);
/// ```
pub struct Store<S, A> {
    core: Arc<StoreCore<S, A>>,
    dispatch: Dispatch<A>,
}

impl<S, A> Store<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    /// Create a store with no enhancer applied
    pub fn new(reducer: Reducer<S, A>, initial_state: S) -> Self {
        let core = Arc::new(StoreCore {
            state: RwLock::new(initial_state),
            reducer,
            listeners: Mutex::new(Vec::new()),
            next_listener_id: AtomicU64::new(0),
            dispatch_count: AtomicU64::new(0),
        });

        let raw = Arc::clone(&core);
        let dispatch: Dispatch<A> = Arc::new(move |action| raw.dispatch(action));

        debug!("store created");
        Self { core, dispatch }
    }

    /// Dispatch an action through this handle's dispatch function
    pub fn dispatch(&self, action: A) {
        (self.dispatch)(action)
    }

    /// Get this handle's dispatch function
    pub fn dispatcher(&self) -> Dispatch<A> {
        Arc::clone(&self.dispatch)
    }

    /// Return the same store with its dispatch function replaced
    ///
    /// State, reducer and listeners stay shared with `self`.
    pub fn with_dispatcher(self, dispatch: Dispatch<A>) -> Self {
        Self {
            core: self.core,
            dispatch,
        }
    }

    /// Get a clone of the current state
    pub fn state(&self) -> S {
        self.core.state.read().clone()
    }

    /// Read the current state through a closure without cloning it
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.core.state.read())
    }

    /// Register a listener called after every reduced action
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.core.subscribe(Arc::new(listener))
    }

    /// Remove a listener, returning whether it was registered
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.core.unsubscribe(id)
    }

    /// Create a blocking iterator over state snapshots
    ///
    /// A snapshot is taken after every reduced action. The underlying
    /// listener is removed when the iterator is dropped.
    pub fn changes(&self) -> StateChanges<S, A> {
        let (tx, rx) = mpsc::channel();
        let weak: Weak<StoreCore<S, A>> = Arc::downgrade(&self.core);

        let listener_id = self.subscribe(move || {
            if let Some(core) = weak.upgrade() {
                let state = core.state.read().clone();
                let sequence = core.dispatch_count.load(Ordering::SeqCst);
                let _ = tx.send(StateChange::new(state, sequence));
            }
        });

        StateChanges::new(rx, listener_id, Arc::downgrade(&self.core))
    }

    /// Number of actions reduced so far
    pub fn dispatch_count(&self) -> u64 {
        self.core.dispatch_count.load(Ordering::SeqCst)
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.core.listeners.lock().len()
    }
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            dispatch: Arc::clone(&self.dispatch),
        }
    }
}

impl<S, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("dispatch_count", &self.core.dispatch_count.load(Ordering::SeqCst))
            .field("listener_count", &self.core.listeners.lock().len())
            .finish()
    }
}

// ============================================================================
// create_store
// ============================================================================

/// Create a store, optionally through an enhancer
///
/// With an enhancer, the store is built by the enhancer's wrapped creator:
/// `enhancer.apply(StoreCreator::base()).create(reducer, initial_state, None)`.
pub fn create_store<S, A>(
    reducer: Reducer<S, A>,
    initial_state: S,
    enhancer: Option<StoreEnhancer<S, A>>,
) -> Store<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    match enhancer {
        Some(enhancer) => enhancer
            .apply(crate::enhancer::StoreCreator::base())
            .create(reducer, initial_state, None),
        None => Store::new(reducer, initial_state),
    }
}
