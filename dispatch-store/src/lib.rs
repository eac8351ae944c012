//! Generic Unidirectional Store
//!
//! A small, thread-safe state container in which state only changes by
//! dispatching actions through a reducer.
//!
//! # Features
//!
//! - **Reducer-driven**: `(state, action) -> state`, applied under a write lock
//! - **Replaceable Dispatch**: Store enhancers can wrap the dispatch function
//! - **Middleware**: Intercept, transform or fan out actions before reduction
//! - **Listeners**: Get notified after every reduced action
//! - **Blocking Iteration**: Consume state snapshots via blocking iterators
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use dispatch_store::{apply_middleware, create_store, reducer, LoggingMiddleware, Middleware};
//!
//! #[derive(Debug, Clone)]
//! enum Action {
//!     Increment,
//!     Set(i64),
//! }
//!
//! let logging: Arc<dyn Middleware<i64, Action>> = Arc::new(LoggingMiddleware::new());
//! let store = create_store(
//!     reducer(|count: &i64, action: &Action| match action {
//!         Action::Increment => count + 1,
//!         Action::Set(value) => *value,
//!     }),
//!     0,
//!     Some(apply_middleware(vec![logging])),
//! );
//!
//! store.dispatch(Action::Set(41));
//! store.dispatch(Action::Increment);
//! assert_eq!(store.state(), 42);
//! ```
//!
//! # Iteration Patterns
//!
//! ```rust,ignore
//! // Blocking iteration (waits for dispatches)
//! for change in store.changes() {
//!     println!("#{} -> {:?}", change.sequence, change.state);
//! }
//!
//! // Non-blocking (drains queued snapshots)
//! for change in store.changes().try_iter() {
//!     println!("{:?}", change.state);
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! create_store(reducer, initial_state, enhancer)
//!     │
//!     └── enhancer.apply(StoreCreator::base())
//!             │
//!             └── Store<S, A> { dispatch, core }
//!                     │
//!                     ├── dispatch → middleware chain → reducer
//!                     │
//!                     └── listeners → StateChanges<S, A>
//! ```

// Modules
pub mod enhancer;
pub mod event;
pub mod iter;
pub mod middleware;
pub mod store;

// Re-exports - Public API
pub use enhancer::{compose_enhancers, StoreCreator, StoreEnhancer};
pub use event::StateChange;
pub use iter::{StateChanges, TimeoutIter, TryIter};
pub use middleware::{apply_middleware, LoggingMiddleware, Middleware, MiddlewareApi};
pub use store::{create_store, reducer, Dispatch, Listener, ListenerId, Reducer, Store};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::enhancer::{compose_enhancers, StoreCreator, StoreEnhancer};
    pub use crate::event::StateChange;
    pub use crate::middleware::{apply_middleware, Middleware, MiddlewareApi};
    pub use crate::store::{create_store, reducer, Dispatch, Reducer, Store};
}
