//! External Dispatchers for Unidirectional Stores
//!
//! Lets code outside a store (event listeners, poll loops, push streams)
//! dispatch actions into it without ever holding the store. A store
//! enhancer hands each external dispatcher a dispatch-only capability once,
//! at store creation; the dispatchers decide when to use it.
//!
//! # Features
//!
//! - **Narrow capability**: dispatchers get `dispatch` and nothing else
//! - **Change detection**: dispatch on every notification or only on change
//! - **Push sources**: map `next`, `error` and `complete` to actions
//! - **Composable**: a plain store enhancer, ordered like any other
//!
//! # Quick Start
//!
//! ```rust
//! use external_dispatch::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Debug, Clone)]
//! enum Action {
//!     Online(bool),
//! }
//!
//! // A listener registry standing in for a platform event source
//! let listeners: Arc<Mutex<Vec<Callback>>> = Arc::default();
//! let registry = Arc::clone(&listeners);
//! let online = Arc::new(Mutex::new(true));
//! let reader = Arc::clone(&online);
//!
//! let connectivity = on_change(ExternalSource::new(
//!     move || Some(*reader.lock().unwrap()),
//!     move |callback| registry.lock().unwrap().push(callback),
//!     Action::Online,
//! ));
//!
//! let store = create_store(
//!     reducer(|_: &bool, action: &Action| match action {
//!         Action::Online(online) => *online,
//!     }),
//!     true,
//!     Some(apply_external_dispatchers(vec![connectivity])),
//! );
//!
//! *online.lock().unwrap() = false;
//! listeners.lock().unwrap().iter().for_each(|callback| callback());
//!
//! assert!(!store.state());
//! ```
//!
//! # Architecture
//!
//! ```text
//! apply_external_dispatchers([d1, d2, ...])
//!     │
//!     └── StoreEnhancer
//!             │
//!             ├── store = inner_creator(reducer, initial_state)
//!             ├── capability = DispatchCapability(store.dispatch)
//!             ├── d1(&capability), d2(&capability), ...
//!             │       │
//!             │       └── every / on_change / on_change_starting_with
//!             │               register(callback) ── callback() → get → dispatch
//!             │           from_observable
//!             │               subscribe(observer) ── next/error/complete → dispatch
//!             │
//!             └── store
//! ```

// Modules
pub mod capability;
pub mod compose;
pub mod creators;
pub mod enhancer;
pub mod error;
pub mod logging;
pub mod observable;
pub mod source;

// Re-exports - Public API
pub use capability::{external_dispatcher, DispatchCapability, ExternalDispatcher};
pub use creators::{every, from_observable, on_change, on_change_starting_with};
pub use enhancer::apply_external_dispatchers;
pub use error::{ExternalDispatchError, Result};
pub use logging::{init_logging, init_logging_from_env, LoggingError, LoggingMode};
pub use observable::{Observable, ObservableActionCreators, ObservableActionCreatorsBuilder, Observer};
pub use source::{ActionCreator, Callback, ExternalSource, Getter, Identity, Registrar};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::capability::{external_dispatcher, DispatchCapability, ExternalDispatcher};
    pub use crate::compose;
    pub use crate::creators::{every, from_observable, on_change, on_change_starting_with};
    pub use crate::enhancer::apply_external_dispatchers;
    pub use crate::observable::{Observable, ObservableActionCreators, Observer};
    pub use crate::source::{Callback, ExternalSource, Identity};
    pub use dispatch_store::{compose_enhancers, create_store, reducer, Store};
}
