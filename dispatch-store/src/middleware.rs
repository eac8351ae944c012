//! Middleware chain around dispatch
//!
//! Middleware sees every action dispatched through the enhanced store before
//! the reducer does. Each middleware receives the action and the `next`
//! dispatch function in the chain; it may forward the action, drop it,
//! transform it, or dispatch additional actions through the full chain.
//!
//! ```text
//! store.dispatch(action)
//!     → middleware[0].handle(api, action, next₀)
//!         → middleware[1].handle(api, action, next₁)
//!             → raw dispatch (reducer + listeners)
//! ```

use std::fmt::Debug;
use std::sync::{Arc, OnceLock, Weak};

use tracing::{debug, warn};

use crate::enhancer::{StoreCreator, StoreEnhancer};
use crate::store::{Dispatch, Store};

/// A link in the dispatch chain
///
/// Closures with the matching signature implement this trait, so simple
/// middleware can be written inline.
pub trait Middleware<S, A>: Send + Sync {
    /// Handle an action, forwarding it with `next(action)` to continue the chain
    fn handle(&self, api: &MiddlewareApi<S, A>, action: A, next: &Dispatch<A>);
}

impl<S, A, F> Middleware<S, A> for F
where
    F: Fn(&MiddlewareApi<S, A>, A, &Dispatch<A>) + Send + Sync,
{
    fn handle(&self, api: &MiddlewareApi<S, A>, action: A, next: &Dispatch<A>) {
        self(api, action, next)
    }
}

/// Store access handed to middleware
///
/// `dispatch` goes through the complete chain, including the calling
/// middleware, so dispatching the same action unconditionally recurses.
pub struct MiddlewareApi<S, A> {
    store: Store<S, A>,
    chain: Arc<OnceLock<WeakDispatch<A>>>,
}

type WeakDispatch<A> = Weak<dyn Fn(A) + Send + Sync>;

impl<S, A> MiddlewareApi<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    /// Get a clone of the current state
    pub fn state(&self) -> S {
        self.store.state()
    }

    /// Read the current state through a closure
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        self.store.with_state(f)
    }

    /// Dispatch an action through the full middleware chain
    pub fn dispatch(&self, action: A) {
        match self.chain.get().and_then(Weak::upgrade) {
            Some(dispatch) => dispatch(action),
            None => warn!("middleware chain is not available; action dropped"),
        }
    }
}

impl<S, A> Clone for MiddlewareApi<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            chain: Arc::clone(&self.chain),
        }
    }
}

/// Create an enhancer that routes dispatch through `middlewares`
///
/// The first middleware is the outermost link and sees each action first.
pub fn apply_middleware<S, A>(middlewares: Vec<Arc<dyn Middleware<S, A>>>) -> StoreEnhancer<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    let middlewares = Arc::new(middlewares);

    StoreEnhancer::new(move |create| {
        let middlewares = Arc::clone(&middlewares);

        StoreCreator::new(move |reducer, initial_state, enhancer| {
            let store = create.create(reducer, initial_state, enhancer);
            let chain: Arc<OnceLock<WeakDispatch<A>>> = Arc::new(OnceLock::new());
            let api = MiddlewareApi {
                store: store.clone(),
                chain: Arc::clone(&chain),
            };

            let dispatch = middlewares
                .iter()
                .rev()
                .fold(store.dispatcher(), |next, middleware| {
                    let middleware = Arc::clone(middleware);
                    let api = api.clone();
                    let link: Dispatch<A> =
                        Arc::new(move |action: A| middleware.handle(&api, action, &next));
                    link
                });

            // Weak so the chain does not keep itself alive through the api
            let _ = chain.set(Arc::downgrade(&dispatch));
            debug!(middleware_count = middlewares.len(), "middleware chain installed");

            store.with_dispatcher(dispatch)
        })
    })
}

/// Middleware that logs every action at debug level before forwarding it
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl<S, A> Middleware<S, A> for LoggingMiddleware
where
    A: Debug,
{
    fn handle(&self, _api: &MiddlewareApi<S, A>, action: A, next: &Dispatch<A>) {
        debug!(action = ?action, "dispatching action");
        next(action)
    }
}
