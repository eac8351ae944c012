//! Store enhancer that hands dispatch capability to external dispatchers

use std::sync::Arc;

use dispatch_store::{StoreCreator, StoreEnhancer};
use tracing::debug;

use crate::capability::{DispatchCapability, ExternalDispatcher};

/// Create a store enhancer that injects dispatch capability into external
/// dispatchers
///
/// The enhanced creator builds the store with the creator it wraps, captures
/// that store's dispatch function, then calls every dispatcher exactly once,
/// in order, with a [`DispatchCapability`] over the captured function. The
/// returned store dispatches through the same function.
///
/// # Ordering
///
/// Dispatchers only see the enhancers composed *inside* this one. Place
/// `apply_external_dispatchers` before `apply_middleware` in
/// [`compose_enhancers`](dispatch_store::compose_enhancers) for external
/// actions to pass through middleware; placed after, they reach the reducer
/// directly.
///
/// # Example
///
/// ```rust
/// use dispatch_store::{apply_middleware, compose_enhancers, create_store, reducer, LoggingMiddleware, Middleware};
/// use external_dispatch::{apply_external_dispatchers, external_dispatcher};
/// use std::sync::Arc;
///
/// let logging: Arc<dyn Middleware<u32, u32>> = Arc::new(LoggingMiddleware::new());
/// let enhancer = compose_enhancers(vec![
///     apply_external_dispatchers(vec![external_dispatcher(|store| store.dispatch(1))]),
///     apply_middleware(vec![logging]),
/// ]);
///
/// let store = create_store(reducer(|total: &u32, n: &u32| total + n), 0, Some(enhancer));
/// assert_eq!(store.state(), 1);
/// ```
pub fn apply_external_dispatchers<S, A, I>(dispatchers: I) -> StoreEnhancer<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
    I: IntoIterator<Item = ExternalDispatcher<A>>,
{
    let dispatchers: Arc<[ExternalDispatcher<A>]> = dispatchers.into_iter().collect();

    StoreEnhancer::new(move |create: StoreCreator<S, A>| {
        let dispatchers = Arc::clone(&dispatchers);

        StoreCreator::new(move |reducer, initial_state, enhancer| {
            let store = create.create(reducer, initial_state, enhancer);
            let dispatch = store.dispatcher();
            let capability = DispatchCapability::new(Arc::clone(&dispatch));

            debug!(dispatchers = dispatchers.len(), "injecting dispatch capability");
            for dispatcher in dispatchers.iter() {
                dispatcher(&capability);
            }

            store.with_dispatcher(dispatch)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::external_dispatcher;
    use dispatch_store::{create_store, reducer, Reducer};
    use parking_lot::Mutex;

    fn sum() -> Reducer<i64, i64> {
        reducer(|total: &i64, n: &i64| total + n)
    }

    #[test]
    fn test_no_dispatchers_leaves_store_untouched() {
        let store = create_store(sum(), 3, Some(apply_external_dispatchers(Vec::new())));

        store.dispatch(4);

        assert_eq!(store.state(), 7);
        assert_eq!(store.dispatch_count(), 1);
    }

    #[test]
    fn test_dispatchers_run_once_in_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let (first, second) = (Arc::clone(&calls), Arc::clone(&calls));

        let enhancer = apply_external_dispatchers(vec![
            external_dispatcher(move |_: &DispatchCapability<i64>| first.lock().push("first")),
            external_dispatcher(move |_: &DispatchCapability<i64>| second.lock().push("second")),
        ]);
        let store = create_store(sum(), 0, Some(enhancer));

        store.dispatch(1);
        store.dispatch(1);

        assert_eq!(*calls.lock(), vec!["first", "second"]);
    }

    #[test]
    fn test_construction_time_dispatch_reaches_reducer() {
        let enhancer = apply_external_dispatchers(vec![external_dispatcher(|store: &DispatchCapability<i64>| {
            store.dispatch(10);
            store.dispatch(-3);
        })]);

        let store = create_store(sum(), 0, Some(enhancer));

        assert_eq!(store.state(), 7);
    }

    #[test]
    fn test_capability_outlives_construction() {
        let kept = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&kept);

        let enhancer = apply_external_dispatchers(vec![external_dispatcher(move |store: &DispatchCapability<i64>| {
            *slot.lock() = Some(store.clone());
        })]);
        let store = create_store(sum(), 0, Some(enhancer));

        let capability = kept.lock().clone().unwrap();
        capability.dispatch(5);
        capability.dispatch(5);

        assert_eq!(store.state(), 10);
    }

    #[test]
    fn test_enhancer_is_reusable_across_stores() {
        let applications = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&applications);

        let enhancer = apply_external_dispatchers(vec![external_dispatcher(move |_: &DispatchCapability<i64>| {
            *counter.lock() += 1;
        })]);

        let a = create_store(sum(), 0, Some(enhancer.clone()));
        let b = create_store(sum(), 0, Some(enhancer));
        a.dispatch(1);

        assert_eq!(*applications.lock(), 2);
        assert_eq!((a.state(), b.state()), (1, 0));
    }
}
