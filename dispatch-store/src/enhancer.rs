//! Store creators and store enhancers
//!
//! A `StoreCreator` builds a store from `(reducer, initial_state, enhancer)`.
//! A `StoreEnhancer` takes a creator and returns a new creator with the same
//! signature, typically one that decorates the created store (for example by
//! wrapping its dispatch function).
//!
//! ```text
//! compose_enhancers([outer, inner]).apply(base)
//!     == outer.apply(inner.apply(base))
//! ```

use std::fmt;
use std::sync::Arc;

use crate::store::{create_store, Reducer, Store};

type CreateFn<S, A> =
    dyn Fn(Reducer<S, A>, S, Option<StoreEnhancer<S, A>>) -> Store<S, A> + Send + Sync;

type EnhanceFn<S, A> = dyn Fn(StoreCreator<S, A>) -> StoreCreator<S, A> + Send + Sync;

// ============================================================================
// StoreCreator
// ============================================================================

/// Function that builds a store from a reducer, an initial state and an
/// optional enhancer
pub struct StoreCreator<S, A>(Arc<CreateFn<S, A>>);

impl<S, A> StoreCreator<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    /// Wrap a closure as a store creator
    pub fn new<F>(create: F) -> Self
    where
        F: Fn(Reducer<S, A>, S, Option<StoreEnhancer<S, A>>) -> Store<S, A> + Send + Sync + 'static,
    {
        Self(Arc::new(create))
    }

    /// The undecorated creator, [`create_store`]
    pub fn base() -> Self {
        Self::new(create_store::<S, A>)
    }

    /// Build a store
    pub fn create(
        &self,
        reducer: Reducer<S, A>,
        initial_state: S,
        enhancer: Option<StoreEnhancer<S, A>>,
    ) -> Store<S, A> {
        (self.0)(reducer, initial_state, enhancer)
    }
}

impl<S, A> Clone for StoreCreator<S, A> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<S, A> fmt::Debug for StoreCreator<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StoreCreator")
    }
}

// ============================================================================
// StoreEnhancer
// ============================================================================

/// Higher-order function turning a store creator into a decorated one
pub struct StoreEnhancer<S, A>(Arc<EnhanceFn<S, A>>);

impl<S, A> StoreEnhancer<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    /// Wrap a closure as a store enhancer
    pub fn new<F>(enhance: F) -> Self
    where
        F: Fn(StoreCreator<S, A>) -> StoreCreator<S, A> + Send + Sync + 'static,
    {
        Self(Arc::new(enhance))
    }

    /// Enhancer that returns the creator unchanged
    pub fn identity() -> Self {
        Self::new(|creator| creator)
    }

    /// Decorate a store creator
    pub fn apply(&self, creator: StoreCreator<S, A>) -> StoreCreator<S, A> {
        (self.0)(creator)
    }
}

impl<S, A> Clone for StoreEnhancer<S, A> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<S, A> fmt::Debug for StoreEnhancer<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StoreEnhancer")
    }
}

/// Compose enhancers right to left
///
/// The first enhancer is the outermost: it wraps the creator produced by all
/// enhancers after it, so it sees the dispatch function they installed.
/// Composing nothing yields [`StoreEnhancer::identity`].
pub fn compose_enhancers<S, A>(enhancers: Vec<StoreEnhancer<S, A>>) -> StoreEnhancer<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    match enhancers.len() {
        0 => StoreEnhancer::identity(),
        1 => enhancers.into_iter().next().unwrap_or_else(StoreEnhancer::identity),
        _ => StoreEnhancer::new(move |creator| {
            enhancers
                .iter()
                .rev()
                .fold(creator, |inner, enhancer| enhancer.apply(inner))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{reducer, Dispatch};
    use parking_lot::Mutex;

    /// Enhancer that records its label whenever an action passes its dispatch
    fn tagging_enhancer(label: &'static str, log: Arc<Mutex<Vec<&'static str>>>) -> StoreEnhancer<i32, i32> {
        StoreEnhancer::new(move |create| {
            let log = Arc::clone(&log);
            StoreCreator::new(move |reducer, initial_state, enhancer| {
                let store = create.create(reducer, initial_state, enhancer);
                let next = store.dispatcher();
                let log = Arc::clone(&log);
                let dispatch: Dispatch<i32> = Arc::new(move |action| {
                    log.lock().push(label);
                    next(action)
                });
                store.with_dispatcher(dispatch)
            })
        })
    }

    fn add() -> Reducer<i32, i32> {
        reducer(|total: &i32, n: &i32| total + n)
    }

    #[test]
    fn test_create_store_without_enhancer() {
        let store = StoreCreator::base().create(add(), 10, None);
        store.dispatch(5);
        assert_eq!(store.state(), 15);
    }

    #[test]
    fn test_create_store_with_enhancer() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let store = create_store(add(), 0, Some(tagging_enhancer("tag", Arc::clone(&log))));

        store.dispatch(1);

        assert_eq!(store.state(), 1);
        assert_eq!(*log.lock(), vec!["tag"]);
    }

    #[test]
    fn test_identity_enhancer() {
        let creator = StoreEnhancer::identity().apply(StoreCreator::base());
        let store = creator.create(add(), 1, None);
        store.dispatch(1);
        assert_eq!(store.state(), 2);
    }

    #[test]
    fn test_compose_order_first_is_outermost() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let enhancer = compose_enhancers(vec![
            tagging_enhancer("outer", Arc::clone(&log)),
            tagging_enhancer("inner", Arc::clone(&log)),
        ]);

        let store = create_store(add(), 0, Some(enhancer));
        store.dispatch(1);

        assert_eq!(*log.lock(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_compose_empty_and_single() {
        let log = Arc::new(Mutex::new(Vec::new()));

        let empty = create_store(add(), 0, Some(compose_enhancers(Vec::new())));
        empty.dispatch(1);
        assert_eq!(empty.state(), 1);

        let single = create_store(
            add(),
            0,
            Some(compose_enhancers(vec![tagging_enhancer("only", Arc::clone(&log))])),
        );
        single.dispatch(1);
        assert_eq!(*log.lock(), vec!["only"]);
    }

    #[test]
    fn test_creator_reusable() {
        let creator = StoreCreator::<i32, i32>::base();
        let a = creator.create(add(), 0, None);
        let b = creator.create(add(), 100, None);

        a.dispatch(1);
        assert_eq!(a.state(), 1);
        assert_eq!(b.state(), 100);
    }
}
