//! External source descriptors
//!
//! An `ExternalSource` describes a piece of state living outside the store:
//! how to read it (`get`), how to be told it may have changed (`register`)
//! and how to turn a value into an action (`action_creator`).
//!
//! ```text
//! register(callback) ──► callback() ──► get() ──► action_creator(value) ──► dispatch
//! ```

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Callback handed to a registration mechanism
pub type Callback = Box<dyn Fn() + Send + Sync>;

/// Reads the current external value, `None` when no value is available
pub type Getter<V> = Arc<dyn Fn() -> Option<V> + Send + Sync>;

/// Arranges for a callback to run whenever the external value may have changed
pub type Registrar = Arc<dyn Fn(Callback) + Send + Sync>;

/// Maps an external value to a store action
pub type ActionCreator<V, A> = Arc<dyn Fn(V) -> A + Send + Sync>;

/// Capability descriptor consumed by the change-detection strategies
///
/// # Example
///
/// ```rust
/// use external_dispatch::ExternalSource;
///
/// #[derive(Debug)]
/// enum Action {
///     WindowResized(u32),
/// }
///
/// let source = ExternalSource::new(
///     || Some(1280u32),
///     |_callback| { /* hook the callback into a resize listener */ },
///     Action::WindowResized,
/// );
///
/// assert_eq!((source.get)(), Some(1280));
/// ```
pub struct ExternalSource<V, A> {
    /// Current value, or `None` when absent
    pub get: Getter<V>,

    /// Registration mechanism (poll loop, listener, timer...)
    pub register: Registrar,

    /// Value to action mapping
    pub action_creator: ActionCreator<V, A>,
}

impl<V, A> ExternalSource<V, A> {
    /// Build a descriptor from closures
    pub fn new<G, R, C>(get: G, register: R, action_creator: C) -> Self
    where
        G: Fn() -> Option<V> + Send + Sync + 'static,
        R: Fn(Callback) + Send + Sync + 'static,
        C: Fn(V) -> A + Send + Sync + 'static,
    {
        Self {
            get: Arc::new(get),
            register: Arc::new(register),
            action_creator: Arc::new(action_creator),
        }
    }

    /// Build a descriptor from already shared parts
    pub fn from_parts(get: Getter<V>, register: Registrar, action_creator: ActionCreator<V, A>) -> Self {
        Self {
            get,
            register,
            action_creator,
        }
    }
}

impl<V, A> Clone for ExternalSource<V, A> {
    fn clone(&self) -> Self {
        Self {
            get: Arc::clone(&self.get),
            register: Arc::clone(&self.register),
            action_creator: Arc::clone(&self.action_creator),
        }
    }
}

impl<V, A> fmt::Debug for ExternalSource<V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalSource").finish_non_exhaustive()
    }
}

// ============================================================================
// Identity - pointer-equality wrapper for shared composite values
// ============================================================================

/// Shared value compared by identity instead of by content
///
/// Change detection uses `PartialEq`. Wrapping a composite value in
/// `Identity` makes two values equal only when they are the same allocation,
/// so a source that hands out a fresh `Arc` on every read is reported as
/// changed on every read, and one that keeps returning the same `Arc` never is.
pub struct Identity<T>(pub Arc<T>);

impl<T> Identity<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl<T> Clone for Identity<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> PartialEq for Identity<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Eq for Identity<T> {}

impl<T> Deref for Identity<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> From<Arc<T>> for Identity<T> {
    fn from(value: Arc<T>) -> Self {
        Self(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identity").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_compares_allocation() {
        let a = Identity::new(vec![1, 2, 3]);
        let same = a.clone();
        let lookalike = Identity::new(vec![1, 2, 3]);

        assert_eq!(a, same);
        assert_ne!(a, lookalike);
        assert_eq!(*a, *lookalike);
    }

    #[test]
    fn test_source_parts_are_shared_on_clone() {
        let source: ExternalSource<u8, u8> = ExternalSource::new(|| Some(1), |_| {}, |v| v);
        let cloned = source.clone();

        assert!(Arc::ptr_eq(&source.get, &cloned.get));
        assert!(Arc::ptr_eq(&source.register, &cloned.register));
        assert!(Arc::ptr_eq(&source.action_creator, &cloned.action_creator));
    }
}
