//! The narrow store capability handed to external dispatchers
//!
//! External dispatchers never see the store. They receive a
//! `DispatchCapability`, which can dispatch actions and nothing else: no
//! state access, no listener registration.

use std::fmt;
use std::sync::Arc;

use dispatch_store::Dispatch;

/// Dispatch-only view of a store
///
/// Holds the single dispatch function captured when the store was created.
/// Cloning is cheap and every clone forwards to the same function.
pub struct DispatchCapability<A> {
    dispatch: Dispatch<A>,
}

impl<A> DispatchCapability<A> {
    /// Wrap a dispatch function
    pub fn new(dispatch: Dispatch<A>) -> Self {
        Self { dispatch }
    }

    /// Wrap a closure as a dispatch function
    pub fn from_fn<F>(dispatch: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::new(Arc::new(dispatch))
    }

    /// Dispatch an action to the store
    pub fn dispatch(&self, action: A) {
        (self.dispatch)(action)
    }
}

impl<A> Clone for DispatchCapability<A> {
    fn clone(&self) -> Self {
        Self {
            dispatch: Arc::clone(&self.dispatch),
        }
    }
}

impl<A> fmt::Debug for DispatchCapability<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchCapability")
            .field("dispatch", &"Fn(A)")
            .finish()
    }
}

/// A function that receives dispatch capability once, at store creation,
/// and arranges future dispatches from external events
pub type ExternalDispatcher<A> = Arc<dyn Fn(&DispatchCapability<A>) + Send + Sync>;

/// Wrap a closure as an [`ExternalDispatcher`]
pub fn external_dispatcher<A, F>(f: F) -> ExternalDispatcher<A>
where
    F: Fn(&DispatchCapability<A>) + Send + Sync + 'static,
{
    Arc::new(f)
}
