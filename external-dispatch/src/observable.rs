//! Push-based sources with three channels
//!
//! An `Observable` pushes values to an `Observer` over three channels:
//! `next` (any number of times), then at most one terminal `error` or
//! `complete`. Observers only carry the handlers they were built with; a
//! signal on a channel without a handler is ignored.

use std::fmt;
use std::sync::Arc;

use crate::error::{ExternalDispatchError, Result};

type Handler<T> = Box<dyn Fn(T) + Send + Sync>;

/// Receiver of push notifications
pub struct Observer<T, E> {
    next: Handler<T>,
    error: Option<Handler<E>>,
    complete: Option<Box<dyn Fn() + Send + Sync>>,
}

impl<T, E> Observer<T, E> {
    /// Create an observer handling only `next`
    pub fn new<F>(next: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            next: Box::new(next),
            error: None,
            complete: None,
        }
    }

    /// Attach an `error` handler
    pub fn with_error<F>(mut self, error: F) -> Self
    where
        F: Fn(E) + Send + Sync + 'static,
    {
        self.error = Some(Box::new(error));
        self
    }

    /// Attach a `complete` handler
    pub fn with_complete<F>(mut self, complete: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.complete = Some(Box::new(complete));
        self
    }

    /// Deliver a value
    pub fn next(&self, value: T) {
        (self.next)(value)
    }

    /// Deliver an error; ignored without an error handler
    pub fn error(&self, error: E) {
        if let Some(handler) = &self.error {
            handler(error)
        }
    }

    /// Deliver completion; ignored without a complete handler
    pub fn complete(&self) {
        if let Some(handler) = &self.complete {
            handler()
        }
    }

    pub fn has_error_handler(&self) -> bool {
        self.error.is_some()
    }

    pub fn has_complete_handler(&self) -> bool {
        self.complete.is_some()
    }
}

impl<T, E> fmt::Debug for Observer<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("error", &self.has_error_handler())
            .field("complete", &self.has_complete_handler())
            .finish()
    }
}

/// A push-based source of values
pub trait Observable<T, E> {
    /// Handle returned by `subscribe`, used by the caller to detach
    ///
    /// `from_observable` never drops or runs the destructor of this handle:
    /// it is forgotten so that drop-guard subscriptions stay attached for
    /// the life of the process. Sources that need explicit teardown should
    /// expose it on the observable itself.
    type Subscription;

    /// Start delivering notifications to `observer`
    fn subscribe(&self, observer: Observer<T, E>) -> Self::Subscription;
}

impl<T, E, O> Observable<T, E> for Arc<O>
where
    O: Observable<T, E> + ?Sized,
{
    type Subscription = O::Subscription;

    fn subscribe(&self, observer: Observer<T, E>) -> Self::Subscription {
        (**self).subscribe(observer)
    }
}

// ============================================================================
// ObservableActionCreators
// ============================================================================

type Creator<T, A> = Arc<dyn Fn(T) -> A + Send + Sync>;

/// Action creators for each observable channel
///
/// `next` is mandatory; `error` and `complete` are optional, and a missing
/// creator means the corresponding channel is not forwarded at all.
pub struct ObservableActionCreators<T, E, A> {
    pub(crate) next: Creator<T, A>,
    pub(crate) error: Option<Creator<E, A>>,
    pub(crate) complete: Option<Arc<dyn Fn() -> A + Send + Sync>>,
}

impl<T, E, A> ObservableActionCreators<T, E, A> {
    /// Creators with only a `next` mapping
    pub fn new<F>(next: F) -> Self
    where
        F: Fn(T) -> A + Send + Sync + 'static,
    {
        Self {
            next: Arc::new(next),
            error: None,
            complete: None,
        }
    }

    /// Map errors to actions
    pub fn on_error<F>(mut self, error: F) -> Self
    where
        F: Fn(E) -> A + Send + Sync + 'static,
    {
        self.error = Some(Arc::new(error));
        self
    }

    /// Map completion to an action
    pub fn on_complete<F>(mut self, complete: F) -> Self
    where
        F: Fn() -> A + Send + Sync + 'static,
    {
        self.complete = Some(Arc::new(complete));
        self
    }

    /// Start a builder, for creators assembled piecemeal
    pub fn builder() -> ObservableActionCreatorsBuilder<T, E, A> {
        ObservableActionCreatorsBuilder::default()
    }

    pub fn has_error_creator(&self) -> bool {
        self.error.is_some()
    }

    pub fn has_complete_creator(&self) -> bool {
        self.complete.is_some()
    }
}

impl<T, E, A> Clone for ObservableActionCreators<T, E, A> {
    fn clone(&self) -> Self {
        Self {
            next: Arc::clone(&self.next),
            error: self.error.clone(),
            complete: self.complete.clone(),
        }
    }
}

impl<T, E, A> fmt::Debug for ObservableActionCreators<T, E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableActionCreators")
            .field("error", &self.has_error_creator())
            .field("complete", &self.has_complete_creator())
            .finish()
    }
}

/// Builder for [`ObservableActionCreators`]
///
/// `build` fails with [`ExternalDispatchError::MissingNextCreator`] when no
/// `next` creator was supplied.
pub struct ObservableActionCreatorsBuilder<T, E, A> {
    next: Option<Creator<T, A>>,
    error: Option<Creator<E, A>>,
    complete: Option<Arc<dyn Fn() -> A + Send + Sync>>,
}

impl<T, E, A> Default for ObservableActionCreatorsBuilder<T, E, A> {
    fn default() -> Self {
        Self {
            next: None,
            error: None,
            complete: None,
        }
    }
}

impl<T, E, A> ObservableActionCreatorsBuilder<T, E, A> {
    pub fn next<F>(mut self, next: F) -> Self
    where
        F: Fn(T) -> A + Send + Sync + 'static,
    {
        self.next = Some(Arc::new(next));
        self
    }

    pub fn error<F>(mut self, error: F) -> Self
    where
        F: Fn(E) -> A + Send + Sync + 'static,
    {
        self.error = Some(Arc::new(error));
        self
    }

    pub fn complete<F>(mut self, complete: F) -> Self
    where
        F: Fn() -> A + Send + Sync + 'static,
    {
        self.complete = Some(Arc::new(complete));
        self
    }

    pub fn build(self) -> Result<ObservableActionCreators<T, E, A>> {
        let next = self.next.ok_or(ExternalDispatchError::MissingNextCreator)?;
        Ok(ObservableActionCreators {
            next,
            error: self.error,
            complete: self.complete,
        })
    }
}
