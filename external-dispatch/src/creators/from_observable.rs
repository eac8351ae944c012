use std::sync::Arc;

use tracing::{debug, trace};

use super::apply_once;
use crate::capability::{DispatchCapability, ExternalDispatcher};
use crate::observable::{Observable, ObservableActionCreators, Observer};

/// Dispatch the notifications of a push source
///
/// When applied, subscribes once with an observer whose `next` dispatches
/// `creators.next(value)`. The `error` and `complete` channels are attached
/// only when the corresponding creator exists; without one, the signal is
/// dropped. The subscription handle is forgotten rather than dropped, so a
/// subscription that detaches in its destructor stays attached. Applying the
/// returned dispatcher a second time does not subscribe again.
pub fn from_observable<O, T, E, A>(observable: O, creators: ObservableActionCreators<T, E, A>) -> ExternalDispatcher<A>
where
    O: Observable<T, E> + Send + Sync + 'static,
    T: 'static,
    E: 'static,
    A: 'static,
{
    apply_once("from_observable", move |capability: &DispatchCapability<A>| {
        let observer = observer_for(&creators, capability);
        debug!(
            error = observer.has_error_handler(),
            complete = observer.has_complete_handler(),
            "subscribing to observable"
        );
        std::mem::forget(observable.subscribe(observer));
    })
}

fn observer_for<T, E, A>(creators: &ObservableActionCreators<T, E, A>, capability: &DispatchCapability<A>) -> Observer<T, E>
where
    T: 'static,
    E: 'static,
    A: 'static,
{
    let next = {
        let capability = capability.clone();
        let create = Arc::clone(&creators.next);
        move |value: T| {
            trace!("observable next, dispatching");
            capability.dispatch(create(value))
        }
    };
    let mut observer = Observer::new(next);

    if let Some(create) = creators.error.clone() {
        let capability = capability.clone();
        observer = observer.with_error(move |error: E| {
            trace!("observable error, dispatching");
            capability.dispatch(create(error))
        });
    }

    if let Some(create) = creators.complete.clone() {
        let capability = capability.clone();
        observer = observer.with_complete(move || {
            trace!("observable complete, dispatching");
            capability.dispatch(create())
        });
    }

    observer
}
