//! Change-detection strategies
//!
//! Each strategy turns a source into an [`ExternalDispatcher`]. Nothing
//! happens until the dispatcher is applied to a capability; after that the
//! source's own registration mechanism decides when the strategy runs.
//!
//! | Strategy                  | Reads at apply | Dispatches when               |
//! |---------------------------|----------------|-------------------------------|
//! | `every`                   | no             | value present                 |
//! | `on_change`               | yes (seed)     | value present and changed     |
//! | `on_change_starting_with` | no             | value present and changed     |
//! | `from_observable`         | n/a            | `next`, and mapped terminals  |
//!
//! [`ExternalDispatcher`]: crate::ExternalDispatcher

mod every;
mod from_observable;
mod on_change;
mod on_change_starting_with;

pub use every::every;
pub use from_observable::from_observable;
pub use on_change::on_change;
pub use on_change_starting_with::on_change_starting_with;

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::{trace, warn};

use crate::capability::{external_dispatcher, DispatchCapability, ExternalDispatcher};
use crate::source::ExternalSource;

/// Wrap a strategy body so it runs on the first application only
///
/// A strategy instance registers with its source exactly once. Applying the
/// same dispatcher again (to a second store, or twice to one) is ignored.
pub(crate) fn apply_once<A, F>(strategy: &'static str, apply: F) -> ExternalDispatcher<A>
where
    A: 'static,
    F: Fn(&DispatchCapability<A>) + Send + Sync + 'static,
{
    let applied = AtomicBool::new(false);
    external_dispatcher(move |capability: &DispatchCapability<A>| {
        if applied.swap(true, Ordering::SeqCst) {
            warn!(strategy, "dispatcher already applied, ignoring");
            return;
        }
        apply(capability);
    })
}

/// Register a callback that dispatches only when the value changes
///
/// The cache starts at `seed` and is owned by the registered callback. The
/// read and the cache update happen under the cache lock, so concurrent
/// callbacks see reads in a single order and the cache always holds the
/// latest read. The lock is released before dispatching, so a reentrant
/// callback sees the new value; `get` itself must not run the callback.
/// Actions from concurrent callbacks may still reach the store in either
/// order.
pub(crate) fn dispatch_on_change<V, A>(
    source: ExternalSource<V, A>,
    seed: Option<V>,
    capability: &DispatchCapability<A>,
) where
    V: PartialEq + Clone + Send + 'static,
    A: 'static,
{
    let ExternalSource {
        get,
        register,
        action_creator,
    } = source;
    let capability = capability.clone();
    let cache = Mutex::new(seed);

    register(Box::new(move || {
        let value = {
            let mut cached = cache.lock();
            let Some(value) = get() else {
                return;
            };
            if cached.as_ref() == Some(&value) {
                return;
            }
            *cached = Some(value.clone());
            value
        };

        trace!("external value changed, dispatching");
        capability.dispatch(action_creator(value));
    }));
}
