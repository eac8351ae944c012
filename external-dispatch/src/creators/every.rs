use tracing::trace;

use super::apply_once;
use crate::capability::{DispatchCapability, ExternalDispatcher};
use crate::compose;
use crate::source::ExternalSource;

/// Dispatch on every notification from the source
///
/// When applied, registers one callback and reads nothing. Each callback
/// reads the source once and dispatches `action_creator(value)` when a value
/// is present. The returned dispatcher registers on its first application
/// only; later applications are ignored.
///
/// # Example
///
/// ```rust
/// use external_dispatch::{every, DispatchCapability, ExternalSource};
/// use std::sync::{Arc, Mutex};
///
/// let callbacks = Arc::new(Mutex::new(Vec::new()));
/// let registry = Arc::clone(&callbacks);
///
/// let dispatcher = every(ExternalSource::new(
///     || Some(3),
///     move |callback| registry.lock().unwrap().push(callback),
///     |n: i32| n * 10,
/// ));
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// dispatcher(&DispatchCapability::from_fn(move |action: i32| sink.lock().unwrap().push(action)));
///
/// for callback in callbacks.lock().unwrap().iter() {
///     callback();
/// }
/// assert_eq!(*seen.lock().unwrap(), vec![30]);
/// ```
pub fn every<V, A>(source: ExternalSource<V, A>) -> ExternalDispatcher<A>
where
    V: 'static,
    A: 'static,
{
    apply_once("every", move |capability: &DispatchCapability<A>| {
        let ExternalSource {
            get,
            register,
            action_creator,
        } = source.clone();
        let capability = capability.clone();

        let poll = compose!(
            move |action: Option<A>| {
                if let Some(action) = action {
                    trace!("every: dispatching");
                    capability.dispatch(action);
                }
            },
            move |value: Option<V>| value.map(|value| action_creator(value)),
            move || get()
        );

        register(Box::new(poll));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Callback;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Spies {
        gets: Arc<AtomicUsize>,
        registers: Arc<AtomicUsize>,
        creates: Arc<AtomicUsize>,
        callbacks: Arc<Mutex<Vec<Callback>>>,
    }

    fn spied_source(value: Option<i32>) -> (ExternalSource<i32, String>, Spies) {
        let spies = Spies {
            gets: Arc::new(AtomicUsize::new(0)),
            registers: Arc::new(AtomicUsize::new(0)),
            creates: Arc::new(AtomicUsize::new(0)),
            callbacks: Arc::new(Mutex::new(Vec::new())),
        };

        let gets = Arc::clone(&spies.gets);
        let registers = Arc::clone(&spies.registers);
        let creates = Arc::clone(&spies.creates);
        let callbacks = Arc::clone(&spies.callbacks);

        let source = ExternalSource::new(
            move || {
                gets.fetch_add(1, Ordering::SeqCst);
                value
            },
            move |callback| {
                registers.fetch_add(1, Ordering::SeqCst);
                callbacks.lock().push(callback);
            },
            move |n: i32| {
                creates.fetch_add(1, Ordering::SeqCst);
                format!("value:{}", n)
            },
        );

        (source, spies)
    }

    fn recording_capability() -> (DispatchCapability<String>, Arc<Mutex<Vec<String>>>) {
        let dispatched = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&dispatched);
        (DispatchCapability::from_fn(move |action| sink.lock().push(action)), dispatched)
    }

    #[test]
    fn test_no_side_effects_before_application() {
        let (source, spies) = spied_source(Some(1));
        let _dispatcher = every(source);

        assert_eq!(spies.gets.load(Ordering::SeqCst), 0);
        assert_eq!(spies.registers.load(Ordering::SeqCst), 0);
        assert_eq!(spies.creates.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_application_registers_without_reading() {
        let (source, spies) = spied_source(Some(1));
        let (capability, dispatched) = recording_capability();

        every(source)(&capability);

        assert_eq!(spies.registers.load(Ordering::SeqCst), 1);
        assert_eq!(spies.gets.load(Ordering::SeqCst), 0);
        assert!(dispatched.lock().is_empty());
    }

    #[test]
    fn test_each_callback_dispatches_once() {
        let (source, spies) = spied_source(Some(4));
        let (capability, dispatched) = recording_capability();

        every(source)(&capability);
        for callback in spies.callbacks.lock().iter() {
            callback();
            callback();
        }

        assert_eq!(spies.gets.load(Ordering::SeqCst), 2);
        assert_eq!(spies.creates.load(Ordering::SeqCst), 2);
        assert_eq!(*dispatched.lock(), vec!["value:4", "value:4"]);
    }

    #[test]
    fn test_absent_value_is_skipped() {
        let (source, spies) = spied_source(None);
        let (capability, dispatched) = recording_capability();

        every(source)(&capability);
        for callback in spies.callbacks.lock().iter() {
            callback();
        }

        assert_eq!(spies.gets.load(Ordering::SeqCst), 1);
        assert_eq!(spies.creates.load(Ordering::SeqCst), 0);
        assert!(dispatched.lock().is_empty());
    }

    #[test]
    fn test_falsy_values_are_present() {
        let (source, spies) = spied_source(Some(0));
        let (capability, dispatched) = recording_capability();

        every(source)(&capability);
        for callback in spies.callbacks.lock().iter() {
            callback();
        }

        assert_eq!(*dispatched.lock(), vec!["value:0"]);
    }

    #[test]
    fn test_second_application_is_ignored() {
        let (source, spies) = spied_source(Some(1));
        let (first, dispatched) = recording_capability();
        let (second, ignored) = recording_capability();
        let dispatcher = every(source);

        dispatcher(&first);
        dispatcher(&second);
        for callback in spies.callbacks.lock().iter() {
            callback();
        }

        assert_eq!(spies.registers.load(Ordering::SeqCst), 1);
        assert_eq!(*dispatched.lock(), vec!["value:1"]);
        assert!(ignored.lock().is_empty());
    }
}
