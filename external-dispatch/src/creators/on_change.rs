use crate::capability::{DispatchCapability, ExternalDispatcher};
use crate::creators::{apply_once, dispatch_on_change};
use crate::source::ExternalSource;

/// Dispatch when the source's value changes
///
/// When applied, reads the source once to seed the cached value (which may
/// be absent), then registers. Each callback reads the source and
/// dispatches only when the value is present and differs from the cache.
/// Only the first application seeds and registers; later ones are ignored.
pub fn on_change<V, A>(source: ExternalSource<V, A>) -> ExternalDispatcher<A>
where
    V: PartialEq + Clone + Send + 'static,
    A: 'static,
{
    apply_once("on_change", move |capability: &DispatchCapability<A>| {
        let seed = (source.get)();
        dispatch_on_change(source.clone(), seed, capability);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creators::testing::Scripted;
    use crate::source::Identity;
    use parking_lot::Mutex;
    use rstest::rstest;
    use std::sync::Arc;

    #[test]
    fn test_application_seeds_and_registers() {
        let (spy, source) = Scripted::new(vec![Some(1)]);
        let dispatcher = on_change(source);
        assert_eq!(spy.gets(), 0);
        assert_eq!(spy.registers(), 0);
        assert_eq!(spy.creates(), 0);

        dispatcher(&spy.capability());

        assert_eq!(spy.gets(), 1);
        assert_eq!(spy.registers(), 1);
        assert_eq!(spy.creates(), 0);
        assert!(spy.dispatched().is_empty());
    }

    #[test]
    fn test_dispatches_only_on_transition() {
        let (spy, source) = Scripted::new(vec![Some(1), Some(1), Some(2)]);
        on_change(source)(&spy.capability());

        spy.notify();
        assert!(spy.dispatched().is_empty());

        spy.notify();
        assert_eq!(spy.dispatched(), vec![2]);
        assert_eq!(spy.creates(), 1);
    }

    #[rstest]
    #[case::steady(vec![Some(3), Some(3), Some(3)], vec![])]
    #[case::absent_seed(vec![None, Some(3), Some(3)], vec![3])]
    #[case::absent_ignored(vec![Some(3), None, Some(3)], vec![])]
    #[case::flip_flop(vec![Some(1), Some(2), Some(1), Some(2)], vec![2, 1, 2])]
    #[case::zero_is_a_value(vec![None, Some(0)], vec![0])]
    fn test_change_sequences(#[case] script: Vec<Option<i32>>, #[case] expected: Vec<i32>) {
        let notifications = script.len() - 1;
        let (spy, source) = Scripted::new(script);
        on_change(source)(&spy.capability());

        for _ in 0..notifications {
            spy.notify();
        }

        assert_eq!(spy.dispatched(), expected);
    }

    #[test]
    fn test_second_application_is_ignored() {
        let (spy, source) = Scripted::new(vec![Some(1), Some(2)]);
        let dispatcher = on_change(source);

        dispatcher(&spy.capability());
        dispatcher(&spy.capability());
        assert_eq!(spy.gets(), 1);
        assert_eq!(spy.registers(), 1);

        spy.notify();

        assert_eq!(spy.dispatched(), vec![2]);
    }

    #[test]
    fn test_identity_values_change_per_allocation() {
        let current = Arc::new(Mutex::new(Identity::new(vec!["a"])));
        let callbacks: Arc<Mutex<Vec<crate::source::Callback>>> = Arc::new(Mutex::new(Vec::new()));
        let dispatched = Arc::new(Mutex::new(0usize));

        let reader = Arc::clone(&current);
        let registry = Arc::clone(&callbacks);
        let source = ExternalSource::new(
            move || Some(reader.lock().clone()),
            move |callback| registry.lock().push(callback),
            |value: Identity<Vec<&'static str>>| value.len(),
        );
        let sink = Arc::clone(&dispatched);
        on_change(source)(&DispatchCapability::from_fn(move |_: usize| *sink.lock() += 1));

        let notify = || callbacks.lock().iter().for_each(|callback| callback());

        notify();
        assert_eq!(*dispatched.lock(), 0);

        // same content, new allocation
        *current.lock() = Identity::new(vec!["a"]);
        notify();
        assert_eq!(*dispatched.lock(), 1);
    }
}
