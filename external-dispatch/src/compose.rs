//! Right-to-left function composition
//!
//! `compose!(f, g, h)` is `move || f(g(h()))`: the rightmost function takes
//! no arguments and its result is threaded leftward. Used to chain a getter,
//! a transformer and a sink without naming the intermediate values.

/// Compose functions right to left into a zero-argument closure
///
/// - `compose!()` is a no-op closure
/// - `compose!(f)` is `f` itself
/// - `compose!(f, g, ..., z)` is `move || f(g(...z()))`
///
/// # Example
///
/// ```rust
/// use external_dispatch::compose;
///
/// let read = || 20;
/// let double = |n: i32| n * 2;
/// let describe = |n: i32| format!("value={}", n);
///
/// let pipeline = compose!(describe, double, read);
/// assert_eq!(pipeline(), "value=40");
/// ```
#[macro_export]
macro_rules! compose {
    () => {
        || {}
    };
    ($f:expr $(,)?) => {
        $f
    };
    ($f:expr, $($rest:expr),+ $(,)?) => {{
        let outer = $f;
        let inner = $crate::compose!($($rest),+);
        move || outer(inner())
    }};
}
