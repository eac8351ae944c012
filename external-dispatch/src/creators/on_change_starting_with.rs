use crate::capability::{DispatchCapability, ExternalDispatcher};
use crate::creators::{apply_once, dispatch_on_change};
use crate::source::ExternalSource;

/// Dispatch when the source's value changes, starting from a known value
///
/// Returns a function taking the seed. Detection is the same as
/// [`on_change`](crate::on_change), but the cache starts at `seed` and the
/// source is not read before the first callback. Each dispatcher produced
/// by the returned function registers on its first application only.
///
/// ```rust
/// use external_dispatch::{on_change_starting_with, ExternalSource};
///
/// let starting_with = on_change_starting_with(ExternalSource::new(
///     || Some(5u8),
///     |_callback| {},
///     |level: u8| level,
/// ));
/// let _dispatcher = starting_with(5);
/// ```
pub fn on_change_starting_with<V, A>(
    source: ExternalSource<V, A>,
) -> impl Fn(V) -> ExternalDispatcher<A> + Send + Sync
where
    V: PartialEq + Clone + Send + Sync + 'static,
    A: 'static,
{
    move |seed: V| {
        let source = source.clone();
        apply_once("on_change_starting_with", move |capability: &DispatchCapability<A>| {
            dispatch_on_change(source.clone(), Some(seed.clone()), capability);
        })
    }
}
