//! Dispatching calls through interceptor chains.

use tracing::trace;

use crate::chain::{Chain, SharedChain};

/// Tracing target for dispatch decisions.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Runs `target` through `chain`.
///
/// `before` interceptors run in order; the first to return `Some` ends the
/// call with its value and nothing after it runs. Otherwise `target` runs and
/// `after` interceptors run in order; the first to return `Some` replaces the
/// target's result. Interceptors share `args` and `context` with the target,
/// so mutations made by a deferring `before` interceptor are visible to the
/// target.
pub fn dispatch<A, R, C, F>(args: &mut A, chain: &Chain<A, R, C>, target: F, context: &mut C) -> R
where
    F: FnOnce(&mut A, &mut C) -> R,
{
    for (index, interceptor) in chain.before().iter().enumerate() {
        if let Some(result) = interceptor(args, context) {
            trace!(
                target: DISPATCH_TARGET,
                stage = "before",
                index,
                "interceptor short-circuited the call"
            );
            return result;
        }
    }

    let result = target(args, context);

    for (index, interceptor) in chain.after().iter().enumerate() {
        if let Some(replacement) = interceptor(args, context) {
            trace!(
                target: DISPATCH_TARGET,
                stage = "after",
                index,
                "interceptor replaced the result"
            );
            return replacement;
        }
    }

    result
}

/// Calls a free function through `chain`.
///
/// Free functions have no receiver, so their chains use `()` as context.
#[must_use]
pub fn call<A, R, F>(mut args: A, chain: &Chain<A, R>, target: F) -> R
where
    F: FnOnce(&mut A) -> R,
{
    dispatch(&mut args, chain, |inner, _| target(inner), &mut ())
}

/// Wraps a free function so every call goes through `chain`.
///
/// The wrapper snapshots `chain` at the start of each call. Interceptors
/// pushed through another clone of the handle apply from the next call,
/// including edits made by an interceptor while a call is running.
///
/// # Example
///
/// ```
/// use roket_intercept::{Chain, SharedChain, wrap_free};
///
/// let guards = SharedChain::new(Chain::new());
/// let add = wrap_free(guards.clone(), |&mut (a, b): &mut (i32, i32)| a + b);
/// assert_eq!(add((-2, 3)), 1);
///
/// guards.update(|chain| {
///     chain.push_before(|&mut (a, b): &mut (i32, i32), _: &mut ()| {
///         (a < 0 || b < 0).then_some(0)
///     });
/// });
/// assert_eq!(add((2, 3)), 5);
/// assert_eq!(add((-2, 3)), 0);
/// ```
#[must_use]
pub fn wrap_free<A, R, F>(chain: SharedChain<A, R>, target: F) -> impl Fn(A) -> R
where
    F: Fn(&mut A) -> R,
{
    move |args| {
        let current = chain.snapshot();
        trace!(
            target: DISPATCH_TARGET,
            before = current.before().len(),
            after = current.after().len(),
            "dispatching free function"
        );
        call(args, &current, &target)
    }
}
