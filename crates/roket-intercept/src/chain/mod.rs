//! Interceptor chains.

use std::fmt;
use std::sync::{Arc, RwLock, TryLockError};

/// A shared interceptor over arguments `A` and context `C` for an operation
/// returning `R`.
///
/// Returning `None` means "no opinion" and lets dispatch continue. Returning
/// `Some(value)` ends dispatch with `value`; an operation returning `()`
/// short-circuits with `Some(())`.
pub type Interceptor<A, R, C = ()> = Arc<dyn Fn(&mut A, &mut C) -> Option<R> + Send + Sync>;

/// Ordered `before` and `after` interceptors bound to one operation.
///
/// Cloning a chain shares the interceptors; it does not copy closures.
///
/// # Example
///
/// ```
/// use roket_intercept::Chain;
///
/// let chain: Chain<String, usize> = Chain::new()
///     .with_before(|message: &mut String, _: &mut ()| {
///         message.push('!');
///         None
///     })
///     .with_after(|_: &mut String, _: &mut ()| Some(0));
///
/// assert_eq!(chain.before().len(), 1);
/// assert_eq!(chain.after().len(), 1);
/// ```
pub struct Chain<A, R, C = ()> {
    before: Vec<Interceptor<A, R, C>>,
    after: Vec<Interceptor<A, R, C>>,
}

impl<A, R, C> Chain<A, R, C> {
    /// Creates an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    /// Appends a `before` interceptor, returning the chain.
    #[must_use]
    pub fn with_before<F>(mut self, interceptor: F) -> Self
    where
        F: Fn(&mut A, &mut C) -> Option<R> + Send + Sync + 'static,
    {
        self.push_before(interceptor);
        self
    }

    /// Appends an `after` interceptor, returning the chain.
    #[must_use]
    pub fn with_after<F>(mut self, interceptor: F) -> Self
    where
        F: Fn(&mut A, &mut C) -> Option<R> + Send + Sync + 'static,
    {
        self.push_after(interceptor);
        self
    }

    /// Appends a `before` interceptor.
    pub fn push_before<F>(&mut self, interceptor: F)
    where
        F: Fn(&mut A, &mut C) -> Option<R> + Send + Sync + 'static,
    {
        self.before.push(Arc::new(interceptor));
    }

    /// Appends an `after` interceptor.
    pub fn push_after<F>(&mut self, interceptor: F)
    where
        F: Fn(&mut A, &mut C) -> Option<R> + Send + Sync + 'static,
    {
        self.after.push(Arc::new(interceptor));
    }

    /// Returns the `before` interceptors in call order.
    #[must_use]
    pub fn before(&self) -> &[Interceptor<A, R, C>] {
        &self.before
    }

    /// Returns the `after` interceptors in call order.
    #[must_use]
    pub fn after(&self) -> &[Interceptor<A, R, C>] {
        &self.after
    }

    /// Gives mutable access to the `before` interceptors, for reordering or
    /// removal.
    pub const fn before_mut(&mut self) -> &mut Vec<Interceptor<A, R, C>> {
        &mut self.before
    }

    /// Gives mutable access to the `after` interceptors, for reordering or
    /// removal.
    pub const fn after_mut(&mut self) -> &mut Vec<Interceptor<A, R, C>> {
        &mut self.after
    }

    /// Removes every interceptor.
    pub fn clear(&mut self) {
        self.before.clear();
        self.after.clear();
    }

    /// Returns `true` when the chain has no interceptors, making dispatch a
    /// plain call of the target.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

impl<A, R, C> Default for Chain<A, R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R, C> Clone for Chain<A, R, C> {
    fn clone(&self) -> Self {
        Self {
            before: self.before.clone(),
            after: self.after.clone(),
        }
    }
}

impl<A, R, C> fmt::Debug for Chain<A, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .finish()
    }
}

/// A [`Chain`] behind a shared lock, for wrappers that must see later edits.
///
/// Clones refer to the same chain. A wrapper built by
/// [`wrap_free`](crate::wrap_free) takes a [`snapshot`](Self::snapshot) on
/// every call, so interceptors pushed through any clone apply from the next
/// call. A lock poisoned by a panicking editor is recovered rather than
/// propagated.
///
/// # Example
///
/// ```
/// use roket_intercept::{Chain, SharedChain};
///
/// let shared: SharedChain<u8, u8> = SharedChain::new(Chain::new());
/// let handle = shared.clone();
/// handle.update(|chain| chain.push_before(|_: &mut u8, _: &mut ()| Some(1)));
///
/// assert_eq!(shared.snapshot().before().len(), 1);
/// ```
pub struct SharedChain<A, R, C = ()> {
    inner: Arc<RwLock<Chain<A, R, C>>>,
}

impl<A, R, C> SharedChain<A, R, C> {
    /// Shares `chain`.
    #[must_use]
    pub fn new(chain: Chain<A, R, C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(chain)),
        }
    }

    /// Returns a copy of the chain as it is now.
    ///
    /// The copy shares interceptor handles with the stored chain; later edits
    /// to either do not affect the other.
    #[must_use]
    pub fn snapshot(&self) -> Chain<A, R, C> {
        self.inner
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }

    /// Edits the chain in place and returns what `edit` returns.
    pub fn update<T>(&self, edit: impl FnOnce(&mut Chain<A, R, C>) -> T) -> T {
        let mut chain = self.inner.write().unwrap_or_else(|poison| poison.into_inner());
        edit(&mut chain)
    }
}

impl<A, R, C> Clone for SharedChain<A, R, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, R, C> Default for SharedChain<A, R, C> {
    fn default() -> Self {
        Self::new(Chain::new())
    }
}

impl<A, R, C> From<Chain<A, R, C>> for SharedChain<A, R, C> {
    fn from(chain: Chain<A, R, C>) -> Self {
        Self::new(chain)
    }
}

impl<A, R, C> fmt::Debug for SharedChain<A, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_read() {
            Ok(chain) => f.debug_tuple("SharedChain").field(&*chain).finish(),
            Err(TryLockError::Poisoned(poisoned)) => f
                .debug_tuple("SharedChain")
                .field(&*poisoned.into_inner())
                .finish(),
            Err(TryLockError::WouldBlock) => f.write_str("SharedChain(<locked>)"),
        }
    }
}
