//! Per-instance chains keyed by operation name.
//!
//! A method wrapped with [`wrap_keyed`] does not own its chain. On every call
//! it asks the receiver for its [`ChainTable`] and looks up the chain stored
//! under the operation's name. A receiver with no table, or a table with no
//! entry for the name, behaves as an empty chain.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::chain::Chain;
use crate::dispatch::{DISPATCH_TARGET, dispatch};
use crate::error::ChainTableError;

/// Name and signature of an interceptable method.
///
/// The signature ties the name to the argument type `A` and result type `R`,
/// so a table lookup always yields a chain the method can run.
pub struct Operation<A, R> {
    name: &'static str,
    _signature: PhantomData<fn(A) -> R>,
}

impl<A, R> Operation<A, R> {
    /// Declares an operation.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _signature: PhantomData,
        }
    }

    /// Returns the key the operation's chain is stored under.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<A, R> Clone for Operation<A, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, R> Copy for Operation<A, R> {}

impl<A, R> fmt::Debug for Operation<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Operation").field(&self.name).finish()
    }
}

struct Slot {
    chain: Box<dyn Any + Send + Sync>,
    signature: &'static str,
}

impl Slot {
    fn new<A, R, C>(chain: Chain<A, R, C>) -> Self
    where
        A: 'static,
        R: 'static,
        C: 'static,
    {
        Self {
            chain: Box::new(chain),
            signature: type_name::<Chain<A, R, C>>(),
        }
    }
}

/// Chains owned by one receiver of type `C`, keyed by operation name.
pub struct ChainTable<C> {
    slots: HashMap<String, Slot>,
    _context: PhantomData<fn(&mut C)>,
}

impl<C: 'static> ChainTable<C> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            _context: PhantomData,
        }
    }

    /// Stores `chain` for `operation`, returning the chain it replaces.
    ///
    /// # Errors
    ///
    /// Returns [`ChainTableError::SignatureMismatch`] if the name already
    /// holds a chain for a different signature.
    pub fn insert<A, R>(
        &mut self,
        operation: Operation<A, R>,
        chain: Chain<A, R, C>,
    ) -> Result<Option<Chain<A, R, C>>, ChainTableError>
    where
        A: 'static,
        R: 'static,
    {
        match self.slots.entry(operation.name().to_owned()) {
            Entry::Vacant(vacant) => {
                vacant.insert(Slot::new(chain));
                Ok(None)
            }
            Entry::Occupied(mut occupied) => {
                let slot = occupied.get_mut();
                let existing = slot.signature;
                let stored = slot
                    .chain
                    .downcast_mut::<Chain<A, R, C>>()
                    .ok_or_else(|| mismatch::<A, R, C>(operation, existing))?;
                Ok(Some(std::mem::replace(stored, chain)))
            }
        }
    }

    /// Returns the chain for `operation`, creating an empty one if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ChainTableError::SignatureMismatch`] if the name already
    /// holds a chain for a different signature.
    pub fn chain_mut<A, R>(
        &mut self,
        operation: Operation<A, R>,
    ) -> Result<&mut Chain<A, R, C>, ChainTableError>
    where
        A: 'static,
        R: 'static,
    {
        let slot = self
            .slots
            .entry(operation.name().to_owned())
            .or_insert_with(|| Slot::new(Chain::<A, R, C>::new()));
        let existing = slot.signature;
        slot.chain
            .downcast_mut::<Chain<A, R, C>>()
            .ok_or_else(|| mismatch::<A, R, C>(operation, existing))
    }

    /// Returns the chain stored for `operation`.
    ///
    /// A name bound to another signature yields `None`.
    #[must_use]
    pub fn get<A, R>(&self, operation: Operation<A, R>) -> Option<&Chain<A, R, C>>
    where
        A: 'static,
        R: 'static,
    {
        self.slots
            .get(operation.name())?
            .chain
            .downcast_ref::<Chain<A, R, C>>()
    }

    /// Removes the chain stored under `name`, returning whether one existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.slots.remove(name).is_some()
    }

    /// Returns `true` if a chain is stored under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Returns the number of stored chains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` when no chains are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<C: 'static> Default for ChainTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ChainTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.slots.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ChainTable").field("operations", &names).finish()
    }
}

fn mismatch<A, R, C>(operation: Operation<A, R>, existing: &'static str) -> ChainTableError
where
    A: 'static,
    R: 'static,
    C: 'static,
{
    ChainTableError::signature_mismatch(operation.name(), existing, type_name::<Chain<A, R, C>>())
}

/// A receiver that may carry per-instance chains.
pub trait Intercepted: Sized + 'static {
    /// Returns the receiver's chain table, if it has one.
    fn chain_table(&self) -> Option<&ChainTable<Self>>;
}

/// Returns a snapshot of the chain `context` holds for `operation`.
///
/// Missing tables, missing entries, and entries of another signature all
/// yield an empty chain.
#[must_use]
pub fn resolve_chain<C, A, R>(context: &C, operation: Operation<A, R>) -> Chain<A, R, C>
where
    C: Intercepted,
    A: 'static,
    R: 'static,
{
    context
        .chain_table()
        .and_then(|table| table.get(operation))
        .cloned()
        .unwrap_or_default()
}

/// Wraps a method so every call goes through the receiver's chain for
/// `operation`.
///
/// The chain is looked up on each call, so interceptors added to or removed
/// from a receiver after the wrapper was built take effect on its next call.
/// The lookup happens before dispatch; edits an interceptor makes to the
/// receiver's own table apply from the following call.
#[must_use]
pub fn wrap_keyed<C, A, R, F>(operation: Operation<A, R>, target: F) -> impl Fn(&mut C, A) -> R
where
    C: Intercepted,
    A: 'static,
    R: 'static,
    F: Fn(&mut A, &mut C) -> R,
{
    move |context: &mut C, mut args: A| {
        let chain = resolve_chain(context, operation);
        trace!(
            target: DISPATCH_TARGET,
            operation = operation.name(),
            before = chain.before().len(),
            after = chain.after().len(),
            "dispatching keyed operation"
        );
        dispatch(&mut args, &chain, &target, context)
    }
}
