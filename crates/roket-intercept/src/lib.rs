//! Interceptor chains for Roket functions and methods.
//!
//! Any operation can be wrapped with an ordered list of `before`
//! interceptors and an ordered list of `after` interceptors. Each interceptor
//! sees the call's arguments and context and returns `None` to defer or
//! `Some(value)` to take over:
//!
//! - the first `before` interceptor returning `Some` ends the call with that
//!   value; later interceptors and the target never run;
//! - otherwise the target runs, and the first `after` interceptor returning
//!   `Some` replaces its result.
//!
//! Free functions are wrapped with [`wrap_free`], which reads its chain from
//! a [`SharedChain`] on every call. Methods are wrapped with
//! [`wrap_keyed`], which finds the chain at call time in the
//! [`ChainTable`] owned by the receiving object, so each instance can carry
//! its own interceptors and change them after construction.
//!
//! # Example
//!
//! ```
//! use roket_intercept::{Chain, ChainTable, Intercepted, Operation, wrap_keyed};
//!
//! struct Car {
//!     mileage: u32,
//!     chains: ChainTable<Car>,
//! }
//!
//! impl Intercepted for Car {
//!     fn chain_table(&self) -> Option<&ChainTable<Self>> {
//!         Some(&self.chains)
//!     }
//! }
//!
//! const DRIVE: Operation<u32, u32> = Operation::new("Drive");
//!
//! let drive = wrap_keyed(DRIVE, |distance: &mut u32, car: &mut Car| {
//!     car.mileage += *distance;
//!     car.mileage
//! });
//!
//! let mut car = Car { mileage: 600, chains: ChainTable::new() };
//! assert_eq!(drive(&mut car, 100), 700);
//!
//! car.chains
//!     .insert(DRIVE, Chain::new().with_before(|distance: &mut u32, _: &mut Car| {
//!         (*distance > 1000).then_some(0)
//!     }))
//!     .expect("Drive is only bound to one signature");
//! assert_eq!(drive(&mut car, 5000), 0);
//! assert_eq!(car.mileage, 700);
//! ```

mod chain;
mod dispatch;
mod error;
mod keyed;

pub use chain::{Chain, Interceptor, SharedChain};
pub use dispatch::{call, dispatch, wrap_free};
pub use error::ChainTableError;
pub use keyed::{ChainTable, Intercepted, Operation, resolve_chain, wrap_keyed};

#[cfg(test)]
mod tests;
