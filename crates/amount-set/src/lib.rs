//! `stockroom-amount-set` — a generic sorted collection binding every element
//! to an amount.
//!
//! Elements are opaque to the collection: how they are copied, released and
//! ordered is injected by the caller through [`ElementBehavior`]. The set owns
//! a copy of every element it stores and keeps them in ascending order of the
//! injected comparator at all times.

pub mod behavior;
pub mod cursor;
pub mod error;
pub mod set;

pub use behavior::{ElementBehavior, ElementBehaviorBuilder};
pub use cursor::{Cursor, Iter};
pub use error::{AmountSetError, AmountSetResult};
pub use set::AmountSet;
