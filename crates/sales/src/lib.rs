//! Sales orders domain module.
//!
//! Each order owns a cart: an [`stockroom_amount_set::AmountSet`] of product
//! ids with the ordered quantity as amount. Carts reference catalog products by
//! id only; resolving ids against the catalog is the warehouse's job.

pub mod order;

pub use order::{Order, OrderBook};
