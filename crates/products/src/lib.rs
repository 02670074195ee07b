//! Products domain module: product records and the catalog.
//!
//! The catalog is one [`stockroom_amount_set::AmountSet`] whose elements are
//! product records ordered by id; the amount bound to each record is its
//! current stock.

pub mod catalog;
pub mod product;

pub use catalog::Catalog;
pub use product::{ProductHooks, ProductHooksBuilder, ProductRecord, validate_name};
