//! Warehouse engine: the product catalog and the open orders, kept consistent
//! with each other.
//!
//! Stock reservation rules, atomic shipping and revenue accounting live here.
//! Everything is synchronous and single-threaded; cross-collection operations
//! validate first and commit second, so a failed call changes nothing.

pub mod config;
pub mod report;
pub mod view;
pub mod warehouse;

pub use config::{ConfigError, WarehouseConfig};
pub use report::ReportError;
pub use view::{BestSeller, InventoryLine, OrderLine, OrderSummary};
pub use warehouse::Warehouse;
