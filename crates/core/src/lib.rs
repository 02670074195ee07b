//! `stockroom-core` — warehouse domain building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no logging setup):
//! identifiers, the domain error model and the amount rules shared by stock
//! and order quantities.

pub mod amount;
pub mod entity;
pub mod error;
pub mod id;

pub use amount::{AmountKind, AmountPolicy, AmountRules, DEFAULT_AMOUNT_TOLERANCE};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{OrderId, ProductId};
