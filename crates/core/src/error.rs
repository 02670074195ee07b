//! Domain error model.

use thiserror::Error;

use crate::id::{OrderId, ProductId};

/// Result type used across the catalog and order layers.
pub type DomainResult<T> = Result<T, DomainError>;

/// Catalog/order level error.
///
/// Every failure of a warehouse operation is reported through one of these
/// variants; none of them is fatal and none leaves partial writes behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A required behavior (hook, callback) was not supplied.
    #[error("missing required argument: {0}")]
    NullArgument(&'static str),

    /// An allocation could not be made (or an id space is exhausted).
    #[error("out of memory")]
    OutOfMemory,

    /// A product name failed validation.
    #[error("invalid product name: {0:?}")]
    InvalidName(String),

    /// An amount is negative or inconsistent with the product's amount kind.
    #[error("invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("product {0} already exists")]
    ProductAlreadyExists(ProductId),

    #[error("product {0} does not exist")]
    ProductNotExist(ProductId),

    #[error("order {0} does not exist")]
    OrderNotExist(OrderId),

    /// A decrease would drive a stock or quantity below zero.
    #[error("insufficient amount of product {0}")]
    InsufficientAmount(ProductId),
}

impl DomainError {
    pub fn null_argument(what: &'static str) -> Self {
        Self::NullArgument(what)
    }

    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName(name.into())
    }

    pub fn invalid_amount(amount: f64) -> Self {
        Self::InvalidAmount(amount)
    }
}
