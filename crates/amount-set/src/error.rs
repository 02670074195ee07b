//! Collection-level error model.

use thiserror::Error;

/// Result type used by [`crate::AmountSet`] operations.
pub type AmountSetResult<T> = Result<T, AmountSetError>;

/// Failure of a collection operation.
///
/// A failed operation never leaves the collection in a different state than
/// before the call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AmountSetError {
    /// A required behavior was not supplied.
    #[error("missing {0} behavior")]
    NullArgument(&'static str),

    #[error("element already exists")]
    AlreadyExists,

    #[error("element does not exist")]
    DoesNotExist,

    /// Growing the storage failed.
    #[error("out of memory")]
    OutOfMemory,

    /// The change would drive the amount below zero.
    #[error("insufficient amount")]
    InsufficientAmount,
}
