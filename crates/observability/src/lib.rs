//! Tracing/logging setup shared by stockroom binaries.

/// Tracing configuration (filters, formatting).
pub mod tracing;

pub use crate::tracing::{LogFormat, init, init_with};
