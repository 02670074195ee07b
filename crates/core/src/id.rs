//! Strongly-typed identifiers used across the domain.

use core::num::NonZeroU32;
use serde::{Deserialize, Serialize};

/// Identifier of a catalog product (non-negative, catalog-unique).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

/// Identifier of an order (positive, never reused within one warehouse).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(NonZeroU32);

impl ProductId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl OrderId {
    /// The first id a fresh warehouse hands out.
    pub const FIRST: OrderId = OrderId(NonZeroU32::MIN);

    /// Returns `None` for zero, which is never a valid order id.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The id following this one, or `None` once the id space is exhausted.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

macro_rules! impl_u32_id_display {
    ($t:ty) => {
        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.get(), f)
            }
        }
    };
}

impl_u32_id_display!(ProductId);
impl_u32_id_display!(OrderId);

impl From<u32> for ProductId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<ProductId> for u32 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl From<OrderId> for u32 {
    fn from(value: OrderId) -> Self {
        value.get()
    }
}
