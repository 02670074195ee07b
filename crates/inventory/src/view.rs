//! Read models handed to reporting collaborators.

use serde::Serialize;

use stockroom_core::{Entity, OrderId, ProductId};
use stockroom_products::ProductRecord;

/// One catalog product: identity, stock and price of a single unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryLine {
    pub id: ProductId,
    pub name: String,
    pub amount: f64,
    pub unit_price: f64,
}

impl InventoryLine {
    pub(crate) fn of<D>(record: &ProductRecord<D>, amount: f64) -> Self {
        Self {
            id: record.id(),
            name: record.name().to_string(),
            amount,
            unit_price: record.unit_price(),
        }
    }
}

/// One cart entry priced for its full quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub id: ProductId,
    pub name: String,
    pub quantity: f64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub lines: Vec<OrderLine>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestSeller {
    pub id: ProductId,
    pub name: String,
    pub revenue: f64,
}
