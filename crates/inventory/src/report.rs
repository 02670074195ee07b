//! Plain-text reports over a [`Warehouse`].
//!
//! Amounts and prices are printed with three decimals.

use std::io::Write;

use thiserror::Error;

use stockroom_core::{DomainError, OrderId, ProductId};

use crate::view::InventoryLine;
use crate::warehouse::Warehouse;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

fn write_product_line(out: &mut impl Write, line: &InventoryLine) -> std::io::Result<()> {
    writeln!(
        out,
        "name: {}, id: {}, amount: {:.3}, price: {:.3}",
        line.name, line.id, line.amount, line.unit_price
    )
}

/// Every product with its stock and unit price, in id order.
pub fn write_inventory<D>(out: &mut impl Write, warehouse: &Warehouse<D>) -> Result<(), ReportError> {
    writeln!(out, "Inventory Status:")?;
    for line in warehouse.inventory() {
        write_product_line(out, &line)?;
    }
    Ok(())
}

/// One order: each cart line priced for its quantity, then the total.
pub fn write_order<D>(
    out: &mut impl Write,
    warehouse: &Warehouse<D>,
    order_id: OrderId,
) -> Result<(), ReportError> {
    let summary = warehouse.order_summary(order_id)?;
    writeln!(out, "Order {} Details:", summary.order_id)?;
    for line in &summary.lines {
        writeln!(
            out,
            "name: {}, id: {}, amount: {:.3}, price: {:.3}",
            line.name, line.id, line.quantity, line.price
        )?;
    }
    writeln!(out, "----------")?;
    writeln!(out, "Total Price: {:.3}", summary.total)?;
    Ok(())
}

pub fn write_best_selling<D>(out: &mut impl Write, warehouse: &Warehouse<D>) -> Result<(), ReportError> {
    writeln!(out, "Best Selling Product:")?;
    match warehouse.best_selling() {
        Some(best) => writeln!(
            out,
            "name: {}, id: {}, income: {:.3}",
            best.name, best.id, best.revenue
        )?,
        None => writeln!(out, "none")?,
    }
    Ok(())
}

/// Products accepted by `filter(id, name, stock, payload)`.
pub fn write_filtered<D, F>(
    out: &mut impl Write,
    warehouse: &Warehouse<D>,
    filter: F,
) -> Result<(), ReportError>
where
    F: FnMut(ProductId, &str, f64, &D) -> bool,
{
    for line in warehouse.filtered(filter) {
        write_product_line(out, &line)?;
    }
    Ok(())
}
