//! Scripted warehouse session: stocks a few products, runs orders through
//! shipping and cancellation, and prints the reports.
//!
//! `--json` prints the read models as JSON instead of the text reports.

use std::io::Write;

use anyhow::Context;

use stockroom_core::{AmountKind, DomainError, ProductId};
use stockroom_inventory::{Warehouse, WarehouseConfig, report};
use stockroom_products::ProductHooks;

/// Demo payload: price per unit.
type UnitPrice = f64;

fn per_unit() -> ProductHooks<UnitPrice> {
    ProductHooks::cloning(|unit: &UnitPrice, quantity| unit * quantity)
}

fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let config = WarehouseConfig::from_env().context("invalid warehouse configuration")?;
    tracing::info!(?config, "starting demo session");
    let mut warehouse: Warehouse<UnitPrice> = Warehouse::with_config(&config);

    let products = [
        (1, "apple", 40.0, AmountKind::Integer, 0.8),
        (2, "milk", 12.5, AmountKind::HalfInteger, 1.2),
        (3, "flour", 25.75, AmountKind::Any, 0.9),
        (4, "9volt battery", 6.0, AmountKind::Integer, 3.5),
    ];
    for (id, name, amount, kind, unit) in products {
        warehouse
            .add_product(ProductId::new(id), name, amount, kind, &unit, per_unit())
            .with_context(|| format!("adding product {id}"))?;
    }

    let groceries = warehouse.create_order()?;
    warehouse.change_quantity_in_order(groceries, ProductId::new(1), 6.0)?;
    warehouse.change_quantity_in_order(groceries, ProductId::new(2), 2.5)?;
    warehouse.change_quantity_in_order(groceries, ProductId::new(3), 1.25)?;

    let too_big = warehouse.create_order()?;
    warehouse.change_quantity_in_order(too_big, ProductId::new(4), 10.0)?;

    let mut stdout = std::io::stdout().lock();
    let json = std::env::args().any(|arg| arg == "--json");

    if json {
        let summary = warehouse.order_summary(groceries)?;
        writeln!(stdout, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        report::write_order(&mut stdout, &warehouse, groceries)?;
    }

    warehouse.ship_order(groceries)?;
    match warehouse.ship_order(too_big) {
        Err(DomainError::InsufficientAmount(product)) => {
            tracing::info!(%product, "order held back, cancelling");
            warehouse.cancel_order(too_big)?;
        }
        other => other.context("shipping the oversized order")?,
    }

    if json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&warehouse.inventory())?)?;
        writeln!(stdout, "{}", serde_json::to_string_pretty(&warehouse.best_selling())?)?;
    } else {
        report::write_inventory(&mut stdout, &warehouse)?;
        report::write_best_selling(&mut stdout, &warehouse)?;
        writeln!(stdout, "Low stock:")?;
        report::write_filtered(&mut stdout, &warehouse, |_, _, amount, _| amount < 10.0)?;
    }

    Ok(())
}
