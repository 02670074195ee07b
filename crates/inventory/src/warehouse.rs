use tracing::{debug, instrument, warn};

use stockroom_core::{
    AmountKind, AmountRules, DomainError, DomainResult, Entity, OrderId, ProductId,
};
use stockroom_products::{Catalog, ProductHooks, ProductRecord, validate_name};
use stockroom_sales::OrderBook;

use crate::config::WarehouseConfig;
use crate::view::{BestSeller, InventoryLine, OrderLine, OrderSummary};

/// Catalog plus open orders, with the rules that keep them consistent.
///
/// `D` is the per-product payload type handed to pricing and filters.
pub struct Warehouse<D> {
    catalog: Catalog<D>,
    orders: OrderBook,
    rules: AmountRules,
}

impl<D: 'static> Warehouse<D> {
    pub fn new() -> Self {
        Self::with_rules(AmountRules::default())
    }

    pub fn with_config(config: &WarehouseConfig) -> Self {
        Self::with_rules(config.rules())
    }

    pub fn with_rules(rules: AmountRules) -> Self {
        Self {
            catalog: Catalog::new(),
            orders: OrderBook::new(),
            rules,
        }
    }
}

impl<D: 'static> Default for Warehouse<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Warehouse<D> {
    pub fn rules(&self) -> AmountRules {
        self.rules
    }

    pub fn catalog(&self) -> &Catalog<D> {
        &self.catalog
    }

    pub fn orders(&self) -> &OrderBook {
        &self.orders
    }

    /// Register a product and credit its initial stock.
    ///
    /// Checks run in order: name, amount, id uniqueness. The warehouse keeps
    /// its own copy of `payload` (through the copy hook).
    #[instrument(level = "debug", skip(self, payload, hooks), fields(product = %id))]
    pub fn add_product(
        &mut self,
        id: ProductId,
        name: &str,
        amount: f64,
        kind: AmountKind,
        payload: &D,
        hooks: ProductHooks<D>,
    ) -> DomainResult<()> {
        validate_name(name)?;
        let initial = self
            .rules
            .accept(kind, amount)
            .ok_or(DomainError::invalid_amount(amount))?;
        if self.catalog.contains(id) {
            return Err(DomainError::ProductAlreadyExists(id));
        }

        let record = ProductRecord::new(id, name, kind, payload, hooks);
        let registered = self.catalog.register(&record);
        record.release();
        registered?;

        if let Err(e) = self.catalog.adjust_stock(id, initial) {
            if let Err(rollback) = self.catalog.remove(id) {
                warn!(%rollback, "failed to roll back partially added product");
            }
            return Err(e);
        }
        debug!(stock = initial, "product added");
        Ok(())
    }

    /// Increase or decrease a product's stock.
    ///
    /// Both the magnitude of `delta` and the resulting stock must suit the
    /// product's amount kind; a zero delta is validated and then changes
    /// nothing.
    #[instrument(level = "debug", skip(self), fields(product = %id))]
    pub fn change_stock(&mut self, id: ProductId, delta: f64) -> DomainResult<()> {
        let kind = self.product(id)?.kind();
        let supplied = delta;
        let delta = self
            .rules
            .accept_delta(kind, delta)
            .ok_or(DomainError::invalid_amount(supplied))?;
        let current = self.catalog.stock(id)?;
        if current + delta < 0.0 {
            return Err(DomainError::InsufficientAmount(id));
        }
        let adjustment = self
            .rules
            .accept_change(kind, current, delta)
            .ok_or(DomainError::invalid_amount(supplied))?;
        self.catalog.adjust_stock(id, adjustment)?;
        debug!(adjustment, "stock changed");
        Ok(())
    }

    /// Remove a product from the catalog and from every open order.
    #[instrument(level = "debug", skip(self), fields(product = %id))]
    pub fn clear_product(&mut self, id: ProductId) -> DomainResult<()> {
        self.catalog.remove(id)?;
        let carts = self.orders.purge_product(id);
        debug!(carts, "product cleared");
        Ok(())
    }

    /// Open an empty order under a fresh id.
    pub fn create_order(&mut self) -> DomainResult<OrderId> {
        let id = self.orders.open()?;
        debug!(order = %id, "order created");
        Ok(id)
    }

    /// Add, increase, decrease or remove a product in an order.
    ///
    /// Checks run in order: order, product, amount. A positive resulting
    /// quantity must itself suit the product's amount kind; a result of zero or
    /// less removes the product from the cart.
    #[instrument(level = "debug", skip(self), fields(order = %order_id, product = %product_id))]
    pub fn change_quantity_in_order(
        &mut self,
        order_id: OrderId,
        product_id: ProductId,
        delta: f64,
    ) -> DomainResult<()> {
        let current = self.orders.get(order_id)?.quantity(product_id).unwrap_or(0.0);
        let kind = self.product(product_id)?.kind();
        let supplied = delta;
        let mut delta = self
            .rules
            .accept_delta(kind, delta)
            .ok_or(DomainError::invalid_amount(supplied))?;
        if current + delta > 0.0 {
            delta = self
                .rules
                .accept_change(kind, current, delta)
                .ok_or(DomainError::invalid_amount(supplied))?;
        }
        self.orders
            .get_mut(order_id)?
            .change_quantity(product_id, delta)
    }

    /// Ship an order: debit stock, credit revenue, close the order.
    ///
    /// All quantities are checked against stock, and all prices for being
    /// finite and non-negative, before anything is written; if one line fails,
    /// nothing changes and the order stays open.
    #[instrument(level = "debug", skip(self), fields(order = %order_id))]
    pub fn ship_order(&mut self, order_id: OrderId) -> DomainResult<()> {
        let order = self.orders.get(order_id)?;

        let mut shipment = Vec::with_capacity(order.len());
        for (product, quantity) in order.lines() {
            let record = self.product(product)?;
            let stock = self.catalog.stock(product)?;
            if quantity > stock {
                warn!(%product, quantity, stock, "shipment rejected: insufficient stock");
                return Err(DomainError::InsufficientAmount(product));
            }
            let price = record.price_for(quantity);
            if !price.is_finite() || price < 0.0 {
                warn!(%product, quantity, price, "shipment rejected: invalid price");
                return Err(DomainError::InvalidAmount(price));
            }
            shipment.push((product, quantity, price));
        }

        for &(product, quantity, price) in &shipment {
            self.catalog.adjust_stock(product, -quantity)?;
            self.catalog.credit_revenue(product, price)?;
        }
        self.orders.close(order_id)?;
        debug!(lines = shipment.len(), "order shipped");
        Ok(())
    }

    /// Discard an order; stock is untouched.
    #[instrument(level = "debug", skip(self), fields(order = %order_id))]
    pub fn cancel_order(&mut self, order_id: OrderId) -> DomainResult<()> {
        self.orders.close(order_id)?;
        debug!("order cancelled");
        Ok(())
    }

    pub fn stock(&self, id: ProductId) -> DomainResult<f64> {
        self.catalog.stock(id)
    }

    pub fn revenue(&self, id: ProductId) -> DomainResult<f64> {
        self.product(id).map(ProductRecord::revenue)
    }

    /// Every product in id order.
    pub fn inventory(&self) -> Vec<InventoryLine> {
        self.catalog
            .iter()
            .map(|(record, stock)| InventoryLine::of(record, stock))
            .collect()
    }

    /// Products accepted by `filter(id, name, stock, payload)`, in id order.
    pub fn filtered<F>(&self, filter: F) -> Vec<InventoryLine>
    where
        F: FnMut(ProductId, &str, f64, &D) -> bool,
    {
        self.catalog
            .filtered(filter)
            .map(|(record, stock)| InventoryLine::of(record, stock))
            .collect()
    }

    /// Cart contents priced at current catalog prices.
    pub fn order_summary(&self, order_id: OrderId) -> DomainResult<OrderSummary> {
        let order = self.orders.get(order_id)?;
        let lines = order
            .lines()
            .map(|(product, quantity)| {
                let record = self.product(product)?;
                Ok(OrderLine {
                    id: product,
                    name: record.name().to_string(),
                    quantity,
                    price: record.price_for(quantity),
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;
        let total: f64 = lines.iter().map(|line| line.price).sum();
        Ok(OrderSummary {
            order_id: order.id(),
            lines,
            total,
        })
    }

    pub fn best_selling(&self) -> Option<BestSeller> {
        self.catalog.best_selling().map(|record| BestSeller {
            id: record.id(),
            name: record.name().to_string(),
            revenue: record.revenue(),
        })
    }

    fn product(&self, id: ProductId) -> DomainResult<&ProductRecord<D>> {
        self.catalog.get(id).ok_or(DomainError::ProductNotExist(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::AmountPolicy;

    /// Payload: price per unit.
    fn priced() -> ProductHooks<f64> {
        ProductHooks::cloning(|unit: &f64, quantity| unit * quantity)
    }

    fn pid(id: u32) -> ProductId {
        ProductId::new(id)
    }

    fn warehouse_with(products: &[(u32, &str, f64, AmountKind, f64)]) -> Warehouse<f64> {
        let mut warehouse = Warehouse::new();
        for &(id, name, amount, kind, unit) in products {
            warehouse
                .add_product(pid(id), name, amount, kind, &unit, priced())
                .unwrap();
        }
        warehouse
    }

    #[test]
    fn add_product_accepts_amount_within_tolerance() {
        let mut warehouse = Warehouse::new();
        warehouse
            .add_product(pid(1), "apple7", 3.0005, AmountKind::Integer, &1.0, priced())
            .unwrap();
        assert_eq!(warehouse.stock(pid(1)).unwrap(), 3.0);

        let err = warehouse
            .add_product(pid(2), "apple8", 3.01, AmountKind::Integer, &1.0, priced())
            .unwrap_err();
        assert_eq!(err, DomainError::InvalidAmount(3.01));
        assert!(!warehouse.catalog().contains(pid(2)));
    }

    #[test]
    fn keep_policy_stores_amount_as_supplied() {
        let mut warehouse = Warehouse::with_rules(AmountRules::new(0.001, AmountPolicy::Keep));
        warehouse
            .add_product(pid(1), "apple", 3.0005, AmountKind::Integer, &1.0, priced())
            .unwrap();
        assert_eq!(warehouse.stock(pid(1)).unwrap(), 3.0005);
    }

    #[test]
    fn keep_policy_rejects_changes_that_drift_off_the_kind() {
        let mut warehouse = Warehouse::with_rules(AmountRules::new(0.001, AmountPolicy::Keep));
        warehouse
            .add_product(pid(1), "apple", 3.0, AmountKind::Integer, &1.0, priced())
            .unwrap();

        warehouse.change_stock(pid(1), 0.0009).unwrap();
        for _ in 0..10 {
            assert_eq!(
                warehouse.change_stock(pid(1), 0.0009).unwrap_err(),
                DomainError::InvalidAmount(0.0009)
            );
        }
        let stock = warehouse.stock(pid(1)).unwrap();
        assert!((stock - stock.round()).abs() <= 0.001, "stock drifted to {stock}");

        let order = warehouse.create_order().unwrap();
        warehouse.change_quantity_in_order(order, pid(1), 2.0009).unwrap();
        assert_eq!(
            warehouse.change_quantity_in_order(order, pid(1), 0.0009).unwrap_err(),
            DomainError::InvalidAmount(0.0009)
        );
        let quantity = warehouse.orders().get(order).unwrap().quantity(pid(1)).unwrap();
        assert_eq!(quantity, 2.0009);

        warehouse.change_quantity_in_order(order, pid(1), -3.0).unwrap();
        assert!(warehouse.orders().get(order).unwrap().is_empty());
    }

    #[test]
    fn snap_policy_keeps_changes_exact() {
        let mut warehouse = warehouse_with(&[(1, "apple", 3.0, AmountKind::Integer, 1.0)]);
        for _ in 0..10 {
            warehouse.change_stock(pid(1), 1.0004).unwrap();
        }
        assert_eq!(warehouse.stock(pid(1)).unwrap(), 13.0);
    }

    #[test]
    fn add_product_validates_in_order() {
        let mut warehouse = warehouse_with(&[(1, "apple", 1.0, AmountKind::Any, 1.0)]);
        assert_eq!(
            warehouse
                .add_product(pid(1), "_bad", -1.0, AmountKind::Any, &1.0, priced())
                .unwrap_err(),
            DomainError::invalid_name("_bad")
        );
        assert_eq!(
            warehouse
                .add_product(pid(1), "good", -1.0, AmountKind::Any, &1.0, priced())
                .unwrap_err(),
            DomainError::InvalidAmount(-1.0)
        );
        assert_eq!(
            warehouse
                .add_product(pid(1), "good", 1.0, AmountKind::Any, &1.0, priced())
                .unwrap_err(),
            DomainError::ProductAlreadyExists(pid(1))
        );
    }

    #[test]
    fn change_stock_validates_magnitude_against_kind() {
        let mut warehouse = warehouse_with(&[(1, "milk", 4.0, AmountKind::HalfInteger, 1.0)]);
        warehouse.change_stock(pid(1), -1.5).unwrap();
        assert_eq!(warehouse.stock(pid(1)).unwrap(), 2.5);
        assert_eq!(
            warehouse.change_stock(pid(1), 0.3).unwrap_err(),
            DomainError::InvalidAmount(0.3)
        );
        assert_eq!(
            warehouse.change_stock(pid(1), -3.0).unwrap_err(),
            DomainError::InsufficientAmount(pid(1))
        );
        warehouse.change_stock(pid(1), -2.5).unwrap();
        assert_eq!(warehouse.stock(pid(1)).unwrap(), 0.0);
        assert_eq!(
            warehouse.change_stock(pid(9), 0.0).unwrap_err(),
            DomainError::ProductNotExist(pid(9))
        );
    }

    #[test]
    fn change_quantity_checks_order_then_product_then_amount() {
        let mut warehouse = warehouse_with(&[(1, "egg", 12.0, AmountKind::Integer, 0.5)]);
        let missing = OrderId::new(42).unwrap();
        assert_eq!(
            warehouse.change_quantity_in_order(missing, pid(7), 0.5).unwrap_err(),
            DomainError::OrderNotExist(missing)
        );
        let order = warehouse.create_order().unwrap();
        assert_eq!(
            warehouse.change_quantity_in_order(order, pid(7), 0.5).unwrap_err(),
            DomainError::ProductNotExist(pid(7))
        );
        assert_eq!(
            warehouse.change_quantity_in_order(order, pid(1), 0.5).unwrap_err(),
            DomainError::InvalidAmount(0.5)
        );
        warehouse.change_quantity_in_order(order, pid(1), 0.0).unwrap();
        assert!(warehouse.orders().get(order).unwrap().is_empty());
    }

    #[test]
    fn order_quantity_may_exceed_stock_until_shipping() {
        let mut warehouse = warehouse_with(&[(1, "egg", 2.0, AmountKind::Integer, 0.5)]);
        let order = warehouse.create_order().unwrap();
        warehouse.change_quantity_in_order(order, pid(1), 5.0).unwrap();
        assert_eq!(
            warehouse.ship_order(order).unwrap_err(),
            DomainError::InsufficientAmount(pid(1))
        );
        assert!(warehouse.orders().contains(order));
        assert_eq!(warehouse.stock(pid(1)).unwrap(), 2.0);
    }

    #[test]
    fn shipping_is_atomic() {
        let mut warehouse = warehouse_with(&[
            (1, "apple", 10.0, AmountKind::Integer, 1.0),
            (2, "banana", 3.0, AmountKind::Integer, 2.0),
        ]);
        let order = warehouse.create_order().unwrap();
        warehouse.change_quantity_in_order(order, pid(1), 10.0).unwrap();
        warehouse.change_quantity_in_order(order, pid(2), 5.0).unwrap();

        assert_eq!(
            warehouse.ship_order(order).unwrap_err(),
            DomainError::InsufficientAmount(pid(2))
        );
        assert_eq!(warehouse.stock(pid(1)).unwrap(), 10.0);
        assert_eq!(warehouse.stock(pid(2)).unwrap(), 3.0);
        assert_eq!(warehouse.revenue(pid(1)).unwrap(), 0.0);
        assert!(warehouse.orders().contains(order));
    }

    #[test]
    fn shipping_debits_stock_and_credits_revenue() {
        let mut warehouse = warehouse_with(&[
            (1, "apple", 10.0, AmountKind::Integer, 1.5),
            (2, "flour", 3.0, AmountKind::Any, 2.0),
        ]);
        let order = warehouse.create_order().unwrap();
        warehouse.change_quantity_in_order(order, pid(1), 4.0).unwrap();
        warehouse.change_quantity_in_order(order, pid(2), 3.0).unwrap();
        warehouse.ship_order(order).unwrap();

        assert_eq!(warehouse.stock(pid(1)).unwrap(), 6.0);
        assert_eq!(warehouse.stock(pid(2)).unwrap(), 0.0);
        assert_eq!(warehouse.revenue(pid(1)).unwrap(), 6.0);
        assert_eq!(warehouse.revenue(pid(2)).unwrap(), 6.0);
        assert!(!warehouse.orders().contains(order));
        assert_eq!(
            warehouse.ship_order(order).unwrap_err(),
            DomainError::OrderNotExist(order)
        );
    }

    #[test]
    fn negative_price_rejects_the_shipment() {
        let mut warehouse = warehouse_with(&[(1, "apple", 10.0, AmountKind::Integer, -2.0)]);
        let order = warehouse.create_order().unwrap();
        warehouse.change_quantity_in_order(order, pid(1), 2.0).unwrap();

        assert_eq!(
            warehouse.ship_order(order).unwrap_err(),
            DomainError::InvalidAmount(-4.0)
        );
        assert_eq!(warehouse.stock(pid(1)).unwrap(), 10.0);
        assert_eq!(warehouse.revenue(pid(1)).unwrap(), 0.0);
        assert!(warehouse.orders().contains(order));
    }

    #[test]
    fn nan_price_leaves_every_line_untouched() {
        let mut warehouse = warehouse_with(&[
            (1, "apple", 10.0, AmountKind::Integer, 1.0),
            (2, "pear", 10.0, AmountKind::Integer, f64::NAN),
        ]);
        let order = warehouse.create_order().unwrap();
        warehouse.change_quantity_in_order(order, pid(1), 3.0).unwrap();
        warehouse.change_quantity_in_order(order, pid(2), 1.0).unwrap();

        assert!(matches!(
            warehouse.ship_order(order),
            Err(DomainError::InvalidAmount(price)) if price.is_nan()
        ));
        assert_eq!(warehouse.stock(pid(1)).unwrap(), 10.0);
        assert_eq!(warehouse.revenue(pid(1)).unwrap(), 0.0);
        assert_eq!(warehouse.revenue(pid(2)).unwrap(), 0.0);
        assert!(warehouse.best_selling().is_none());
        assert!(warehouse.orders().contains(order));

        warehouse.change_quantity_in_order(order, pid(2), -1.0).unwrap();
        warehouse.ship_order(order).unwrap();
        assert_eq!(warehouse.best_selling().unwrap().id, pid(1));
    }

    #[test]
    fn empty_order_ships_trivially() {
        let mut warehouse: Warehouse<f64> = Warehouse::new();
        let order = warehouse.create_order().unwrap();
        warehouse.ship_order(order).unwrap();
        assert!(warehouse.orders().is_empty());
    }

    #[test]
    fn cancel_leaves_stock_untouched() {
        let mut warehouse = warehouse_with(&[(1, "apple", 10.0, AmountKind::Integer, 1.0)]);
        let order = warehouse.create_order().unwrap();
        warehouse.change_quantity_in_order(order, pid(1), 4.0).unwrap();
        warehouse.cancel_order(order).unwrap();
        assert_eq!(warehouse.stock(pid(1)).unwrap(), 10.0);
        assert_eq!(
            warehouse.cancel_order(order).unwrap_err(),
            DomainError::OrderNotExist(order)
        );
        assert_eq!(warehouse.create_order().unwrap().get(), 2);
    }

    #[test]
    fn clear_product_purges_it_from_orders() {
        let mut warehouse = warehouse_with(&[
            (1, "apple", 10.0, AmountKind::Integer, 1.0),
            (2, "pear", 10.0, AmountKind::Integer, 1.0),
        ]);
        let order = warehouse.create_order().unwrap();
        warehouse.change_quantity_in_order(order, pid(1), 1.0).unwrap();
        warehouse.change_quantity_in_order(order, pid(2), 1.0).unwrap();

        warehouse.clear_product(pid(1)).unwrap();
        assert_eq!(
            warehouse.change_quantity_in_order(order, pid(1), 1.0).unwrap_err(),
            DomainError::ProductNotExist(pid(1))
        );
        assert_eq!(
            warehouse.change_stock(pid(1), 1.0).unwrap_err(),
            DomainError::ProductNotExist(pid(1))
        );
        let summary = warehouse.order_summary(order).unwrap();
        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.lines[0].id, pid(2));
    }

    #[test]
    fn readded_product_starts_with_zero_revenue() {
        let mut warehouse = warehouse_with(&[(1, "apple", 10.0, AmountKind::Integer, 2.0)]);
        let order = warehouse.create_order().unwrap();
        warehouse.change_quantity_in_order(order, pid(1), 2.0).unwrap();
        warehouse.ship_order(order).unwrap();
        assert_eq!(warehouse.best_selling().unwrap().revenue, 4.0);

        warehouse.clear_product(pid(1)).unwrap();
        warehouse
            .add_product(pid(1), "apple", 1.0, AmountKind::Integer, &2.0, priced())
            .unwrap();
        assert_eq!(warehouse.revenue(pid(1)).unwrap(), 0.0);
        assert!(warehouse.best_selling().is_none());
    }

    #[test]
    fn order_summary_prices_each_line() {
        let mut warehouse = warehouse_with(&[
            (3, "cheese", 5.0, AmountKind::HalfInteger, 8.0),
            (1, "bread", 5.0, AmountKind::Integer, 3.0),
        ]);
        let order = warehouse.create_order().unwrap();
        warehouse.change_quantity_in_order(order, pid(3), 1.5).unwrap();
        warehouse.change_quantity_in_order(order, pid(1), 2.0).unwrap();

        let summary = warehouse.order_summary(order).unwrap();
        assert_eq!(summary.order_id, order);
        let ids: Vec<ProductId> = summary.lines.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![pid(1), pid(3)]);
        assert_eq!(summary.lines[1].price, 12.0);
        assert_eq!(summary.total, 18.0);
    }

    #[test]
    fn inventory_and_filter_views() {
        let warehouse = warehouse_with(&[
            (2, "pear", 0.0, AmountKind::Integer, 2.0),
            (1, "apple", 7.0, AmountKind::Integer, 1.0),
        ]);
        let inventory = warehouse.inventory();
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory[0].name, "apple");
        assert_eq!(inventory[0].unit_price, 1.0);
        assert_eq!(inventory[1].amount, 0.0);

        let in_stock = warehouse.filtered(|_, _, amount, _| amount > 0.0);
        assert_eq!(in_stock.len(), 1);
        assert_eq!(in_stock[0].id, pid(1));
    }
}
