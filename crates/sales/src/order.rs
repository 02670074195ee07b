use std::collections::BTreeMap;

use stockroom_amount_set::{AmountSet, AmountSetError, ElementBehavior};
use stockroom_core::{DomainError, DomainResult, Entity, OrderId, ProductId};

/// Translate a cart collection failure for `product`.
fn cart_error(product: ProductId, err: AmountSetError) -> DomainError {
    match err {
        AmountSetError::NullArgument(what) => DomainError::NullArgument(what),
        AmountSetError::AlreadyExists => DomainError::ProductAlreadyExists(product),
        AmountSetError::DoesNotExist => DomainError::ProductNotExist(product),
        AmountSetError::OutOfMemory => DomainError::OutOfMemory,
        AmountSetError::InsufficientAmount => DomainError::InsufficientAmount(product),
    }
}

/// An open order and its cart.
pub struct Order {
    id: OrderId,
    cart: AmountSet<ProductId>,
}

impl Order {
    pub fn new(id: OrderId) -> Self {
        Self {
            id,
            cart: AmountSet::new(ElementBehavior::natural()),
        }
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.cart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn quantity(&self, product: ProductId) -> Option<f64> {
        self.cart.amount(&product).ok()
    }

    /// `(product, quantity)` in ascending product id order.
    pub fn lines(&self) -> impl Iterator<Item = (ProductId, f64)> + '_ {
        self.cart.iter().map(|(product, quantity)| (*product, quantity))
    }

    /// Apply an already-validated quantity delta.
    ///
    /// A product whose quantity would drop to zero or below leaves the cart;
    /// a product not yet in the cart is added when the result is positive.
    pub fn change_quantity(&mut self, product: ProductId, delta: f64) -> DomainResult<()> {
        if delta == 0.0 {
            return Ok(());
        }
        let current = self.quantity(product);
        let updated = current.unwrap_or(0.0) + delta;

        if updated <= 0.0 {
            if current.is_some() {
                self.cart
                    .remove(&product)
                    .map_err(|e| cart_error(product, e))?;
            }
            return Ok(());
        }

        if current.is_some() {
            return self
                .cart
                .change_amount(&product, delta)
                .map_err(|e| cart_error(product, e));
        }

        self.cart
            .insert(&product)
            .map_err(|e| cart_error(product, e))?;
        if let Err(e) = self.cart.change_amount(&product, updated) {
            // Leave the cart as it was.
            let rolled_back = self.cart.remove(&product);
            debug_assert!(rolled_back.is_ok(), "cart rollback failed for {product}");
            return Err(cart_error(product, e));
        }
        Ok(())
    }

    /// Drop `product` from the cart; returns whether it was there.
    pub fn remove_product(&mut self, product: ProductId) -> bool {
        self.cart.remove(&product).is_ok()
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }
}

impl core::fmt::Debug for Order {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Order")
            .field("id", &self.id)
            .field("cart", &self.cart)
            .finish()
    }
}

/// Open orders keyed by id, plus the id counter.
///
/// Ids are issued in strictly increasing order and never handed out twice,
/// even after the order holding them is shipped or cancelled.
#[derive(Debug, Default)]
pub struct OrderBook {
    orders: BTreeMap<OrderId, Order>,
    last_issued: Option<OrderId>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn last_issued(&self) -> Option<OrderId> {
        self.last_issued
    }

    /// Open a new empty order under the next unused id.
    ///
    /// Fails with [`DomainError::OutOfMemory`] once the id space is used up.
    pub fn open(&mut self) -> DomainResult<OrderId> {
        let id = match self.last_issued {
            None => OrderId::FIRST,
            Some(last) => last.next().ok_or(DomainError::OutOfMemory)?,
        };
        self.orders.insert(id, Order::new(id));
        self.last_issued = Some(id);
        Ok(id)
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.orders.contains_key(&id)
    }

    pub fn get(&self, id: OrderId) -> DomainResult<&Order> {
        self.orders.get(&id).ok_or(DomainError::OrderNotExist(id))
    }

    pub fn get_mut(&mut self, id: OrderId) -> DomainResult<&mut Order> {
        self.orders.get_mut(&id).ok_or(DomainError::OrderNotExist(id))
    }

    /// Remove and return the order.
    pub fn close(&mut self, id: OrderId) -> DomainResult<Order> {
        self.orders.remove(&id).ok_or(DomainError::OrderNotExist(id))
    }

    /// Remove `product` from every cart; returns how many carts held it.
    pub fn purge_product(&mut self, product: ProductId) -> usize {
        self.orders
            .values_mut()
            .map(|order| order.remove_product(product))
            .filter(|removed| *removed)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.values()
    }
}
