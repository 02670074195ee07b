//! Product catalog: authoritative stock, pricing and revenue.

use stockroom_amount_set::{AmountSet, AmountSetError, ElementBehavior};
use stockroom_core::{DomainError, DomainResult, Entity, ProductId};

use crate::product::ProductRecord;

/// Translate a catalog collection failure for product `id`.
fn catalog_error(id: ProductId, err: AmountSetError) -> DomainError {
    match err {
        AmountSetError::NullArgument(what) => DomainError::NullArgument(what),
        AmountSetError::AlreadyExists => DomainError::ProductAlreadyExists(id),
        AmountSetError::DoesNotExist => DomainError::ProductNotExist(id),
        AmountSetError::OutOfMemory => DomainError::OutOfMemory,
        AmountSetError::InsufficientAmount => DomainError::InsufficientAmount(id),
    }
}

/// Products ordered by id, each bound to its stock.
pub struct Catalog<D> {
    products: AmountSet<ProductRecord<D>>,
}

impl<D: 'static> Catalog<D> {
    pub fn new() -> Self {
        let behavior = ElementBehavior::new(
            |record: &ProductRecord<D>| record.duplicate(),
            |record: ProductRecord<D>| record.release(),
            |a: &ProductRecord<D>, b: &ProductRecord<D>| a.id().cmp(&b.id()),
        );
        Self {
            products: AmountSet::new(behavior),
        }
    }
}

impl<D: 'static> Default for Catalog<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Catalog<D> {
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.products.contains_by(by_id(id))
    }

    pub fn get(&self, id: ProductId) -> Option<&ProductRecord<D>> {
        self.products.get_by(by_id(id))
    }

    /// Current stock of product `id`.
    pub fn stock(&self, id: ProductId) -> DomainResult<f64> {
        self.products
            .amount_by(by_id(id))
            .map_err(|e| catalog_error(id, e))
    }

    /// Store a copy of `record` with zero stock.
    pub fn register(&mut self, record: &ProductRecord<D>) -> DomainResult<()> {
        self.products
            .insert(record)
            .map_err(|e| catalog_error(record.id(), e))
    }

    /// Apply an already-validated stock delta.
    pub fn adjust_stock(&mut self, id: ProductId, delta: f64) -> DomainResult<()> {
        self.products
            .change_amount_by(by_id(id), delta)
            .map_err(|e| catalog_error(id, e))
    }

    pub fn remove(&mut self, id: ProductId) -> DomainResult<()> {
        self.products
            .remove_by(by_id(id))
            .map_err(|e| catalog_error(id, e))
    }

    /// Add `amount` to the product's accumulated revenue.
    ///
    /// Revenue never decreases: a negative or non-finite `amount` is rejected.
    pub fn credit_revenue(&mut self, id: ProductId, amount: f64) -> DomainResult<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::InvalidAmount(amount));
        }
        self.products
            .update_by(by_id(id), |record| record.credit(amount))
            .map_err(|e| catalog_error(id, e))
    }

    /// `(record, stock)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductRecord<D>, f64)> + '_ {
        self.products.iter()
    }

    /// Products accepted by `filter(id, name, stock, payload)`, in id order.
    pub fn filtered<'a, F>(&'a self, mut filter: F) -> impl Iterator<Item = (&'a ProductRecord<D>, f64)> + 'a
    where
        F: FnMut(ProductId, &str, f64, &D) -> bool + 'a,
    {
        self.iter()
            .filter(move |(record, stock)| filter(record.id(), record.name(), *stock, record.payload()))
    }

    /// Highest-revenue product; ties go to the lowest id. `None` while no
    /// product has earned anything. Revenue that overflowed to infinity is
    /// not comparable and is skipped.
    pub fn best_selling(&self) -> Option<&ProductRecord<D>> {
        let mut best: Option<&ProductRecord<D>> = None;
        for (record, _) in self.iter() {
            if !record.revenue().is_finite() || record.revenue() <= 0.0 {
                continue;
            }
            if best.is_none_or(|b| record.revenue() > b.revenue()) {
                best = Some(record);
            }
        }
        best
    }
}

fn by_id<D>(id: ProductId) -> impl FnMut(&ProductRecord<D>) -> core::cmp::Ordering {
    move |record: &ProductRecord<D>| record.id().cmp(&id)
}

impl<D: core::fmt::Debug> core::fmt::Debug for Catalog<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Catalog")
            .field("products", &self.products)
            .finish()
    }
}
