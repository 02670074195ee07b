use std::sync::Arc;

use stockroom_core::{AmountKind, DomainError, DomainResult, Entity, ProductId};

type CopyFn<D> = dyn Fn(&D) -> D + Send + Sync;
type FreeFn<D> = dyn Fn(D) + Send + Sync;
type PriceFn<D> = dyn Fn(&D, f64) -> f64 + Send + Sync;

/// Per-product behaviors injected by the caller.
///
/// - **copy** makes the record's own copy of the payload
/// - **free** releases that copy when the record is dropped from a collection
/// - **price** computes the price of a quantity of the product
pub struct ProductHooks<D> {
    copy: Arc<CopyFn<D>>,
    free: Arc<FreeFn<D>>,
    price: Arc<PriceFn<D>>,
}

impl<D> ProductHooks<D> {
    pub fn new(
        copy: impl Fn(&D) -> D + Send + Sync + 'static,
        free: impl Fn(D) + Send + Sync + 'static,
        price: impl Fn(&D, f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            copy: Arc::new(copy),
            free: Arc::new(free),
            price: Arc::new(price),
        }
    }

    pub fn builder() -> ProductHooksBuilder<D> {
        ProductHooksBuilder::default()
    }

    pub fn copy_payload(&self, payload: &D) -> D {
        (self.copy)(payload)
    }

    pub fn free_payload(&self, payload: D) {
        (self.free)(payload)
    }

    pub fn price(&self, payload: &D, quantity: f64) -> f64 {
        (self.price)(payload, quantity)
    }
}

impl<D> ProductHooks<D>
where
    D: Clone + 'static,
{
    /// Hooks for payloads that copy with `Clone` and free with drop.
    pub fn cloning(price: impl Fn(&D, f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::new(|payload: &D| payload.clone(), drop::<D>, price)
    }
}

impl<D> Clone for ProductHooks<D> {
    fn clone(&self) -> Self {
        Self {
            copy: Arc::clone(&self.copy),
            free: Arc::clone(&self.free),
            price: Arc::clone(&self.price),
        }
    }
}

impl<D> core::fmt::Debug for ProductHooks<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProductHooks").finish_non_exhaustive()
    }
}

/// Builder for [`ProductHooks`]; every hook is mandatory.
pub struct ProductHooksBuilder<D> {
    copy: Option<Arc<CopyFn<D>>>,
    free: Option<Arc<FreeFn<D>>>,
    price: Option<Arc<PriceFn<D>>>,
}

impl<D> Default for ProductHooksBuilder<D> {
    fn default() -> Self {
        Self {
            copy: None,
            free: None,
            price: None,
        }
    }
}

impl<D> ProductHooksBuilder<D> {
    pub fn copy(mut self, f: impl Fn(&D) -> D + Send + Sync + 'static) -> Self {
        self.copy = Some(Arc::new(f));
        self
    }

    pub fn free(mut self, f: impl Fn(D) + Send + Sync + 'static) -> Self {
        self.free = Some(Arc::new(f));
        self
    }

    pub fn price(mut self, f: impl Fn(&D, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.price = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> DomainResult<ProductHooks<D>> {
        Ok(ProductHooks {
            copy: self.copy.ok_or(DomainError::null_argument("copy payload"))?,
            free: self.free.ok_or(DomainError::null_argument("free payload"))?,
            price: self.price.ok_or(DomainError::null_argument("price"))?,
        })
    }
}

/// A product name must start with an ASCII letter or digit.
pub fn validate_name(name: &str) -> DomainResult<()> {
    match name.chars().next() {
        Some(c) if c.is_ascii_alphanumeric() => Ok(()),
        _ => Err(DomainError::invalid_name(name)),
    }
}

/// Catalog entry: identity, display data, pricing and accumulated revenue.
///
/// Stock is not stored here; it is the amount the catalog binds to the record.
pub struct ProductRecord<D> {
    id: ProductId,
    name: String,
    kind: AmountKind,
    revenue: f64,
    payload: D,
    hooks: ProductHooks<D>,
}

impl<D> ProductRecord<D> {
    /// Build a record holding its own copy of `payload`.
    ///
    /// Validation (name, amount) is the caller's job.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        kind: AmountKind,
        payload: &D,
        hooks: ProductHooks<D>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            revenue: 0.0,
            payload: hooks.copy_payload(payload),
            hooks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AmountKind {
        self.kind
    }

    /// Revenue accumulated by shipped orders.
    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    pub fn payload(&self) -> &D {
        &self.payload
    }

    pub fn price_for(&self, quantity: f64) -> f64 {
        self.hooks.price(&self.payload, quantity)
    }

    pub fn unit_price(&self) -> f64 {
        self.price_for(1.0)
    }

    /// Deep copy: the payload goes through the record's copy hook.
    pub fn duplicate(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
            revenue: self.revenue,
            payload: self.hooks.copy_payload(&self.payload),
            hooks: self.hooks.clone(),
        }
    }

    /// Tear down the record, handing the payload to the free hook.
    pub fn release(self) {
        let Self { payload, hooks, .. } = self;
        hooks.free_payload(payload);
    }

    pub(crate) fn credit(&mut self, amount: f64) {
        self.revenue += amount;
    }
}

impl<D> Entity for ProductRecord<D> {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

impl<D: core::fmt::Debug> core::fmt::Debug for ProductRecord<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProductRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("revenue", &self.revenue)
            .field("payload", &self.payload)
            .finish()
    }
}
