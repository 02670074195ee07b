//! Injected element behavior: copy, free and compare.

use core::cmp::Ordering;
use std::sync::Arc;

use crate::error::{AmountSetError, AmountSetResult};

type CopyFn<E> = dyn Fn(&E) -> E + Send + Sync;
type FreeFn<E> = dyn Fn(E) + Send + Sync;
type CompareFn<E> = dyn Fn(&E, &E) -> Ordering + Send + Sync;

/// Capability set a collection is permanently bound to.
///
/// - **copy** produces the owned copy stored on insertion and duplication
/// - **free** releases an owned copy when it leaves the collection
/// - **compare** orders elements; `Ordering::Equal` means "same element"
pub struct ElementBehavior<E> {
    copy: Arc<CopyFn<E>>,
    free: Arc<FreeFn<E>>,
    compare: Arc<CompareFn<E>>,
}

impl<E> ElementBehavior<E> {
    pub fn new(
        copy: impl Fn(&E) -> E + Send + Sync + 'static,
        free: impl Fn(E) + Send + Sync + 'static,
        compare: impl Fn(&E, &E) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        Self {
            copy: Arc::new(copy),
            free: Arc::new(free),
            compare: Arc::new(compare),
        }
    }

    /// Builder for callers whose behaviors may be missing.
    pub fn builder() -> ElementBehaviorBuilder<E> {
        ElementBehaviorBuilder::default()
    }

    pub fn copy(&self, element: &E) -> E {
        (self.copy)(element)
    }

    pub fn free(&self, element: E) {
        (self.free)(element)
    }

    pub fn compare(&self, a: &E, b: &E) -> Ordering {
        (self.compare)(a, b)
    }
}

impl<E> ElementBehavior<E>
where
    E: Clone + Ord + 'static,
{
    /// `Clone` to copy, drop to free, `Ord` to compare.
    pub fn natural() -> Self {
        Self {
            copy: Arc::new(|element: &E| element.clone()),
            free: Arc::new(drop::<E>),
            compare: Arc::new(|a: &E, b: &E| a.cmp(b)),
        }
    }
}

impl<E> Clone for ElementBehavior<E> {
    fn clone(&self) -> Self {
        Self {
            copy: Arc::clone(&self.copy),
            free: Arc::clone(&self.free),
            compare: Arc::clone(&self.compare),
        }
    }
}

impl<E> core::fmt::Debug for ElementBehavior<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ElementBehavior").finish_non_exhaustive()
    }
}

/// Builder for [`ElementBehavior`]; every behavior is mandatory.
pub struct ElementBehaviorBuilder<E> {
    copy: Option<Arc<CopyFn<E>>>,
    free: Option<Arc<FreeFn<E>>>,
    compare: Option<Arc<CompareFn<E>>>,
}

impl<E> Default for ElementBehaviorBuilder<E> {
    fn default() -> Self {
        Self {
            copy: None,
            free: None,
            compare: None,
        }
    }
}

impl<E> ElementBehaviorBuilder<E> {
    pub fn copy(mut self, f: impl Fn(&E) -> E + Send + Sync + 'static) -> Self {
        self.copy = Some(Arc::new(f));
        self
    }

    pub fn free(mut self, f: impl Fn(E) + Send + Sync + 'static) -> Self {
        self.free = Some(Arc::new(f));
        self
    }

    pub fn compare(mut self, f: impl Fn(&E, &E) -> Ordering + Send + Sync + 'static) -> Self {
        self.compare = Some(Arc::new(f));
        self
    }

    /// Fails with [`AmountSetError::NullArgument`] naming the first missing
    /// behavior.
    pub fn build(self) -> AmountSetResult<ElementBehavior<E>> {
        Ok(ElementBehavior {
            copy: self.copy.ok_or(AmountSetError::NullArgument("copy"))?,
            free: self.free.ok_or(AmountSetError::NullArgument("free"))?,
            compare: self.compare.ok_or(AmountSetError::NullArgument("compare"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_fails_when_a_behavior_is_missing() {
        let err = ElementBehavior::<u32>::builder()
            .copy(|x| *x)
            .compare(|a, b| a.cmp(b))
            .build()
            .unwrap_err();
        assert_eq!(err, AmountSetError::NullArgument("free"));

        let err = ElementBehavior::<u32>::builder().build().unwrap_err();
        assert_eq!(err, AmountSetError::NullArgument("copy"));
    }

    #[test]
    fn build_succeeds_with_all_behaviors() {
        let behavior = ElementBehavior::<u32>::builder()
            .copy(|x| *x)
            .free(drop)
            .compare(|a, b| b.cmp(a))
            .build()
            .unwrap();
        assert_eq!(behavior.compare(&1, &2), Ordering::Greater);
        assert_eq!(behavior.copy(&9), 9);
    }

    #[test]
    fn natural_behavior_uses_ord() {
        let behavior = ElementBehavior::<String>::natural();
        assert_eq!(behavior.compare(&"a".into(), &"b".into()), Ordering::Less);
        assert_eq!(behavior.copy(&"x".to_string()), "x");
    }
}
