//! The sorted amount collection.

use core::cmp::Ordering;

use crate::behavior::ElementBehavior;
use crate::cursor::{Cursor, Iter};
use crate::error::{AmountSetError, AmountSetResult};

pub(crate) struct Entry<E> {
    pub(crate) element: E,
    pub(crate) amount: f64,
}

/// Ordered collection of unique elements, each bound to an amount.
///
/// Invariants:
/// - no two stored elements compare equal under the bound comparator
/// - storage is in strictly ascending comparator order
/// - a stored amount never drops below zero through [`AmountSet::change_amount`]
///
/// The set owns a copy (made through the copy behavior) of every element it
/// stores and releases it through the free behavior on removal, on
/// [`AmountSet::clear`] and on drop. Callers keep ownership of the values they
/// pass in.
pub struct AmountSet<E> {
    behavior: ElementBehavior<E>,
    entries: Vec<Entry<E>>,
}

impl<E> AmountSet<E> {
    /// Create an empty set permanently bound to `behavior`.
    pub fn new(behavior: ElementBehavior<E>) -> Self {
        Self {
            behavior,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, element: &E) -> bool {
        self.locate(element).is_ok()
    }

    /// Like [`AmountSet::contains`], with `probe` ordering a stored element
    /// against the sought key.
    pub fn contains_by(&self, probe: impl FnMut(&E) -> Ordering) -> bool {
        self.locate_by(probe).is_ok()
    }

    pub fn get_by(&self, probe: impl FnMut(&E) -> Ordering) -> Option<&E> {
        self.locate_by(probe)
            .ok()
            .map(|index| &self.entries[index].element)
    }

    /// Store an owned copy of `element` with amount zero.
    pub fn insert(&mut self, element: &E) -> AmountSetResult<()> {
        let index = match self.locate(element) {
            Ok(_) => return Err(AmountSetError::AlreadyExists),
            Err(index) => index,
        };
        self.entries
            .try_reserve(1)
            .map_err(|_| AmountSetError::OutOfMemory)?;
        let element = self.behavior.copy(element);
        self.entries.insert(index, Entry { element, amount: 0.0 });
        Ok(())
    }

    pub fn remove(&mut self, element: &E) -> AmountSetResult<()> {
        let index = self
            .locate(element)
            .map_err(|_| AmountSetError::DoesNotExist)?;
        self.release_at(index);
        Ok(())
    }

    pub fn remove_by(&mut self, probe: impl FnMut(&E) -> Ordering) -> AmountSetResult<()> {
        let index = self
            .locate_by(probe)
            .map_err(|_| AmountSetError::DoesNotExist)?;
        self.release_at(index);
        Ok(())
    }

    pub fn amount(&self, element: &E) -> AmountSetResult<f64> {
        self.locate(element)
            .map(|index| self.entries[index].amount)
            .map_err(|_| AmountSetError::DoesNotExist)
    }

    pub fn amount_by(&self, probe: impl FnMut(&E) -> Ordering) -> AmountSetResult<f64> {
        self.locate_by(probe)
            .map(|index| self.entries[index].amount)
            .map_err(|_| AmountSetError::DoesNotExist)
    }

    /// Add `delta` (possibly negative or zero) to the element's amount.
    ///
    /// Fails with [`AmountSetError::InsufficientAmount`] if the result would be
    /// below zero; reaching exactly zero is allowed.
    pub fn change_amount(&mut self, element: &E, delta: f64) -> AmountSetResult<()> {
        let index = self
            .locate(element)
            .map_err(|_| AmountSetError::DoesNotExist)?;
        self.change_amount_at(index, delta)
    }

    pub fn change_amount_by(
        &mut self,
        probe: impl FnMut(&E) -> Ordering,
        delta: f64,
    ) -> AmountSetResult<()> {
        let index = self
            .locate_by(probe)
            .map_err(|_| AmountSetError::DoesNotExist)?;
        self.change_amount_at(index, delta)
    }

    /// Mutate a stored element in place.
    ///
    /// `update` must not change how the element compares to the others.
    pub fn update_by(
        &mut self,
        probe: impl FnMut(&E) -> Ordering,
        update: impl FnOnce(&mut E),
    ) -> AmountSetResult<()> {
        let index = self
            .locate_by(probe)
            .map_err(|_| AmountSetError::DoesNotExist)?;
        update(&mut self.entries[index].element);
        debug_assert!(self.in_order_at(index), "update_by changed element ordering");
        Ok(())
    }

    /// Remove every element, releasing each owned copy.
    pub fn clear(&mut self) {
        let behavior = &self.behavior;
        for entry in self.entries.drain(..) {
            behavior.free(entry.element);
        }
    }

    /// Independent copy: same behaviors, a fresh owned copy of every element,
    /// identical amounts and order.
    pub fn duplicate(&self) -> AmountSetResult<Self> {
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(self.entries.len())
            .map_err(|_| AmountSetError::OutOfMemory)?;
        entries.extend(self.entries.iter().map(|entry| Entry {
            element: self.behavior.copy(&entry.element),
            amount: entry.amount,
        }));
        Ok(Self {
            behavior: self.behavior.clone(),
            entries,
        })
    }

    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(&self.entries)
    }

    pub fn cursor(&self) -> Cursor<'_, E> {
        Cursor::new(&self.entries)
    }

    fn locate(&self, element: &E) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|entry| self.behavior.compare(&entry.element, element))
    }

    fn locate_by(&self, mut probe: impl FnMut(&E) -> Ordering) -> Result<usize, usize> {
        self.entries.binary_search_by(|entry| probe(&entry.element))
    }

    fn change_amount_at(&mut self, index: usize, delta: f64) -> AmountSetResult<()> {
        let entry = &mut self.entries[index];
        let updated = entry.amount + delta;
        // Negated comparison also rejects NaN.
        if !(updated >= 0.0) {
            return Err(AmountSetError::InsufficientAmount);
        }
        entry.amount = updated;
        Ok(())
    }

    fn release_at(&mut self, index: usize) {
        let entry = self.entries.remove(index);
        self.behavior.free(entry.element);
    }

    fn in_order_at(&self, index: usize) -> bool {
        let current = &self.entries[index].element;
        let after_previous = index == 0
            || self.behavior.compare(&self.entries[index - 1].element, current) == Ordering::Less;
        let before_next = self
            .entries
            .get(index + 1)
            .is_none_or(|next| self.behavior.compare(current, &next.element) == Ordering::Less);
        after_previous && before_next
    }
}

impl<E> Drop for AmountSet<E> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a, E> IntoIterator for &'a AmountSet<E> {
    type Item = (&'a E, f64);
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: core::fmt::Debug> core::fmt::Debug for AmountSet<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
