//! Ordered traversal over an [`crate::AmountSet`].
//!
//! Traversal state lives in values handed to the caller, not in the set, so
//! any number of traversals may run side by side. Both types borrow the set:
//! mutating it while a traversal is alive does not compile.

use crate::set::Entry;

/// Iterator over `(element, amount)` pairs in ascending comparator order.
pub struct Iter<'a, E> {
    inner: core::slice::Iter<'a, Entry<E>>,
}

impl<'a, E> Iter<'a, E> {
    pub(crate) fn new(entries: &'a [Entry<E>]) -> Self {
        Self {
            inner: entries.iter(),
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = (&'a E, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.element, entry.amount))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> DoubleEndedIterator for Iter<'_, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| (&entry.element, entry.amount))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

/// Restartable forward cursor.
///
/// [`Cursor::first`] (re)positions the cursor on the lowest element;
/// `next` advances it. Calling `next` on a fresh cursor behaves like `first`.
/// Once exhausted the cursor stays exhausted until restarted.
pub struct Cursor<'a, E> {
    entries: &'a [Entry<E>],
    position: Option<usize>,
}

impl<'a, E> Cursor<'a, E> {
    pub(crate) fn new(entries: &'a [Entry<E>]) -> Self {
        Self {
            entries,
            position: None,
        }
    }

    /// Restart at the lowest element; `None` if the set is empty.
    pub fn first(&mut self) -> Option<&'a E> {
        self.position = Some(0);
        self.current()
    }

    /// Element under the cursor, if any.
    pub fn current(&self) -> Option<&'a E> {
        self.entry().map(|entry| &entry.element)
    }

    /// Amount bound to the element under the cursor, if any.
    pub fn amount(&self) -> Option<f64> {
        self.entry().map(|entry| entry.amount)
    }

    fn entry(&self) -> Option<&'a Entry<E>> {
        self.position.and_then(|index| self.entries.get(index))
    }
}

impl<'a, E> Iterator for Cursor<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        let next = match self.position {
            None => 0,
            Some(index) => (index + 1).min(self.entries.len()),
        };
        self.position = Some(next);
        self.current()
    }
}
