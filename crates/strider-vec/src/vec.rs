//! The typed growable vector.

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use strider_core::{next_capacity, BufError, DEFAULT_CAPACITY, SHRINK_SLACK};

/// A growable vector of `T` with an explicit, observable capacity policy.
///
/// The logical capacity is tracked separately from the standard library
/// vector's own allocation bookkeeping, so [`GrowVec::capacity`] reports
/// exactly the policy the buffer promises: doubling on growth, `len + 1`
/// after [`GrowVec::shrink_to_fit`], growth only when a push or insert
/// finds the buffer full.
pub struct GrowVec<T> {
    items: Vec<T>,
    /// Logical capacity in elements. Always `>= items.len()`.
    capacity: usize,
}

impl<T> GrowVec<T> {
    /// Create a vector with the default initial capacity of
    /// [`DEFAULT_CAPACITY`](strider_core::DEFAULT_CAPACITY) elements.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a vector with room for `capacity` elements.
    ///
    /// A capacity of zero is legal; the first push simply grows first.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of elements the vector can hold before its next growth.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the vector holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Byte size of one element.
    pub fn stride(&self) -> usize {
        mem::size_of::<T>()
    }

    /// The elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// The elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Iterate over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Raise the logical capacity to the next policy step and make sure
    /// the backing vector can hold it.
    fn grow(&mut self) {
        self.capacity = next_capacity(self.capacity);
        self.items.reserve_exact(self.capacity - self.items.len());
    }

    /// Append an element, growing first if the vector is full.
    pub fn push(&mut self, value: T) {
        if self.items.len() == self.capacity {
            self.grow();
        }
        self.items.push(value);
    }

    /// Remove and return the last element.
    ///
    /// Never reallocates. Returns [`BufError::Empty`] on a zero-length
    /// vector.
    pub fn pop(&mut self) -> Result<T, BufError> {
        self.items.pop().ok_or(BufError::Empty)
    }

    /// Insert an element at `index`, displacing the element currently
    /// there and everything after it one position toward higher indices.
    ///
    /// Valid only for `index < len`: inserting at the tail is an
    /// out-of-range error — use [`GrowVec::push`] to extend the sequence.
    /// On an invalid index the vector is unchanged.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), BufError> {
        if index >= self.items.len() {
            return Err(BufError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        if self.items.len() == self.capacity {
            self.grow();
        }
        self.items.insert(index, value);
        Ok(())
    }

    /// Remove and return the element at `index`, closing the gap.
    ///
    /// Valid for `index < len`; the last occupied position is a legal
    /// target. On an invalid index the vector is unchanged. Never
    /// reallocates.
    pub fn remove(&mut self, index: usize) -> Result<T, BufError> {
        if index >= self.items.len() {
            return Err(BufError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Discard all elements without changing capacity.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Reduce the capacity to `len + 1`, keeping all elements.
    ///
    /// The one spare slot is deliberate: it keeps the next push from
    /// immediately growing again. Never triggered automatically.
    pub fn shrink_to_fit(&mut self) {
        self.capacity = self.items.len() + SHRINK_SLACK;
        self.items.shrink_to(self.capacity);
    }

    /// A reference to the element at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// A mutable reference to the element at `index`, or `None` past the
    /// end.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }
}

impl<T> Default for GrowVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for GrowVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for GrowVec<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for GrowVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for GrowVec<T> {}

impl<T> FromIterator<T> for GrowVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T> Extend<T> for GrowVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a GrowVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
