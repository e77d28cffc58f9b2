//! Vector: contiguous growable buffer with an explicit capacity policy.
//!
//! # Invariants
//! - `len() <= capacity()` at all times.
//! - The backing allocation holds at least `capacity()` elements.
//!
//! # Capacity policy
//! - Append and insert double the capacity when the buffer is full
//!   (a zero capacity grows to [`DEFAULT_CAPACITY`]).
//! - Delete halves the capacity once `len() <= capacity() / 4`. A single
//!   delete right after a growing append can shrink again for small sizes.
//!
//! Reads past the end return `None`; mutations past the end return
//! [`Error::OutOfBounds`]. Nothing here panics on a bad index.

use crate::error::{Error, Result};
use core::fmt;

/// Capacity of a vector created with [`Vector::new`].
pub const DEFAULT_CAPACITY: usize = 4;

pub struct Vector<T> {
    buf: Vec<T>,
    // Logical capacity; the allocation may be larger.
    capacity: usize,
}

impl<T> Vector<T> {
    /// Creates an empty vector with [`DEFAULT_CAPACITY`] slots reserved.
    ///
    /// # Errors
    /// Returns [`Error::Alloc`] when the reservation fails.
    pub fn new() -> Result<Self> {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// # Errors
    /// Returns [`Error::Alloc`] when the reservation fails.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)?;
        Ok(Self { buf, capacity })
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes occupied by the live elements.
    pub fn size_in_bytes(&self) -> usize {
        self.buf.len() * core::mem::size_of::<T>()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buf
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.buf.iter()
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.buf.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.buf.get_mut(idx)
    }

    /// Sets the capacity to exactly `new_capacity`, dropping any elements
    /// that no longer fit.
    ///
    /// # Errors
    /// Returns [`Error::Alloc`] when growing fails; the vector is unchanged.
    pub fn resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity > self.buf.capacity() {
            let additional = new_capacity - self.buf.len();
            self.buf.try_reserve_exact(additional)?;
        } else {
            self.buf.truncate(new_capacity);
            self.buf.shrink_to(new_capacity);
        }
        log::trace!(
            "vector resized: capacity {} -> {new_capacity}, len {}",
            self.capacity,
            self.buf.len()
        );
        self.capacity = new_capacity;
        Ok(())
    }

    fn grow_if_full(&mut self) -> Result<()> {
        if self.buf.len() < self.capacity {
            return Ok(());
        }
        let new_capacity = match self.capacity {
            0 => DEFAULT_CAPACITY,
            n => n.checked_mul(2).unwrap_or(usize::MAX),
        };
        self.resize(new_capacity)
    }

    fn shrink_if_sparse(&mut self) {
        if self.buf.len() <= self.capacity / 4 {
            // Shrinking never allocates, so it cannot fail.
            let _ = self.resize(self.capacity / 2);
        }
    }

    fn check_index(&self, idx: usize) -> Result<()> {
        if idx < self.buf.len() {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                index: idx,
                len: self.buf.len(),
            })
        }
    }

    /// Overwrites the element at `idx`, returning the previous one.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] when `idx >= len()`.
    pub fn assign(&mut self, idx: usize, element: T) -> Result<T> {
        self.check_index(idx)?;
        Ok(core::mem::replace(&mut self.buf[idx], element))
    }

    /// Appends to the end, doubling the capacity when full.
    ///
    /// # Errors
    /// Returns [`Error::Alloc`] when growth fails; `element` is dropped.
    pub fn append(&mut self, element: T) -> Result<()> {
        self.grow_if_full()?;
        self.buf.push(element);
        Ok(())
    }

    /// Inserts at `idx`, shifting the tail right. `idx == len()` appends.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] when `idx > len()`, or
    /// [`Error::Alloc`] when growth fails.
    pub fn insert(&mut self, idx: usize, element: T) -> Result<()> {
        if idx > self.buf.len() {
            return Err(Error::OutOfBounds {
                index: idx,
                len: self.buf.len(),
            });
        }
        self.grow_if_full()?;
        self.buf.insert(idx, element);
        Ok(())
    }

    /// Removes the element at `idx`, shifting the tail left, then applies
    /// the shrink policy.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] when `idx >= len()`.
    pub fn delete(&mut self, idx: usize) -> Result<T> {
        self.check_index(idx)?;
        let removed = self.buf.remove(idx);
        self.shrink_if_sparse();
        Ok(removed)
    }

    /// Removes the element at `idx` in O(1) by moving the last element
    /// into its slot. The shrink policy still applies.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] when `idx >= len()`.
    pub fn swap_delete(&mut self, idx: usize) -> Result<T> {
        self.check_index(idx)?;
        let last = self.buf.len() - 1;
        self.buf.swap(idx, last);
        self.delete(last)
    }

    /// Drops every element and releases the buffer.
    pub fn clear(&mut self) {
        self.buf = Vec::new();
        self.capacity = 0;
    }

    /// Reduces the capacity to `len()`.
    pub fn shrink_to_fit(&mut self) {
        let _ = self.resize(self.buf.len());
    }

    pub fn find(&self, element: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.buf.iter().position(|e| e == element)
    }

    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.find(element).is_some()
    }

    /// Deep copy with capacity `2 * len()`.
    ///
    /// # Errors
    /// Returns [`Error::Alloc`] when the reservation fails.
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
    {
        let mut out = Self::with_capacity(self.buf.len().saturating_mul(2))?;
        out.buf.extend_from_slice(&self.buf);
        Ok(out)
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.buf.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
