//! Fixed-capacity circular buffer.
//!
//! Slots are stored in a `Vec<Option<T>>` sized once at construction. `head`
//! indexes the oldest element and `len` counts occupied slots, so the tail is
//! always `(head + len) % capacity`.

use crate::error::{RingError, RingResult};

/// Fixed-capacity FIFO ring.
///
/// # Example
///
/// ```rust
/// use postbox_ring::RingBuffer;
///
/// let mut ring = RingBuffer::try_with_capacity(3)?;
/// for n in 1..=3 {
///     assert!(ring.insert(n).is_ok());
/// }
///
/// let drained: Vec<_> = ring.drain().collect();
/// assert_eq!(drained, vec![1, 2, 3]);
/// # Ok::<(), postbox_ring::RingError>(())
/// ```
#[derive(Debug)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Create a ring able to hold `capacity` elements.
    ///
    /// This is the only allocating operation of the ring.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::ZeroCapacity`] if `capacity` is 0, and
    /// [`RingError::AllocationFailed`] if the storage cannot be reserved.
    pub fn try_with_capacity(capacity: usize) -> RingResult<Self> {
        if capacity == 0 {
            return Err(RingError::ZeroCapacity);
        }

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_reserve| RingError::allocation_failed(capacity))?;
        slots.resize_with(capacity, || None);

        Ok(Self {
            slots,
            head: 0,
            len: 0,
        })
    }

    /// Maximum number of elements the ring can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of elements currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no element is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if every slot is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Append `item` at the tail.
    ///
    /// # Errors
    ///
    /// Returns the item unchanged if the ring is full.
    pub fn insert(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }

        let tail = self.wrap(self.head + self.len);
        match self.slots.get_mut(tail) {
            Some(slot) => {
                *slot = Some(item);
                self.len += 1;
                Ok(())
            }
            None => Err(item),
        }
    }

    /// Peek at the oldest element without removing it.
    #[must_use]
    pub fn head(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots.get(self.head).and_then(Option::as_ref)
    }

    /// Remove and return the oldest element.
    pub fn remove(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let item = self.slots.get_mut(self.head)?.take()?;
        self.head = self.wrap(self.head + 1);
        self.len -= 1;
        Some(item)
    }

    /// Iterate over the stored elements from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |offset| {
            self.slots
                .get(self.wrap(self.head + offset))
                .and_then(Option::as_ref)
        })
    }

    /// Remove every element, yielding them from oldest to newest.
    ///
    /// Elements not consumed by the caller are removed when the iterator is dropped.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { ring: self }
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.drain().for_each(drop);
    }

    // `index` is always below `2 * capacity`, so a single subtraction suffices.
    fn wrap(&self, index: usize) -> usize {
        let capacity = self.slots.len();
        if index >= capacity {
            index - capacity
        } else {
            index
        }
    }
}

/// Draining iterator returned by [`RingBuffer::drain`].
#[derive(Debug)]
pub struct Drain<'a, T> {
    ring: &'a mut RingBuffer<T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.ring.remove()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ring.len, Some(self.ring.len))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        while self.ring.remove().is_some() {}
    }
}
