use alloc::vec::Vec;

use super::handle::Handle;
use super::reserve::try_reserve;
use crate::AllocError;

/// Slot storage addressed by [`Handle`].
///
/// Freed slots are recycled through `free`. The free list always has capacity for
/// every slot, so [`Arena::take`] never allocates and removal cannot fail.
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[cfg(test)]
    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    /// Makes room for `additional` more live elements without reallocating.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        let needed = additional.saturating_sub(self.free.len());
        if needed == 0 {
            return Ok(());
        }
        if self.slots.len().saturating_add(needed) > Handle::MAX + 1 {
            return Err(AllocError::CapacityOverflow);
        }
        try_reserve(&mut self.slots, needed)?;
        let total = self.slots.len() + needed;
        let additional = total - self.free.len();
        try_reserve(&mut self.free, additional)
    }

    /// Stores `element` and returns its handle.
    ///
    /// Either the element is stored, or the arena is left untouched and `element` is dropped.
    pub(crate) fn try_alloc(&mut self, element: T) -> Result<Handle, AllocError> {
        if let Some(handle) = self.free.pop() {
            // Reuse a free slot/handle.
            self.slots[handle.to_index()] = Some(element);
            return Ok(handle);
        }

        let handle = Handle::try_from_index(self.slots.len()).ok_or(AllocError::CapacityOverflow)?;
        try_reserve(&mut self.slots, 1)?;
        // Keep the free list able to hold every slot, including the new one.
        try_reserve(&mut self.free, self.slots.len() + 1)?;
        self.slots.push(Some(element));
        Ok(handle)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        // Free-list capacity covers every slot: `with_capacity`, `try_reserve`, `try_alloc`
        // and `Clone` each size it before a slot can exist.
        debug_assert!(self.free.len() < self.free.capacity());
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<T: Clone> Clone for Arena<T> {
    fn clone(&self) -> Self {
        // A derived clone would shrink the free list to its length.
        let mut free = Vec::with_capacity(self.slots.len());
        free.extend_from_slice(&self.free);
        Self {
            slots: self.slots.clone(),
            free,
        }
    }
}
