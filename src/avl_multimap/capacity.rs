use super::AvlMultimap;
use crate::raw::RawAvlTree;
use crate::{AllocError, Natural};

impl<K: Ord, V> AvlMultimap<K, V> {
    /// Creates an empty multimap with room for at least `capacity` distinct keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultimap;
    ///
    /// let map: AvlMultimap<u32, &str> = AvlMultimap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlMultimap {
            tree: RawAvlTree::with_capacity(capacity),
            len: 0,
            key_comparator: Natural,
            value_comparator: Natural,
        }
    }
}

impl<K, V, C, D> AvlMultimap<K, V, C, D> {
    /// Returns the number of distinct keys the multimap can hold without reallocating
    /// its node storage.
    ///
    /// The first value of every key is stored inline in its node; only further values
    /// under the same key need storage of their own.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }

    /// Reserves node storage for at least `additional` more distinct keys.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the storage could not be obtained. The multimap is
    /// unchanged either way.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        self.tree.try_reserve(additional)
    }
}
