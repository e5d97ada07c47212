use super::AvlMultiset;
use crate::raw::RawAvlTree;
use crate::{AllocError, Natural};

impl<K: Ord> AvlMultiset<K> {
    /// Creates an empty multiset with room for at least `capacity` distinct keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultiset;
    ///
    /// let set: AvlMultiset<i32> = AvlMultiset::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlMultiset {
            tree: RawAvlTree::with_capacity(capacity),
            len: 0,
            comparator: Natural,
        }
    }
}

impl<K, C> AvlMultiset<K, C> {
    /// Returns the number of distinct keys the multiset can hold without reallocating.
    ///
    /// Repeated keys share a node, so any number of extra occurrences of a present key
    /// fit without allocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }

    /// Reserves room for at least `additional` more distinct keys.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the storage could not be obtained. The multiset is
    /// unchanged either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultiset;
    ///
    /// let mut set = AvlMultiset::from([1]);
    /// set.try_reserve(10)?;
    /// assert!(set.capacity() >= 11);
    /// # Ok::<(), avl_multi::AllocError>(())
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        self.tree.try_reserve(additional)
    }
}
