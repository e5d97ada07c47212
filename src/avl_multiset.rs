use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{self, RawAvlTree, Search};
use crate::{AllocError, Comparator, Natural};

mod capacity;

/// An ordered multiset based on an AVL tree.
///
/// Each distinct key is stored once, together with the number of times it has been
/// inserted. [`len`](AvlMultiset::len) counts occurrences, not distinct keys.
///
/// Keys are ordered by the comparator `C`, [`Natural`] (the [`Ord`] ordering) unless one
/// is supplied with [`with_comparator`](AvlMultiset::with_comparator). It is a logic
/// error for a key to be modified in such a way that its ordering relative to any other
/// key changes while it is in the multiset.
///
/// # Examples
///
/// ```
/// use avl_multi::AvlMultiset;
///
/// let mut rolls = AvlMultiset::new();
/// for roll in [3, 6, 1, 6, 3, 6] {
///     rolls.insert(roll);
/// }
///
/// assert_eq!(rolls.len(), 6);
/// assert_eq!(rolls.count(&6), 3);
/// assert!(!rolls.contains(&2));
///
/// // Remove a single occurrence.
/// assert!(rolls.remove(&6));
/// assert_eq!(rolls.count(&6), 2);
///
/// // Remove every occurrence.
/// assert!(rolls.remove_all(&3));
/// assert_eq!(rolls.len(), 3);
///
/// // Iterate over distinct keys and their counts, in order.
/// let counts: Vec<_> = rolls.iter().collect();
/// assert_eq!(counts, [(&1, 1), (&6, 2)]);
/// ```
pub struct AvlMultiset<K, C = Natural> {
    tree: RawAvlTree<K, usize>,
    len: usize,
    comparator: C,
}

/// An iterator over the distinct keys of an `AvlMultiset` and their counts.
///
/// This `struct` is created by the [`iter`] method on [`AvlMultiset`].
///
/// [`iter`]: AvlMultiset::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K> {
    inner: raw::Iter<'a, K, usize>,
}

impl<K: Ord> AvlMultiset<K> {
    /// Makes a new, empty `AvlMultiset` ordered by [`Ord`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultiset;
    ///
    /// let mut set = AvlMultiset::new();
    /// set.insert(1);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, C> AvlMultiset<K, C> {
    /// Makes a new, empty `AvlMultiset` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultiset;
    ///
    /// // Case-insensitive keys.
    /// let mut set = AvlMultiset::with_comparator(|a: &&str, b: &&str| {
    ///     a.to_lowercase().cmp(&b.to_lowercase())
    /// });
    /// set.insert("Rust");
    /// set.insert("rust");
    /// assert_eq!(set.count(&"RUST"), 2);
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            tree: RawAvlTree::new(),
            len: 0,
            comparator,
        }
    }

    /// Returns the comparator ordering the keys.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of occurrences in the multiset, counting duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultiset;
    ///
    /// let mut set = AvlMultiset::new();
    /// assert_eq!(set.len(), 0);
    /// set.insert(1);
    /// set.insert(1);
    /// assert_eq!(set.len(), 2);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the multiset contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of distinct keys in the multiset.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultiset;
    ///
    /// let set = AvlMultiset::from([1, 1, 2]);
    /// assert_eq!(set.distinct_len(), 2);
    /// ```
    #[must_use]
    pub const fn distinct_len(&self) -> usize {
        self.tree.len()
    }

    /// Clears the multiset, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultiset;
    ///
    /// let mut set = AvlMultiset::from([1, 2, 2]);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }

    /// Returns the smallest key and its count.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultiset;
    ///
    /// let set = AvlMultiset::from([3, 1, 1]);
    /// assert_eq!(set.first(), Some((&1, 2)));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<(&K, usize)> {
        self.iter().next()
    }

    /// Returns the largest key and its count.
    #[must_use]
    pub fn last(&self) -> Option<(&K, usize)> {
        self.iter().next_back()
    }

    /// Gets an iterator over the distinct keys, in ascending order, each paired with its
    /// count.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultiset;
    ///
    /// let set = AvlMultiset::from([2, 1, 2]);
    /// let mut iter = set.iter();
    /// assert_eq!(iter.next(), Some((&1, 1)));
    /// assert_eq!(iter.next(), Some((&2, 2)));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter { inner: self.tree.iter() }
    }
}

impl<K, C: Comparator<K>> AvlMultiset<K, C> {
    /// Adds one occurrence of `key`, reporting allocation failure instead of panicking.
    ///
    /// If an equal key is already present its count goes up and `key` is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if storage for a new node could not be obtained. The
    /// multiset is left exactly as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultiset;
    ///
    /// let mut set = AvlMultiset::new();
    /// set.try_insert(5)?;
    /// set.try_insert(5)?;
    /// assert_eq!(set.count(&5), 2);
    /// # Ok::<(), avl_multi::AllocError>(())
    /// ```
    pub fn try_insert(&mut self, key: K) -> Result<(), AllocError> {
        match self.tree.search(&key, &self.comparator) {
            Search::Found(handle) => *self.tree.node_mut(handle).aggregate_mut() += 1,
            Search::Vacant(slot) => {
                self.tree.try_insert_vacant(slot, key, 1)?;
            }
        }
        self.len += 1;
        Ok(())
    }

    /// Adds one occurrence of `key`.
    ///
    /// # Panics
    ///
    /// Panics if storage for a new node could not be obtained. Use
    /// [`try_insert`](AvlMultiset::try_insert) to handle that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultiset;
    ///
    /// let mut set = AvlMultiset::new();
    /// set.insert(5);
    /// set.insert(5);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K) {
        if let Err(error) = self.try_insert(key) {
            panic!("`AvlMultiset::insert()` - {error}");
        }
    }

    /// Returns the number of occurrences of `key` (zero if absent).
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultiset;
    ///
    /// let set = AvlMultiset::from([5, 5, 5]);
    /// assert_eq!(set.count(&5), 3);
    /// assert_eq!(set.count(&6), 0);
    /// ```
    #[must_use]
    pub fn count(&self, key: &K) -> usize {
        self.tree.get(key, &self.comparator).copied().unwrap_or(0)
    }

    /// Returns `true` if the multiset contains at least one occurrence of `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.tree.find(key, &self.comparator).is_some()
    }

    /// Removes one occurrence of `key`. Returns whether the key was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultiset;
    ///
    /// let mut set = AvlMultiset::from([5, 5]);
    /// assert!(set.remove(&5));
    /// assert_eq!(set.count(&5), 1);
    /// assert!(set.remove(&5));
    /// assert!(!set.remove(&5));
    /// ```
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(handle) = self.tree.find(key, &self.comparator) else {
            return false;
        };
        let count = self.tree.node_mut(handle).aggregate_mut();
        *count -= 1;
        if *count == 0 {
            self.tree.remove_node(handle);
        }
        self.len -= 1;
        true
    }

    /// Removes every occurrence of `key`. Returns whether the key was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultiset;
    ///
    /// let mut set = AvlMultiset::from([5, 5, 7]);
    /// assert!(set.remove_all(&5));
    /// assert_eq!(set.len(), 1);
    /// assert!(!set.remove_all(&5));
    /// ```
    pub fn remove_all(&mut self, key: &K) -> bool {
        let Some(handle) = self.tree.find(key, &self.comparator) else {
            return false;
        };
        let (_, count) = self.tree.remove_node(handle);
        self.len -= count;
        true
    }
}

impl<K: Clone, C: Clone> Clone for AvlMultiset<K, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            len: self.len,
            comparator: self.comparator.clone(),
        }
    }
}

impl<K: PartialEq, C> PartialEq for AvlMultiset<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, C> Eq for AvlMultiset<K, C> {}

impl<K: fmt::Debug, C> fmt::Debug for AvlMultiset<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, C: Default> Default for AvlMultiset<K, C> {
    /// Creates an empty `AvlMultiset`.
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, C: Comparator<K> + Default> FromIterator<K> for AvlMultiset<K, C> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<K, C: Comparator<K>> Extend<K> for AvlMultiset<K, C> {
    #[inline]
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |key| {
            self.insert(key);
        });
    }
}

impl<'a, K: Copy + 'a, C: Comparator<K>> Extend<&'a K> for AvlMultiset<K, C> {
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for AvlMultiset<K> {
    /// Converts a `[K; N]` into an `AvlMultiset<K>`, keeping duplicates.
    ///
    /// ```
    /// use avl_multi::AvlMultiset;
    ///
    /// let set = AvlMultiset::from([1, 2, 2]);
    /// assert_eq!(set.count(&2), 2);
    /// ```
    fn from(arr: [K; N]) -> Self {
        Self::from_iter(arr)
    }
}

impl<'a, K, C> IntoIterator for &'a AvlMultiset<K, C> {
    type Item = (&'a K, usize);
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (&'a K, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, count)| (key, *count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, count)| (key, *count))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Iter<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
