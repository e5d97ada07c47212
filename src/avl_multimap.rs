use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::slice;

use smallvec::SmallVec;

use crate::raw::{self, RawAvlTree, Search, try_reserve_chain};
use crate::{AllocError, Comparator, Natural};

mod capacity;

/// Values stored under one key, in insertion order. Never empty while linked in a tree.
type Chain<V> = SmallVec<[V; 1]>;

/// An ordered multimap based on an AVL tree.
///
/// Each distinct key is stored once, together with the chain of values inserted under
/// it. Values keep their insertion order and are not deduplicated: inserting the same
/// pair twice stores it twice. [`len`](AvlMultimap::len) counts values across all keys.
///
/// Keys are ordered by `C`. `D` is only used to find the value to drop in
/// [`remove`](AvlMultimap::remove). Both default to [`Natural`].
///
/// # Examples
///
/// ```
/// use avl_multi::AvlMultimap;
///
/// let mut authors = AvlMultimap::new();
/// authors.insert("Le Guin", "The Dispossessed");
/// authors.insert("Banks", "Excession");
/// authors.insert("Le Guin", "The Lathe of Heaven");
///
/// assert_eq!(authors.len(), 3);
/// assert_eq!(authors.count(&"Le Guin"), 2);
///
/// // Values come back in insertion order.
/// let books: Vec<_> = authors.get(&"Le Guin").collect();
/// assert_eq!(books, [&"The Dispossessed", &"The Lathe of Heaven"]);
///
/// authors.remove(&"Le Guin", &"The Dispossessed");
/// assert_eq!(authors.count(&"Le Guin"), 1);
///
/// authors.remove_all(&"Banks");
/// assert!(!authors.contains_key(&"Banks"));
/// ```
pub struct AvlMultimap<K, V, C = Natural, D = Natural> {
    tree: RawAvlTree<K, Chain<V>>,
    len: usize,
    key_comparator: C,
    value_comparator: D,
}

/// An iterator over the values stored under one key of an `AvlMultimap`.
///
/// This `struct` is created by the [`get`] method on [`AvlMultimap`]. It borrows the
/// map, so the map cannot change while the iterator is alive.
///
/// [`get`]: AvlMultimap::get
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, V> {
    inner: slice::Iter<'a, V>,
}

/// An iterator over the entries of an `AvlMultimap`, in key order and then insertion
/// order.
///
/// This `struct` is created by the [`iter`] method on [`AvlMultimap`].
///
/// [`iter`]: AvlMultimap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    nodes: raw::Iter<'a, K, Chain<V>>,
    front: Option<(&'a K, slice::Iter<'a, V>)>,
    back: Option<(&'a K, slice::Iter<'a, V>)>,
    remaining: usize,
}

/// An iterator over the distinct keys of an `AvlMultimap`.
///
/// This `struct` is created by the [`keys`] method on [`AvlMultimap`].
///
/// [`keys`]: AvlMultimap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    nodes: raw::Iter<'a, K, Chain<V>>,
}

impl<K: Ord, V> AvlMultimap<K, V> {
    /// Makes a new, empty `AvlMultimap` with keys ordered by [`Ord`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultimap;
    ///
    /// let mut map = AvlMultimap::new();
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparators(Natural, Natural)
    }
}

impl<K, V, C, D> AvlMultimap<K, V, C, D> {
    /// Makes a new, empty `AvlMultimap` ordering keys with `key_comparator` and matching
    /// values for removal with `value_comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::{AvlMultimap, Natural};
    ///
    /// // Largest key first.
    /// let mut map = AvlMultimap::with_comparators(|a: &u8, b: &u8| b.cmp(a), Natural);
    /// map.insert(1, 'x');
    /// map.insert(9, 'y');
    /// assert_eq!(map.first_key_value(), Some((&9, &'y')));
    /// ```
    #[must_use]
    pub const fn with_comparators(key_comparator: C, value_comparator: D) -> Self {
        Self {
            tree: RawAvlTree::new(),
            len: 0,
            key_comparator,
            value_comparator,
        }
    }

    pub fn key_comparator(&self) -> &C {
        &self.key_comparator
    }

    pub fn value_comparator(&self) -> &D {
        &self.value_comparator
    }

    /// Returns the number of values in the multimap, across all keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultimap;
    ///
    /// let map = AvlMultimap::from([(1, 'a'), (1, 'b'), (2, 'c')]);
    /// assert_eq!(map.len(), 3);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the multimap contains no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of distinct keys in the multimap.
    #[must_use]
    pub const fn distinct_len(&self) -> usize {
        self.tree.len()
    }

    /// Clears the multimap, removing all keys and values.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }

    /// Returns the smallest key with the first value inserted under it.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultimap;
    ///
    /// let map = AvlMultimap::from([(2, 'c'), (1, 'a'), (1, 'b')]);
    /// assert_eq!(map.first_key_value(), Some((&1, &'a')));
    /// assert_eq!(map.last_key_value(), Some((&2, &'c')));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.iter().next().and_then(|(key, chain)| chain.first().map(|value| (key, value)))
    }

    /// Returns the largest key with the first value inserted under it.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.iter().next_back().and_then(|(key, chain)| chain.first().map(|value| (key, value)))
    }

    /// Gets an iterator over every `(key, value)` pair, sorted by key, values of one key
    /// in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultimap;
    ///
    /// let map = AvlMultimap::from([(2, 'c'), (1, 'a'), (2, 'b')]);
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(entries, [(&1, &'a'), (&2, &'c'), (&2, &'b')]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: self.tree.iter(),
            front: None,
            back: None,
            remaining: self.len,
        }
    }

    /// Gets an iterator over the distinct keys, in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { nodes: self.tree.iter() }
    }
}

impl<K, V, C: Comparator<K>, D> AvlMultimap<K, V, C, D> {
    /// Appends `value` to the values of `key`, reporting allocation failure instead of
    /// panicking.
    ///
    /// If an equal key is already present, `key` is dropped and the value joins the end
    /// of that key's chain.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if storage for the value or for a new node could not be
    /// obtained. The multimap is left exactly as it was and `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultimap;
    ///
    /// let mut map = AvlMultimap::new();
    /// map.try_insert(5, 17)?;
    /// map.try_insert(5, 97)?;
    /// assert_eq!(map.count(&5), 2);
    /// # Ok::<(), avl_multi::AllocError>(())
    /// ```
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), AllocError> {
        match self.tree.search(&key, &self.key_comparator) {
            Search::Found(handle) => {
                let chain = self.tree.node_mut(handle).aggregate_mut();
                try_reserve_chain(chain, 1)?;
                chain.push(value);
            }
            Search::Vacant(slot) => {
                let mut chain = Chain::new();
                try_reserve_chain(&mut chain, 1)?;
                chain.push(value);
                self.tree.try_insert_vacant(slot, key, chain)?;
            }
        }
        self.len += 1;
        Ok(())
    }

    /// Appends `value` to the values of `key`.
    ///
    /// # Panics
    ///
    /// Panics if storage could not be obtained. Use
    /// [`try_insert`](AvlMultimap::try_insert) to handle that case.
    pub fn insert(&mut self, key: K, value: V) {
        if let Err(error) = self.try_insert(key, value) {
            panic!("`AvlMultimap::insert()` - {error}");
        }
    }

    /// Returns the number of values stored under `key` (zero if absent).
    #[must_use]
    pub fn count(&self, key: &K) -> usize {
        self.tree.get(key, &self.key_comparator).map_or(0, SmallVec::len)
    }

    /// Returns `true` if at least one value is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.find(key, &self.key_comparator).is_some()
    }

    /// Returns an iterator over the values of `key` in insertion order. The iterator is
    /// empty if the key is absent.
    ///
    /// Calling `get` again starts over from the first value.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultimap;
    ///
    /// let mut map = AvlMultimap::new();
    /// map.insert(5, 17);
    /// map.insert(5, 97);
    ///
    /// let mut values = map.get(&5);
    /// assert_eq!(values.next(), Some(&17));
    /// assert_eq!(values.next(), Some(&97));
    /// assert_eq!(values.next(), None);
    ///
    /// assert_eq!(map.get(&6).next(), None);
    /// ```
    pub fn get(&self, key: &K) -> Values<'_, V> {
        let values: &[V] = match self.tree.get(key, &self.key_comparator) {
            Some(chain) => chain,
            None => &[],
        };
        Values { inner: values.iter() }
    }

    /// Removes `key` and all of its values. Returns whether the key was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultimap;
    ///
    /// let mut map = AvlMultimap::from([(1, 'a'), (1, 'b'), (2, 'c')]);
    /// assert!(map.remove_all(&1));
    /// assert_eq!(map.len(), 1);
    /// assert!(!map.remove_all(&1));
    /// ```
    pub fn remove_all(&mut self, key: &K) -> bool {
        let Some(handle) = self.tree.find(key, &self.key_comparator) else {
            return false;
        };
        let (_, chain) = self.tree.remove_node(handle);
        self.len -= chain.len();
        true
    }
}

impl<K, V, C: Comparator<K>, D: Comparator<V>> AvlMultimap<K, V, C, D> {
    /// Removes one value equal to `value` from the values of `key`. Returns whether a
    /// value was removed.
    ///
    /// Among several equal values it is unspecified which one goes. The key itself is
    /// removed along with its last value.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_multi::AvlMultimap;
    ///
    /// let mut map = AvlMultimap::from([(5, 17), (5, 97)]);
    /// assert!(map.remove(&5, &17));
    /// assert!(!map.remove(&5, &17));
    /// assert_eq!(map.get(&5).collect::<Vec<_>>(), [&97]);
    /// ```
    pub fn remove(&mut self, key: &K, value: &V) -> bool {
        let Some(handle) = self.tree.find(key, &self.key_comparator) else {
            return false;
        };
        let chain = self.tree.node_mut(handle).aggregate_mut();
        let Some(index) = chain
            .iter()
            .position(|candidate| self.value_comparator.compare(candidate, value) == Ordering::Equal)
        else {
            return false;
        };
        chain.remove(index);
        if chain.is_empty() {
            self.tree.remove_node(handle);
        }
        self.len -= 1;
        true
    }
}

impl<K: Clone, V: Clone, C: Clone, D: Clone> Clone for AvlMultimap<K, V, C, D> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            len: self.len,
            key_comparator: self.key_comparator.clone(),
            value_comparator: self.value_comparator.clone(),
        }
    }
}

impl<K: PartialEq, V: PartialEq, C, D> PartialEq for AvlMultimap<K, V, C, D> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C, D> Eq for AvlMultimap<K, V, C, D> {}

impl<K: fmt::Debug, V: fmt::Debug, C, D> fmt::Debug for AvlMultimap<K, V, C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.tree.iter().map(|(key, chain)| (key, chain.as_slice())))
            .finish()
    }
}

impl<K, V, C: Default, D: Default> Default for AvlMultimap<K, V, C, D> {
    /// Creates an empty `AvlMultimap`.
    fn default() -> Self {
        Self::with_comparators(C::default(), D::default())
    }
}

impl<K, V, C: Comparator<K> + Default, D: Default> FromIterator<(K, V)> for AvlMultimap<K, V, C, D> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Comparator<K>, D> Extend<(K, V)> for AvlMultimap<K, V, C, D> {
    #[inline]
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |(key, value)| {
            self.insert(key, value);
        });
    }
}

impl<'a, K: Copy + 'a, V: Copy + 'a, C: Comparator<K>, D> Extend<(&'a K, &'a V)> for AvlMultimap<K, V, C, D> {
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for AvlMultimap<K, V> {
    /// Converts a `[(K, V); N]` into an `AvlMultimap<K, V>`, keeping every pair.
    ///
    /// ```
    /// use avl_multi::AvlMultimap;
    ///
    /// let map = AvlMultimap::from([(1, 2), (1, 2)]);
    /// assert_eq!(map.count(&1), 2);
    /// ```
    fn from(arr: [(K, V); N]) -> Self {
        Self::from_iter(arr)
    }
}

impl<'a, K, V, C, D> IntoIterator for &'a AvlMultimap<K, V, C, D> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Values<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

impl<V> FusedIterator for Values<'_, V> {}

impl<V> Clone for Values<'_, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Values<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, values)) = &mut self.front {
                if let Some(value) = values.next() {
                    self.remaining -= 1;
                    return Some((*key, value));
                }
            }
            match self.nodes.next() {
                Some((key, chain)) => self.front = Some((key, chain.iter())),
                None => {
                    // The back cursor may still hold part of the last chain.
                    let (key, values) = self.back.as_mut()?;
                    let value = values.next()?;
                    self.remaining -= 1;
                    return Some((*key, value));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, values)) = &mut self.back {
                if let Some(value) = values.next_back() {
                    self.remaining -= 1;
                    return Some((*key, value));
                }
            }
            match self.nodes.next_back() {
                Some((key, chain)) => self.back = Some((key, chain.iter())),
                None => {
                    let (key, values) = self.front.as_mut()?;
                    let value = values.next_back()?;
                    self.remaining -= 1;
                    return Some((*key, value));
                }
            }
        }
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes.clone(),
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.nodes.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.nodes.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            nodes: self.nodes.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
