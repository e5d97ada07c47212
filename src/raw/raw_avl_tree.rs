use core::cmp::Ordering;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};
use crate::{AllocError, Comparator};

/// The AVL engine backing `AvlMultiset` and `AvlMultimap`.
///
/// The tree knows nothing about occurrence counts or value chains; it stores one
/// aggregate `A` per distinct key and leaves its meaning to the facade.
#[derive(Clone)]
pub(crate) struct RawAvlTree<K, A> {
    /// Arena storing all tree nodes.
    pub(super) nodes: Arena<Node<K, A>>,
    /// Handle to the root node, if the tree is non-empty.
    pub(super) root: Option<Handle>,
    /// Number of nodes (distinct keys) in the tree.
    pub(super) len: usize,
}

/// Result of an ordered descent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Search {
    /// A node with an equal key exists.
    Found(Handle),
    /// No equal key; a new node would hang off `parent` on `side`, or become the root.
    Vacant(Option<(Handle, Side)>),
}

impl<K, A> RawAvlTree<K, A> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` distinct keys.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Returns the number of distinct keys in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        self.nodes.try_reserve(additional)
    }

    /// Drops every node.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, A> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, A> {
        self.nodes.get_mut(handle)
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns the leftmost node of the subtree rooted at `handle`.
    pub(crate) fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.node(handle).left() {
            handle = left;
        }
        handle
    }

    /// Returns the rightmost node of the subtree rooted at `handle`.
    pub(crate) fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.node(handle).right() {
            handle = right;
        }
        handle
    }

    /// Returns the node holding the smallest key.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.leftmost(root))
    }

    /// Returns the node holding the largest key.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.rightmost(root))
    }

    /// Returns the in-order successor of `handle`.
    pub(crate) fn next(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.node(handle).right() {
            return Some(self.leftmost(right));
        }
        // Climb until we arrive from a left subtree.
        let mut child = handle;
        let mut parent = self.node(handle).parent();
        while let Some(p) = parent {
            if self.node(p).left() == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.node(p).parent();
        }
        None
    }

    /// Returns the in-order predecessor of `handle`.
    pub(crate) fn prev(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.node(handle).left() {
            return Some(self.rightmost(left));
        }
        let mut child = handle;
        let mut parent = self.node(handle).parent();
        while let Some(p) = parent {
            if self.node(p).right() == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.node(p).parent();
        }
        None
    }

    /// Re-points whichever link referred to `old` (a parent's child slot, or the root)
    /// at `new`, and gives `new` the parent of `old`.
    pub(super) fn replace_in_parent(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.node(old).parent();
        if let Some(new) = new {
            self.node_mut(new).set_parent(parent);
        }
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.node(parent).side_of(old);
                self.node_mut(parent).set_child(side, new);
            }
        }
    }

    /// Returns an iterator over the nodes in key order.
    pub(crate) fn iter(&self) -> Iter<'_, K, A> {
        Iter {
            tree: self,
            front: self.first(),
            back: self.last(),
            remaining: self.len,
        }
    }
}

impl<K, A> RawAvlTree<K, A> {
    /// Descends from the root looking for `key`.
    pub(crate) fn search<C>(&self, key: &K, comparator: &C) -> Search
    where
        C: Comparator<K> + ?Sized,
    {
        let Some(mut current) = self.root else {
            return Search::Vacant(None);
        };

        loop {
            let node = self.node(current);
            let side = match comparator.compare(key, node.key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Search::Found(current),
            };
            match node.child(side) {
                Some(child) => current = child,
                None => return Search::Vacant(Some((current, side))),
            }
        }
    }

    /// Returns the node holding `key`, if any.
    pub(crate) fn find<C>(&self, key: &K, comparator: &C) -> Option<Handle>
    where
        C: Comparator<K> + ?Sized,
    {
        match self.search(key, comparator) {
            Search::Found(handle) => Some(handle),
            Search::Vacant(_) => None,
        }
    }

    /// Returns the aggregate stored under `key`, if any.
    pub(crate) fn get<C>(&self, key: &K, comparator: &C) -> Option<&A>
    where
        C: Comparator<K> + ?Sized,
    {
        self.find(key, comparator).map(|handle| self.node(handle).aggregate())
    }
}

/// A double-ended iterator over the nodes of a [`RawAvlTree`] in key order.
pub(crate) struct Iter<'a, K, A> {
    tree: &'a RawAvlTree<K, A>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<K, A> Clone for Iter<'_, K, A> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, A> Iterator for Iter<'a, K, A> {
    type Item = (&'a K, &'a A);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = self.tree.next(handle);
        let node = self.tree.node(handle);
        Some((node.key(), node.aggregate()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, A> DoubleEndedIterator for Iter<'_, K, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = self.tree.prev(handle);
        let node = self.tree.node(handle);
        Some((node.key(), node.aggregate()))
    }
}

impl<K, A> ExactSizeIterator for Iter<'_, K, A> {}
