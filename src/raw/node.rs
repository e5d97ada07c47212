use super::handle::Handle;

/// Which child slot of a node a link occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// An AVL tree node.
///
/// `A` is the per-key aggregate layered on top of the tree: an occurrence count for
/// the multiset, the value chain for the multimap.
#[derive(Clone)]
pub(crate) struct Node<K, A> {
    key: K,
    aggregate: A,
    // Back-reference for walking up during rebalancing. Never owns anything.
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
    // height(right) - height(left). Only leaves {-1, 0, 1} while a repair is in progress.
    balance: i8,
}

impl<K, A> Node<K, A> {
    /// Creates a balanced leaf hanging off `parent`.
    pub(crate) fn new(key: K, aggregate: A, parent: Option<Handle>) -> Self {
        Self {
            key,
            aggregate,
            parent,
            left: None,
            right: None,
            balance: 0,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn aggregate(&self) -> &A {
        &self.aggregate
    }

    #[inline]
    pub(crate) fn aggregate_mut(&mut self) -> &mut A {
        &mut self.aggregate
    }

    pub(crate) fn into_parts(self) -> (K, A) {
        (self.key, self.aggregate)
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Returns the side on which `child` hangs. Anything that is not the left child is
    /// taken to be the right one.
    #[inline]
    pub(crate) fn side_of(&self, child: Handle) -> Side {
        if self.left == Some(child) { Side::Left } else { Side::Right }
    }

    #[inline]
    pub(crate) fn balance(&self) -> i8 {
        self.balance
    }

    pub(crate) fn set_balance(&mut self, balance: i8) {
        self.balance = balance;
    }

    /// Records that the subtree on `side` grew by one level.
    pub(crate) fn grow(&mut self, side: Side) {
        match side {
            Side::Left => self.balance -= 1,
            Side::Right => self.balance += 1,
        }
    }

    /// Records that the subtree on `side` shrank by one level.
    pub(crate) fn shrink(&mut self, side: Side) {
        match side {
            Side::Left => self.balance += 1,
            Side::Right => self.balance -= 1,
        }
    }
}
