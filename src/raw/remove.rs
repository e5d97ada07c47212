use super::handle::Handle;
use super::node::Side;
use super::raw_avl_tree::RawAvlTree;

impl<K, A> RawAvlTree<K, A> {
    /// Unlinks the node at `handle`, rebalances, and returns its key and aggregate.
    pub(crate) fn remove_node(&mut self, handle: Handle) -> (K, A) {
        let node = self.node(handle);
        match (node.left(), node.right()) {
            (None, None) => self.remove_leaf(handle),
            (Some(child), None) | (None, Some(child)) => self.remove_with_one_child(handle, child),
            (Some(left), Some(right)) => self.remove_with_two_children(handle, left, right),
        }
        self.len -= 1;
        self.nodes.take(handle).into_parts()
    }

    fn remove_leaf(&mut self, handle: Handle) {
        tracing::trace!("removing leaf {handle:?}");
        let Some(parent) = self.node(handle).parent() else {
            self.root = None;
            return;
        };
        let side = self.node(parent).side_of(handle);
        self.node_mut(parent).set_child(side, None);
        self.delete_balance(parent, side);
    }

    fn remove_with_one_child(&mut self, handle: Handle, child: Handle) {
        tracing::trace!("removing {handle:?}, splicing in {child:?}");
        self.replace_in_parent(handle, Some(child));
        if let Some(parent) = self.node(child).parent() {
            let side = self.node(parent).side_of(child);
            self.delete_balance(parent, side);
        }
    }

    /// Replaces the node with its in-order successor. The height shrinks where the
    /// successor was taken from, so that is where rebalancing starts.
    fn remove_with_two_children(&mut self, handle: Handle, left: Handle, right: Handle) {
        let (successor, shrunk, side) = match self.node(right).left() {
            // The right child is the successor; it keeps its own right subtree.
            None => (right, right, Side::Right),
            Some(right_left) => {
                let successor = self.leftmost(right_left);
                let successor_parent = self.node(successor).parent().expect("successor has a parent");
                let successor_right = self.node(successor).right();

                self.node_mut(successor_parent).set_left(successor_right);
                if let Some(successor_right) = successor_right {
                    self.node_mut(successor_right).set_parent(Some(successor_parent));
                }
                self.node_mut(successor).set_right(Some(right));
                self.node_mut(right).set_parent(Some(successor));
                (successor, successor_parent, Side::Left)
            }
        };
        tracing::trace!("removing {handle:?}, promoting successor {successor:?}");

        let balance = self.node(handle).balance();
        let successor_node = self.node_mut(successor);
        successor_node.set_balance(balance);
        successor_node.set_left(Some(left));
        self.node_mut(left).set_parent(Some(successor));
        self.replace_in_parent(handle, Some(successor));

        self.delete_balance(shrunk, side);
    }

    /// Walks up from `current`, whose subtree on `side` just lost one level.
    ///
    /// Unlike insertion, a node that becomes balanced has shrunk as a whole, so the walk
    /// continues; it stops once a node is left leaning (its height is unchanged). Repairs
    /// may happen at every level.
    fn delete_balance(&mut self, mut current: Handle, mut side: Side) {
        loop {
            let node = self.node_mut(current);
            node.shrink(side);
            let subtree = match node.balance() {
                -1 | 1 => return,
                0 => current,
                _ => {
                    let subtree = self.repair(current);
                    if self.node(subtree).balance() != 0 {
                        return;
                    }
                    subtree
                }
            };

            let Some(parent) = self.node(subtree).parent() else {
                return;
            };
            side = self.node(parent).side_of(subtree);
            current = parent;
        }
    }
}
