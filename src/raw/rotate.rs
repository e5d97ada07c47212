//! Rotation primitives and the repair dispatch shared by insertion and deletion.

use super::handle::Handle;
use super::raw_avl_tree::RawAvlTree;

impl<K, A> RawAvlTree<K, A> {
    /// Promotes `child`, the right child of `parent`, into `parent`'s position.
    fn rotate_left(&mut self, parent: Handle, child: Handle) {
        self.replace_in_parent(parent, Some(child));
        let grand_child = self.node(child).left();
        if let Some(grand_child) = grand_child {
            self.node_mut(grand_child).set_parent(Some(parent));
        }
        let parent_node = self.node_mut(parent);
        parent_node.set_parent(Some(child));
        parent_node.set_right(grand_child);
        self.node_mut(child).set_left(Some(parent));
    }

    /// Promotes `child`, the left child of `parent`, into `parent`'s position.
    fn rotate_right(&mut self, parent: Handle, child: Handle) {
        self.replace_in_parent(parent, Some(child));
        let grand_child = self.node(child).right();
        if let Some(grand_child) = grand_child {
            self.node_mut(grand_child).set_parent(Some(parent));
        }
        let parent_node = self.node_mut(parent);
        parent_node.set_parent(Some(child));
        parent_node.set_left(grand_child);
        self.node_mut(child).set_right(Some(parent));
    }

    fn repair_left(&mut self, parent: Handle, child: Handle) -> Handle {
        tracing::trace!("rotating {child:?} left over {parent:?}");
        self.rotate_left(parent, child);
        // A balanced child only happens on deletion; the subtree keeps its height.
        let (parent_balance, child_balance) = if self.node(child).balance() == 0 { (1, -1) } else { (0, 0) };
        self.node_mut(parent).set_balance(parent_balance);
        self.node_mut(child).set_balance(child_balance);
        child
    }

    fn repair_right(&mut self, parent: Handle, child: Handle) -> Handle {
        tracing::trace!("rotating {child:?} right over {parent:?}");
        self.rotate_right(parent, child);
        let (parent_balance, child_balance) = if self.node(child).balance() == 0 { (-1, 1) } else { (0, 0) };
        self.node_mut(parent).set_balance(parent_balance);
        self.node_mut(child).set_balance(child_balance);
        child
    }

    fn repair_left_right(&mut self, parent: Handle, child: Handle, grand_child: Handle) -> Handle {
        tracing::trace!("double rotating {grand_child:?} left-right over {parent:?}");
        self.rotate_left(child, grand_child);
        self.rotate_right(parent, grand_child);
        let (parent_balance, child_balance) = match self.node(grand_child).balance() {
            1 => (0, -1),
            0 => (0, 0),
            _ => (1, 0),
        };
        self.node_mut(parent).set_balance(parent_balance);
        self.node_mut(child).set_balance(child_balance);
        self.node_mut(grand_child).set_balance(0);
        grand_child
    }

    fn repair_right_left(&mut self, parent: Handle, child: Handle, grand_child: Handle) -> Handle {
        tracing::trace!("double rotating {grand_child:?} right-left over {parent:?}");
        self.rotate_right(child, grand_child);
        self.rotate_left(parent, grand_child);
        let (parent_balance, child_balance) = match self.node(grand_child).balance() {
            1 => (-1, 0),
            0 => (0, 0),
            _ => (0, 1),
        };
        self.node_mut(parent).set_balance(parent_balance);
        self.node_mut(child).set_balance(child_balance);
        self.node_mut(grand_child).set_balance(0);
        grand_child
    }

    /// Restores the AVL property at `parent`, whose balance is +2 or -2, and returns the
    /// root of the repaired subtree.
    ///
    /// A child leaning against the imbalance needs a double rotation; otherwise a single
    /// rotation towards the lighter side suffices.
    pub(super) fn repair(&mut self, parent: Handle) -> Handle {
        let parent_node = self.node(parent);
        if parent_node.balance() > 0 {
            let child = parent_node.right().expect("right-heavy node has a right child");
            let child_node = self.node(child);
            if child_node.balance() < 0 {
                let grand_child = child_node.left().expect("left-heavy node has a left child");
                return self.repair_right_left(parent, child, grand_child);
            }
            return self.repair_left(parent, child);
        }

        let child = parent_node.left().expect("left-heavy node has a left child");
        let child_node = self.node(child);
        if child_node.balance() > 0 {
            let grand_child = child_node.right().expect("right-heavy node has a right child");
            return self.repair_left_right(parent, child, grand_child);
        }
        self.repair_right(parent, child)
    }
}
