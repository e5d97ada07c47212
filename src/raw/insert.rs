use super::handle::Handle;
use super::node::{Node, Side};
use super::raw_avl_tree::RawAvlTree;
use crate::AllocError;

impl<K, A> RawAvlTree<K, A> {
    /// Links a new node for `key` into the slot found by [`RawAvlTree::search`] and
    /// rebalances. Returns the handle of the new node.
    ///
    /// `slot` must come from a search that returned `Search::Vacant` on this tree with no
    /// mutation in between. On failure the tree is untouched.
    pub(crate) fn try_insert_vacant(
        &mut self,
        slot: Option<(Handle, Side)>,
        key: K,
        aggregate: A,
    ) -> Result<Handle, AllocError> {
        let parent = slot.map(|(parent, _)| parent);
        let handle = self.nodes.try_alloc(Node::new(key, aggregate, parent))?;
        self.len += 1;

        match slot {
            None => self.root = Some(handle),
            Some((parent, side)) => {
                self.node_mut(parent).set_child(side, Some(handle));
                self.insert_balance(handle);
            }
        }
        Ok(handle)
    }

    /// Walks up from a freshly linked leaf, updating balance factors.
    ///
    /// Stops as soon as a subtree's height is unchanged. At most one repair is needed:
    /// the repaired subtree gets back the height it had before the insertion.
    fn insert_balance(&mut self, inserted: Handle) {
        let mut child = inserted;
        let mut parent = self.node(inserted).parent();

        while let Some(current) = parent {
            let node = self.node_mut(current);
            let side = node.side_of(child);
            node.grow(side);
            match node.balance() {
                0 => return,
                -1 | 1 => {
                    child = current;
                    parent = node.parent();
                }
                _ => {
                    self.repair(current);
                    return;
                }
            }
        }
    }
}
