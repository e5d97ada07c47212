mod arena;
mod handle;
mod insert;
mod node;
mod raw_avl_tree;
mod remove;
mod reserve;
mod rotate;

pub(crate) use raw_avl_tree::{Iter, RawAvlTree, Search};
pub(crate) use reserve::try_reserve_chain;

#[cfg(test)]
pub(crate) use reserve::fail_point;
