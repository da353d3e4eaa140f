use octomesh_common::ArrayIndex;

use super::Proxy;
use crate::Octree;

/// A borrowed view of the data behind a node.
#[derive(Debug)]
pub enum NodeData<'tree, T, Idx: ArrayIndex> {
    /// Child node indices, in [Octant](crate::Octant) order.
    Branch(&'tree [Option<Idx>; 8]),
    Leaf(&'tree T),
}

impl<'tree, T, Idx: ArrayIndex> Clone for NodeData<'tree, T, Idx> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'tree, T, Idx: ArrayIndex> Copy for NodeData<'tree, T, Idx> {}

impl<'tree, T, Idx: ArrayIndex> NodeData<'tree, T, Idx> {
    pub(crate) fn from_tree_proxy(tree: &'tree Octree<T, Idx>, prox: Proxy<Idx>) -> Self {
        match prox {
            Proxy::Leaf(idx) => Self::Leaf(&tree.leaf_data[idx.as_usize()]),
            Proxy::Branch(idx) => Self::Branch(&tree.branch_data[idx.as_usize()]),
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    #[inline]
    pub fn is_branch(&self) -> bool {
        matches!(self, Self::Branch(_))
    }

    pub fn leaf(self) -> Option<&'tree T> {
        match self {
            Self::Leaf(data) => Some(data),
            Self::Branch(_) => None,
        }
    }

    pub fn children(self) -> Option<&'tree [Option<Idx>; 8]> {
        match self {
            Self::Branch(children) => Some(children),
            Self::Leaf(_) => None,
        }
    }
}

/// A view of the data behind a node that allows editing leaf payloads.
///
/// Child links stay read-only; the shape of a tree only changes through insertion.
#[derive(Debug)]
pub enum NodeDataMut<'tree, T, Idx: ArrayIndex> {
    Branch(&'tree [Option<Idx>; 8]),
    Leaf(&'tree mut T),
}

impl<T, Idx: ArrayIndex> Octree<T, Idx> {
    /// Borrow the data behind node `index`, if such a node exists.
    pub fn node(&self, index: Idx) -> Option<NodeData<'_, T, Idx>> {
        self.proxies
            .get(index.as_usize())
            .map(|prox| NodeData::from_tree_proxy(self, *prox))
    }

    /// Mutably borrow the data behind node `index`, if such a node exists.
    pub fn node_mut(&mut self, index: Idx) -> Option<NodeDataMut<'_, T, Idx>> {
        let prox = *self.proxies.get(index.as_usize())?;
        Some(match prox {
            Proxy::Leaf(idx) => NodeDataMut::Leaf(&mut self.leaf_data[idx.as_usize()]),
            Proxy::Branch(idx) => NodeDataMut::Branch(&self.branch_data[idx.as_usize()]),
        })
    }
}
