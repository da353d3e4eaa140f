use std::iter::FusedIterator;

use octomesh_common::ArrayIndex;

use super::Proxy;
use crate::{NodeData, NodeDataMut, NodeInfo, Octant, Octree};

/// A depth-first, pre-order iterator over the nodes of an [Octree].
///
/// A branch is yielded before its children, and children are visited in [Octant] order. Empty
/// child slots are skipped.
pub struct NodeIter<'tree, T, Idx: ArrayIndex> {
    pub(crate) tree: &'tree Octree<T, Idx>,
    pub(crate) stack: Vec<(Idx, NodeInfo)>,
}

impl<'tree, T, Idx: ArrayIndex> NodeIter<'tree, T, Idx> {
    fn new(tree: &'tree Octree<T, Idx>) -> Self {
        Self {
            tree,
            stack: tree
                .root
                .map(|root| (root, NodeInfo::root(tree.bounds)))
                .into_iter()
                .collect(),
        }
    }
}

/// Push the children of a branch such that the lowest octant is popped first.
fn push_children<Idx: ArrayIndex>(
    stack: &mut Vec<(Idx, NodeInfo)>,
    children: &[Option<Idx>; 8],
    info: &NodeInfo,
) {
    for (oct, child) in children.iter().enumerate().rev() {
        if let Some(child) = child {
            stack.push((*child, info.child(Octant(oct as u8))));
        }
    }
}

impl<'tree, T, Idx: ArrayIndex> FusedIterator for NodeIter<'tree, T, Idx> {}

impl<'tree, T, Idx: ArrayIndex> Iterator for NodeIter<'tree, T, Idx> {
    type Item = (Idx, NodeData<'tree, T, Idx>, NodeInfo);

    fn next(&mut self) -> Option<Self::Item> {
        let (idx, info) = self.stack.pop()?;
        let data = NodeData::from_tree_proxy(self.tree, self.tree.proxies[idx.as_usize()]);
        if let NodeData::Branch(children) = data {
            push_children(&mut self.stack, children, &info);
        }
        Some((idx, data, info))
    }
}

impl<T, Idx: ArrayIndex> Octree<T, Idx> {
    /// Iterate over every node, depth-first and pre-order.
    pub fn iter(&self) -> NodeIter<'_, T, Idx> {
        NodeIter::new(self)
    }

    /// Iterate over every leaf payload along with its node info, in traversal order.
    pub fn leaves(&self) -> impl Iterator<Item = (&T, NodeInfo)> + '_ {
        self.iter()
            .filter_map(|(_, data, info)| data.leaf().map(|leaf| (leaf, info)))
    }

    /// Call `f` on every node, depth-first and pre-order. There is no way to stop early.
    pub fn traverse(&self, mut f: impl FnMut(Idx, NodeData<'_, T, Idx>, &NodeInfo)) {
        for (idx, data, info) in self.iter() {
            f(idx, data, &info);
        }
    }

    /// Like [Self::traverse], but leaf payloads may be edited in place.
    pub fn traverse_mut(&mut self, mut f: impl FnMut(Idx, NodeDataMut<'_, T, Idx>, &NodeInfo)) {
        let mut stack: Vec<(Idx, NodeInfo)> = self
            .root
            .map(|root| (root, NodeInfo::root(self.bounds)))
            .into_iter()
            .collect();
        while let Some((idx, info)) = stack.pop() {
            match self.proxies[idx.as_usize()] {
                Proxy::Leaf(leaf) => f(
                    idx,
                    NodeDataMut::Leaf(&mut self.leaf_data[leaf.as_usize()]),
                    &info,
                ),
                Proxy::Branch(children) => {
                    let children = &self.branch_data[children.as_usize()];
                    f(idx, NodeDataMut::Branch(children), &info);
                    push_children(&mut stack, children, &info);
                }
            }
        }
    }
}

impl<'tree, T, Idx: ArrayIndex> IntoIterator for &'tree Octree<T, Idx> {
    type Item = (Idx, NodeData<'tree, T, Idx>, NodeInfo);
    type IntoIter = NodeIter<'tree, T, Idx>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
