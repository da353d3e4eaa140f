use std::collections::HashMap;

use octomesh_common::ArrayIndex;

use super::Proxy;
use crate::{spatial::is_approx, LeafData, NodeData, Octree};

/// Deep copy in two passes: every node is cloned into fresh arenas first, with a map from source
/// to clone index, then child links are rewritten through that map.
impl<T: Clone, Idx: ArrayIndex> Clone for Octree<T, Idx> {
    fn clone(&self) -> Self {
        let mut out = Self::new(self.max_depth, self.bounds.origin, self.bounds.length);
        let mut swaps: HashMap<Idx, Idx> = HashMap::with_capacity(self.node_count());
        let mut branches = Vec::with_capacity(self.branch_data.len());

        for (idx, data, _) in self.iter() {
            let copy = match data {
                NodeData::Leaf(leaf) => out.push_leaf(leaf.clone()),
                NodeData::Branch(children) => {
                    branches.push((idx, children));
                    out.push_branch()
                }
            };
            // the clone has as many nodes as the source, so its indices always fit
            let copy = copy.expect("cloned octree cannot exceed the source's index range");
            swaps.insert(idx, copy);
        }

        for (src, children) in branches {
            let Proxy::Branch(dst) = out.proxies[swaps[&src].as_usize()] else {
                unreachable!("branches are cloned as branches");
            };
            out.branch_data[dst.as_usize()] = children.map(|child| child.map(|c| swaps[&c]));
        }

        out.root = self.root.map(|root| swaps[&root]);
        out
    }
}

impl<T, Idx: ArrayIndex> Octree<T, Idx> {
    /// Nodes in traversal order, and the dense id of each node within that order.
    fn traversal_ids(&self) -> (Vec<Idx>, HashMap<Idx, usize>) {
        let order: Vec<Idx> = self.iter().map(|(idx, _, _)| idx).collect();
        let ids = order.iter().enumerate().map(|(id, idx)| (*idx, id)).collect();
        (order, ids)
    }
}

/// Structural equality.
///
/// Trees are equal if their origins are approximately equal, their sizes and max depths are
/// identical, and a simultaneous traversal of both finds nodes of the same kind at every step,
/// with branches linking to children at the same traversal positions and leaves holding
/// approximately equal payloads. How nodes are laid out in the arenas doesn't matter.
impl<T: LeafData, Idx: ArrayIndex> PartialEq for Octree<T, Idx> {
    fn eq(&self, other: &Self) -> bool {
        if !is_approx(&self.bounds.origin.coords, &other.bounds.origin.coords)
            || self.bounds.length != other.bounds.length
            || self.max_depth != other.max_depth
        {
            return false;
        }

        let (this_order, this_ids) = self.traversal_ids();
        let (that_order, that_ids) = other.traversal_ids();
        if this_order.len() != that_order.len() {
            return false;
        }

        this_order.iter().zip(&that_order).all(|(a, b)| {
            match (self.node(*a), other.node(*b)) {
                (Some(NodeData::Branch(ac)), Some(NodeData::Branch(bc))) => {
                    ac.iter().zip(bc).all(|(x, y)| {
                        x.map(|c| this_ids[&c]) == y.map(|c| that_ids[&c])
                    })
                }
                (Some(NodeData::Leaf(x)), Some(NodeData::Leaf(y))) => x.approx_eq(y),
                _ => false,
            }
        })
    }
}
