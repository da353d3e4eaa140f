use crate::{
    spatial::{Aabc, Real, WorldPoint},
    Octant,
};

/// Geometric facts about a node, derived while walking down from the root.
///
/// Bounds are never stored per node: a child's cube is its parent's cube halved, offset by the
/// child's [Octant].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeInfo {
    pub bounds: Aabc,
    /// Number of ancestors; the root has depth 0.
    pub depth: usize,
    /// Which child of its parent this node is. `Octant(0)` for the root.
    pub child_index: Octant,
}

impl NodeInfo {
    pub fn root(bounds: Aabc) -> Self {
        Self {
            bounds,
            depth: 0,
            child_index: Octant(0),
        }
    }

    /// Info for the `oct`th child of this node.
    pub fn child(&self, oct: Octant) -> Self {
        Self {
            bounds: self.bounds.child(oct),
            depth: self.depth + 1,
            child_index: oct,
        }
    }

    /// The octant of this node that `point` falls into, along with that child's info.
    pub fn child_containing(&self, point: &WorldPoint) -> (Octant, Self) {
        let oct = self.bounds.octant_of(point);
        (oct, self.child(oct))
    }

    #[inline]
    pub fn origin(&self) -> WorldPoint {
        self.bounds.origin
    }

    #[inline]
    pub fn size(&self) -> Real {
        self.bounds.length
    }

    #[inline]
    pub fn center(&self) -> WorldPoint {
        self.bounds.center()
    }

    #[inline]
    pub fn contains(&self, point: &WorldPoint) -> bool {
        self.bounds.contains(point)
    }
}
