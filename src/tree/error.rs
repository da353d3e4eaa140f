use octomesh_common::ArrayIndex;

use crate::spatial::Real;

/// Errors related to [Octrees](crate::Octree).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error<Idx: ArrayIndex> {
    #[error("Size expansion must lie within [0, 1]; got {0}")]
    InvalidSizeExpand(Real),
    #[error("Point cloud has {points} points but {colors} colors")]
    ColorCountMismatch { points: usize, colors: usize },
    #[error("Attempted to insert into a tree with non-positive size {0}")]
    Unbounded(Real),
    #[error("Expected a leaf at depth {depth}, but node {node:?} is a branch")]
    NotALeaf { node: Idx, depth: usize },
    #[error("Expected a branch at depth {depth}, but node {node:?} is a leaf")]
    NotABranch { node: Idx, depth: usize },
    #[error("Index type cannot address node number {0}")]
    IndexOverflow(usize),
}
