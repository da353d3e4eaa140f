use octomesh_common::ArrayIndex;

/// The type of data a node points to, and the index of that data within its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Proxy<Idx: ArrayIndex> {
    /// Internal pointer to branch data
    Branch(Idx),
    /// Internal pointer to leaf data
    Leaf(Idx),
}
