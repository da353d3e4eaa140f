use std::fmt::Display;

use octomesh_common::ArrayIndex;

use crate::{NodeData, Octree};

impl<T: std::fmt::Debug, Idx: ArrayIndex> Display for Octree<T, Idx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Octree (origin: {:?}, size: {}, max depth: {}, ({} branches, {} leaves)) {{",
            self.bounds.origin.coords.as_slice(),
            self.bounds.length,
            self.max_depth,
            self.branch_data.len(),
            self.leaf_data.len(),
        )?;
        for (idx, data, info) in self.iter() {
            let indent = "  ".repeat(info.depth + 1);
            let oct = info.child_index.0;
            match data {
                NodeData::Leaf(leaf) => write!(f, "\n{indent}<L{oct} @ {idx:?}> {leaf:?}")?,
                NodeData::Branch(_) => write!(f, "\n{indent}<B{oct} @ {idx:?}>")?,
            }
        }
        write!(f, "\n}}")
    }
}
