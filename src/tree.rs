mod debug;
mod error;
mod info;
mod iter;
mod leaf;
mod node;
mod proxy;
mod structure;

pub use error::*;
pub use info::*;
pub use iter::*;
pub use leaf::*;
pub use node::*;
use proxy::Proxy;

use octomesh_common::ArrayIndex;

use crate::{
    spatial::{Aabb, Aabc, Color, Real, WorldPoint, WorldVector},
    Octant,
};

/// Fraction by which [Octree::convert_from_point_cloud] grows a freshly fitted bound by default.
pub const DEFAULT_SIZE_EXPAND: Real = 0.01;

/// An adaptive octree over a cubic region of space.
///
/// Nodes live in flat arenas owned by the tree; a branch refers to its children by arena index,
/// and every node has exactly one parent. Nodes are created lazily as points are inserted, and
/// every leaf sits at exactly `max_depth`. A tree with `max_depth == 0` holds at most a single
/// leaf as its root.
///
/// Node bounds are never stored; they are derived from the root cube while descending (see
/// [NodeInfo]).
#[derive(Debug)]
pub struct Octree<T = Color, Idx: ArrayIndex = u32> {
    proxies: Vec<Proxy<Idx>>,
    branch_data: Vec<[Option<Idx>; 8]>,
    leaf_data: Vec<T>,
    root: Option<Idx>,
    bounds: Aabc,
    max_depth: usize,
}

/// Where [Octree::find_leaf_slot] ended up.
enum LeafSlot<Idx> {
    /// An existing leaf; holds its leaf-data index.
    Occupied(Idx),
    /// No leaf yet; holds the branch-data index and octant to attach one to, or `None` for
    /// the root.
    Vacant(Option<(Idx, Octant)>),
}

impl<T, Idx: ArrayIndex> Default for Octree<T, Idx> {
    fn default() -> Self {
        Self::with_max_depth(0)
    }
}

impl<T, Idx: ArrayIndex> Octree<T, Idx> {
    /// Construct an empty tree covering the cube `origin ≤ p < origin + size`.
    pub fn new(max_depth: usize, origin: WorldPoint, size: Real) -> Self {
        Self {
            proxies: Vec::new(),
            branch_data: Vec::new(),
            leaf_data: Vec::new(),
            root: None,
            bounds: Aabc::new(origin, size),
            max_depth,
        }
    }

    /// Construct an empty tree with no bound. Nothing can be inserted until a bound is set,
    /// e.g. by [Self::convert_from_point_cloud].
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self::new(max_depth, WorldPoint::origin(), 0.0)
    }

    /// Return true if `origin ≤ point < origin + size` on every axis.
    pub fn is_point_in_bound(point: &WorldPoint, origin: &WorldPoint, size: Real) -> bool {
        Aabc::new(*origin, size).contains(point)
    }

    #[inline]
    pub fn origin(&self) -> WorldPoint {
        self.bounds.origin
    }

    /// Edge length of the root cube.
    #[inline]
    pub fn size(&self) -> Real {
        self.bounds.length
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub fn bounds(&self) -> Aabc {
        self.bounds
    }

    /// The lower corner of the root cube.
    pub fn min_bound(&self) -> WorldPoint {
        self.bounds.origin
    }

    /// The (exclusive) upper corner of the root cube.
    pub fn max_bound(&self) -> WorldPoint {
        self.bounds.maxs()
    }

    /// Replace the root cube. Existing contents are discarded, since they were placed relative to
    /// the old bound.
    pub fn set_bounds(&mut self, origin: WorldPoint, size: Real) {
        self.clear_nodes();
        self.bounds = Aabc::new(origin, size);
    }

    #[inline]
    pub fn root(&self) -> Option<Idx> {
        self.root
    }

    /// True if the tree has no root node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of nodes (branches and leaves) in the tree.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.proxies.len()
    }

    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.leaf_data.len()
    }

    /// Drop every node. If `reset_bounds`, the root cube is also reset to zero size at the
    /// origin.
    pub fn clear(&mut self, reset_bounds: bool) {
        self.clear_nodes();
        if reset_bounds {
            self.bounds = Aabc::empty();
        }
    }

    fn clear_nodes(&mut self) {
        self.root = None;
        self.proxies.clear();
        self.branch_data.clear();
        self.leaf_data.clear();
    }

    fn next_index(len: usize) -> Result<Idx, Error<Idx>> {
        Idx::try_from_usize(len).ok_or(Error::IndexOverflow(len))
    }

    pub(crate) fn push_branch(&mut self) -> Result<Idx, Error<Idx>> {
        let node = Self::next_index(self.proxies.len())?;
        let children = Self::next_index(self.branch_data.len())?;
        self.branch_data.push([None; 8]);
        self.proxies.push(Proxy::Branch(children));
        Ok(node)
    }

    pub(crate) fn push_leaf(&mut self, data: T) -> Result<Idx, Error<Idx>> {
        let node = Self::next_index(self.proxies.len())?;
        let leaf = Self::next_index(self.leaf_data.len())?;
        self.leaf_data.push(data);
        self.proxies.push(Proxy::Leaf(leaf));
        Ok(node)
    }

    /// Descend towards the leaf that should hold `point`, creating missing branches on the way.
    ///
    /// Returns `None` if the point falls outside the bound of any node along the path.
    fn find_leaf_slot(&mut self, point: &WorldPoint) -> Result<Option<LeafSlot<Idx>>, Error<Idx>> {
        let mut info = NodeInfo::root(self.bounds);
        if !info.contains(point) {
            return Ok(None);
        }
        let mut node = match self.root {
            Some(root) => root,
            None if self.max_depth == 0 => return Ok(Some(LeafSlot::Vacant(None))),
            None => {
                let root = self.push_branch()?;
                self.root = Some(root);
                root
            }
        };
        loop {
            if !info.contains(point) {
                return Ok(None);
            }
            match self.proxies[node.as_usize()] {
                Proxy::Leaf(leaf) => {
                    if info.depth != self.max_depth {
                        return Err(Error::NotABranch {
                            node,
                            depth: info.depth,
                        });
                    }
                    return Ok(Some(LeafSlot::Occupied(leaf)));
                }
                Proxy::Branch(children) => {
                    if info.depth >= self.max_depth {
                        return Err(Error::NotALeaf {
                            node,
                            depth: info.depth,
                        });
                    }
                    let (oct, child_info) = info.child_containing(point);
                    match self.branch_data[children.as_usize()][usize::from(oct)] {
                        Some(child) => node = child,
                        None if child_info.depth == self.max_depth => {
                            return Ok(Some(LeafSlot::Vacant(Some((children, oct)))));
                        }
                        None => {
                            let child = self.push_branch()?;
                            self.branch_data[children.as_usize()][usize::from(oct)] = Some(child);
                            node = child;
                        }
                    }
                    info = child_info;
                }
            }
        }
    }

    fn attach_leaf(&mut self, parent: Option<(Idx, Octant)>, data: T) -> Result<(), Error<Idx>> {
        let leaf = self.push_leaf(data)?;
        match parent {
            None => self.root = Some(leaf),
            Some((children, oct)) => {
                self.branch_data[children.as_usize()][usize::from(oct)] = Some(leaf)
            }
        }
        Ok(())
    }

    /// Insert `data` at `point`, replacing whatever the leaf containing `point` held before.
    ///
    /// Points outside the tree's bound (including every point, if the tree has no bound) are
    /// dropped without error; the return value says whether the point was stored.
    ///
    /// # Errors
    ///
    /// * [Error::NotALeaf] / [Error::NotABranch] if the tree's structure is inconsistent with
    ///   its `max_depth`.
    /// * [Error::IndexOverflow] if `Idx` cannot address another node.
    pub fn insert_point(&mut self, point: &WorldPoint, data: T) -> Result<bool, Error<Idx>> {
        match self.find_leaf_slot(point)? {
            None => {
                tracing::trace!(?point, "dropped point outside of octree bound");
                Ok(false)
            }
            Some(LeafSlot::Occupied(leaf)) => {
                self.leaf_data[leaf.as_usize()] = data;
                Ok(true)
            }
            Some(LeafSlot::Vacant(parent)) => self.attach_leaf(parent, data).map(|_| true),
        }
    }

    /// Insert at `point` by running `update` on the containing leaf's data, first creating that
    /// data with `init` if the leaf doesn't exist yet.
    ///
    /// Bound handling and errors are the same as for [Self::insert_point].
    pub fn insert_point_with(
        &mut self,
        point: &WorldPoint,
        init: impl FnOnce() -> T,
        update: impl FnOnce(&mut T),
    ) -> Result<bool, Error<Idx>> {
        match self.find_leaf_slot(point)? {
            None => {
                tracing::trace!(?point, "dropped point outside of octree bound");
                Ok(false)
            }
            Some(LeafSlot::Occupied(leaf)) => {
                update(&mut self.leaf_data[leaf.as_usize()]);
                Ok(true)
            }
            Some(LeafSlot::Vacant(parent)) => {
                let mut data = init();
                update(&mut data);
                self.attach_leaf(parent, data).map(|_| true)
            }
        }
    }

    /// Find the leaf-data index of the leaf whose bound contains `point`.
    fn locate(&self, point: &WorldPoint) -> Option<(Idx, NodeInfo)> {
        let mut node = self.root?;
        let mut info = NodeInfo::root(self.bounds);
        loop {
            if !info.contains(point) {
                return None;
            }
            match self.proxies[node.as_usize()] {
                Proxy::Leaf(leaf) => return Some((leaf, info)),
                Proxy::Branch(children) => {
                    let (oct, child_info) = info.child_containing(point);
                    node = self.branch_data[children.as_usize()][usize::from(oct)]?;
                    info = child_info;
                }
            }
        }
    }

    /// Find the leaf whose bound contains `point`, along with that leaf's [NodeInfo].
    ///
    /// Returns `None` if the tree is empty, `point` lies outside the root bound, or no leaf has
    /// been created for that region yet. Leaves partition space exactly, so at most one leaf can
    /// match.
    pub fn locate_leaf_node(&self, point: &WorldPoint) -> Option<(&T, NodeInfo)> {
        self.locate(point)
            .map(|(leaf, info)| (&self.leaf_data[leaf.as_usize()], info))
    }

    /// Mutable version of [Self::locate_leaf_node].
    pub fn locate_leaf_node_mut(&mut self, point: &WorldPoint) -> Option<(&mut T, NodeInfo)> {
        let (leaf, info) = self.locate(point)?;
        Some((&mut self.leaf_data[leaf.as_usize()], info))
    }

    /// The root cube fitted around `points`: centered on their bounding box, with edge length
    /// equal to the longest box side grown by `size_expand`.
    ///
    /// If every point coincides, the edge length is `size_expand` itself.
    fn fit_bounds(points: &[WorldPoint], size_expand: Real) -> Aabc {
        let Some(bb) = Aabb::from_points(points) else {
            return Aabc::new(WorldPoint::origin(), size_expand);
        };
        let center = bb.center();
        let half = bb.max_extent() / 2.0;
        let half = if half == 0.0 {
            size_expand / 2.0
        } else {
            half * (1.0 + size_expand)
        };
        Aabc::new(center - WorldVector::repeat(half), half * 2.0)
    }

    /// Rebuild the tree from a colored point cloud.
    ///
    /// Existing nodes are always dropped. If `reset_bounds`, the root cube is refitted around
    /// `points` first (see [DEFAULT_SIZE_EXPAND] for a sensible `size_expand`); otherwise the
    /// current bound is kept. Points are then inserted in order, so later points overwrite
    /// earlier ones that land in the same leaf. Returns the number of points stored; points
    /// outside the bound are dropped.
    ///
    /// # Errors
    ///
    /// Nothing is modified if validation fails.
    ///
    /// * [Error::InvalidSizeExpand] if `size_expand` ∉ `[0, 1]`.
    /// * [Error::ColorCountMismatch] if `points` and `colors` differ in length.
    /// * [Error::Unbounded] if there are points to insert but the bound has no volume.
    #[tracing::instrument(skip(self, points, colors), fields(points = points.len()))]
    pub fn convert_from_point_cloud(
        &mut self,
        points: &[WorldPoint],
        colors: &[T],
        reset_bounds: bool,
        size_expand: Real,
    ) -> Result<usize, Error<Idx>>
    where
        T: Clone,
    {
        if !(0.0..=1.0).contains(&size_expand) {
            return Err(Error::InvalidSizeExpand(size_expand));
        }
        if points.len() != colors.len() {
            return Err(Error::ColorCountMismatch {
                points: points.len(),
                colors: colors.len(),
            });
        }
        let bounds = if reset_bounds {
            Self::fit_bounds(points, size_expand)
        } else {
            self.bounds
        };
        // negated so that NaN is rejected too
        if !points.is_empty() && !(bounds.length > 0.0) {
            return Err(Error::Unbounded(bounds.length));
        }

        self.clear_nodes();
        self.bounds = bounds;

        let mut inserted = 0;
        for (point, color) in points.iter().zip(colors) {
            if self.insert_point(point, color.clone())? {
                inserted += 1;
            }
        }
        tracing::debug!(
            inserted,
            dropped = points.len() - inserted,
            nodes = self.node_count(),
            "converted point cloud to octree"
        );
        Ok(inserted)
    }
}
