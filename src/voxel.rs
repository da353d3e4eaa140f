//! A sparse grid of colored voxels, and its lossy bridge to [Octree].

use std::collections::HashMap;

use nalgebra::Vector3;
use octomesh_common::ArrayIndex;

use crate::{
    spatial::{Aabb, Color, Real, WorldPoint, WorldVector},
    Error, Octant, Octree,
};

/// Integer coordinates of a cell within a [VoxelGrid].
pub type GridIndex = Vector3<i32>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voxel {
    pub grid_index: GridIndex,
    pub color: Color,
}

impl Voxel {
    pub fn new(grid_index: GridIndex, color: Color) -> Self {
        Self { grid_index, color }
    }
}

/// A sparse set of cubic voxels of edge `voxel_size`, laid out on a grid anchored at `origin`.
///
/// Holds at most one voxel per grid index.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    pub voxel_size: Real,
    pub origin: WorldPoint,
    voxels: HashMap<GridIndex, Voxel>,
}

impl Default for VoxelGrid {
    fn default() -> Self {
        Self::new(0.0, WorldPoint::origin())
    }
}

impl VoxelGrid {
    pub fn new(voxel_size: Real, origin: WorldPoint) -> Self {
        Self {
            voxel_size,
            origin,
            voxels: HashMap::new(),
        }
    }

    /// Store `voxel`, replacing any voxel previously stored at the same grid index.
    pub fn insert(&mut self, voxel: Voxel) -> Option<Voxel> {
        self.voxels.insert(voxel.grid_index, voxel)
    }

    pub fn voxel(&self, index: &GridIndex) -> Option<&Voxel> {
        self.voxels.get(index)
    }

    /// Every voxel, in no particular order.
    pub fn voxels(&self) -> impl Iterator<Item = &Voxel> + '_ {
        self.voxels.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn clear(&mut self) {
        self.voxels.clear();
    }

    /// The grid cell containing `point`: `floor((point - origin) / voxel_size)`.
    pub fn grid_index_of(&self, point: &WorldPoint) -> GridIndex {
        ((point - self.origin) / self.voxel_size).map(|c| c.floor() as i32)
    }

    /// World-space center of the cell at `index`.
    pub fn voxel_center(&self, index: &GridIndex) -> WorldPoint {
        self.origin + (index.cast::<Real>() + WorldVector::repeat(0.5)) * self.voxel_size
    }

    /// The eight corners of the cell at `index`, in [Octant] order.
    pub fn voxel_bounding_points(&self, index: &GridIndex) -> [WorldPoint; 8] {
        let lower = self.origin + index.cast::<Real>() * self.voxel_size;
        std::array::from_fn(|i| lower + Octant(i as u8).vector().cast::<Real>() * self.voxel_size)
    }

    fn index_bounds(&self) -> Option<(GridIndex, GridIndex)> {
        let mut indices = self.voxels.keys();
        let first = *indices.next()?;
        Some(indices.fold((first, first), |(lo, hi), idx| {
            (lo.inf(idx), hi.sup(idx))
        }))
    }

    /// Lower corner of the box around every voxel; the origin if the grid is empty.
    pub fn min_bound(&self) -> WorldPoint {
        match self.index_bounds() {
            Some((lo, _)) => self.origin + lo.cast::<Real>() * self.voxel_size,
            None => self.origin,
        }
    }

    /// Upper corner of the box around every voxel; the origin if the grid is empty.
    pub fn max_bound(&self) -> WorldPoint {
        match self.index_bounds() {
            Some((_, hi)) => {
                self.origin + (hi.cast::<Real>() + WorldVector::repeat(1.0)) * self.voxel_size
            }
            None => self.origin,
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::new(self.min_bound(), self.max_bound())
    }

    /// Mean of the voxel centers; the origin if the grid is empty.
    pub fn center(&self) -> WorldPoint {
        if self.voxels.is_empty() {
            return self.origin;
        }
        let sum = self
            .voxels
            .keys()
            .fold(WorldVector::zeros(), |acc, idx| acc + self.voxel_center(idx).coords);
        WorldPoint::from(sum / self.voxels.len() as Real)
    }

    /// For each query point, whether the cell containing it holds a voxel.
    pub fn check_if_included(&self, queries: &[WorldPoint]) -> Vec<bool> {
        queries
            .iter()
            .map(|q| self.voxels.contains_key(&self.grid_index_of(q)))
            .collect()
    }

    /// Bucket the leaves of `tree` into a grid.
    ///
    /// The voxel size is the smallest leaf size found, and each leaf's center picks its cell.
    /// Leaves whose centers fall into the same cell overwrite each other in traversal order.
    /// An empty tree produces an empty grid with zero voxel size.
    pub fn from_octree<Idx: ArrayIndex>(tree: &Octree<Color, Idx>) -> Self {
        let voxel_size = tree
            .leaves()
            .map(|(_, info)| info.size())
            .reduce(Real::min)
            .unwrap_or(0.0);
        let mut grid = Self::new(voxel_size, tree.origin());
        if voxel_size > 0.0 {
            for (color, info) in tree.leaves() {
                let index = grid.grid_index_of(&info.center());
                grid.insert(Voxel::new(index, *color));
            }
        }
        tracing::debug!(voxels = grid.len(), voxel_size, "converted octree to voxel grid");
        grid
    }

    /// Build an octree of depth `max_depth` spanning this grid, with one point per voxel at the
    /// voxel's center.
    ///
    /// The tree's origin is the grid's lower bound and its size is the longest side of the
    /// grid's bound. Voxels are inserted in ascending grid-index order.
    pub fn to_octree<Idx: ArrayIndex>(&self, max_depth: usize) -> Result<Octree<Color, Idx>, Error<Idx>> {
        let bounds = self.bounding_box();
        let mut tree = Octree::new(max_depth, bounds.mins, bounds.max_extent());
        if self.voxels.is_empty() {
            return Ok(tree);
        }
        if !(tree.size() > 0.0) {
            return Err(Error::Unbounded(tree.size()));
        }

        let mut voxels: Vec<&Voxel> = self.voxels.values().collect();
        voxels.sort_by_key(|v| (v.grid_index.x, v.grid_index.y, v.grid_index.z));
        for voxel in voxels {
            tree.insert_point(&self.voxel_center(&voxel.grid_index), voxel.color)?;
        }
        tracing::debug!(
            voxels = self.len(),
            leaves = tree.leaf_count(),
            "converted voxel grid to octree"
        );
        Ok(tree)
    }
}

impl<Idx: ArrayIndex> Octree<Color, Idx> {
    /// See [VoxelGrid::from_octree].
    pub fn to_voxel_grid(&self) -> VoxelGrid {
        VoxelGrid::from_octree(self)
    }

    /// See [VoxelGrid::to_octree].
    pub fn from_voxel_grid(grid: &VoxelGrid, max_depth: usize) -> Result<Self, Error<Idx>> {
        grid.to_octree(max_depth)
    }
}
