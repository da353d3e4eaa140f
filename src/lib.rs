//! Sparse spatial structures for point clouds and triangle meshes.
//!
//! * [Octree]: an adaptive, arena-backed octree over a cubic bound, filled from colored point
//!   clouds.
//! * [voxel::VoxelGrid]: a sparse grid of colored voxels, convertible to and from octrees.
//! * `mesh` (with the default `mesh` feature): the [hedron] triangle-mesh topology engine.
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

mod octant;
pub use octant::*;
pub mod spatial;
mod tree;
pub use tree::*;
pub mod voxel;

#[cfg(feature = "mesh")]
pub use hedron as mesh;
