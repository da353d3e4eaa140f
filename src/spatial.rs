//! Geometric primitives shared by [Octrees](crate::Octree) and [VoxelGrids](crate::voxel::VoxelGrid).

mod bounding_box;
pub use bounding_box::*;
mod bounding_cube;
pub use bounding_cube::*;

use nalgebra::{Point3, Vector3};

/// Scalar type used for all world-space geometry.
pub type Real = f64;

/// A point within an octree volume
pub type WorldPoint = Point3<Real>;

/// A vector within an octree volume
pub type WorldVector = Vector3<Real>;

/// An RGB color, nominally in `[0, 1]` per channel.
pub type Color = Vector3<Real>;

/// Relative precision used by [is_approx].
pub const APPROX_PRECISION: Real = 1e-12;

/// Fuzzy vector equality: `‖a - b‖ ≤ ε · min(‖a‖, ‖b‖)`, with ε = [APPROX_PRECISION].
///
/// Two zero vectors are approximately equal; a zero vector is never approximately equal to a
/// non-zero one.
pub fn is_approx(a: &WorldVector, b: &WorldVector) -> bool {
    (a - b).norm() <= APPROX_PRECISION * a.norm().min(b.norm())
}
