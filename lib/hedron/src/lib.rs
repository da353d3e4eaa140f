//! Topology for indexed triangle meshes.
//!
//! A [TriangleMesh] is a set of parallel arrays: vertex positions, triangles as triples of
//! vertex indices, and optional per-vertex normals and colors, per-triangle normals and a
//! per-vertex adjacency list. Everything here edits those arrays in place while keeping them
//! consistent with each other.

mod error;
pub use error::*;
pub mod intersect;
mod mesh;
pub use mesh::*;

use nalgebra::{Point3, Vector3};

pub type Real = f64;

pub type Point = Point3<Real>;

pub type Vector = Vector3<Real>;

/// An RGB color, nominally in `[0, 1]` per channel.
pub type Color = Vector3<Real>;

/// Index of a vertex within a [TriangleMesh].
pub type VertexIndex = u32;

/// Three vertex indices, wound counter-clockwise when viewed from the front.
pub type Triangle = [VertexIndex; 3];

/// Written into triangles in place of vertices that have been removed.
pub const INVALID_INDEX: VertexIndex = VertexIndex::MAX;
