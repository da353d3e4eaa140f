mod cleanup;
mod cluster;
mod intersect;
mod orient;
mod topology;

pub use cleanup::*;
pub use cluster::*;
pub use topology::*;

use std::collections::HashSet;

use nalgebra::Vector4;

use crate::{Color, MeshError, Point, Real, Triangle, Vector, VertexIndex, INVALID_INDEX};

/// Normal assigned in place of one that cannot be normalized.
const FALLBACK_NORMAL: Vector = Vector::new(0.0, 0.0, 1.0);

/// An indexed triangle mesh.
///
/// Optional attributes are either empty or exactly as long as their primary array (vertices or
/// triangles). Every operation that adds or removes elements keeps them that way, and either
/// rebuilds or clears the adjacency list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub(crate) vertices: Vec<Point>,
    pub(crate) vertex_normals: Vec<Vector>,
    pub(crate) vertex_colors: Vec<Color>,
    pub(crate) triangles: Vec<Triangle>,
    pub(crate) triangle_normals: Vec<Vector>,
    pub(crate) adjacency_list: Vec<HashSet<VertexIndex>>,
}

fn check_length(attribute: &'static str, expected: usize, found: usize) -> Result<(), MeshError> {
    if found != expected {
        return Err(MeshError::AttributeLength {
            attribute,
            expected,
            found,
        });
    }
    Ok(())
}

fn check_vertex_count(count: usize) -> Result<(), MeshError> {
    // INVALID_INDEX is reserved
    let max = INVALID_INDEX as usize;
    if count > max {
        return Err(MeshError::TooManyVertices { max, found: count });
    }
    Ok(())
}

/// Normalize `n` in place, falling back to +Z if that produces NaN.
fn normalize_or_up(n: &mut Vector) {
    *n = n.normalize();
    if n.x.is_nan() {
        *n = FALLBACK_NORMAL;
    }
}

/// Area of the triangle `p0 p1 p2`.
pub fn compute_triangle_area(p0: &Point, p1: &Point, p2: &Point) -> Real {
    let x = p0 - p1;
    let y = p0 - p2;
    0.5 * x.cross(&y).norm()
}

/// Plane `(a, b, c, d)` through `p0 p1 p2`, with unit normal `(a, b, c)` and `a·x + b·y + c·z +
/// d = 0` on the plane.
///
/// A degenerate triangle yields the zero plane.
pub fn compute_triangle_plane(p0: &Point, p1: &Point, p2: &Point) -> Vector4<Real> {
    let abc = (p1 - p0).cross(&(p2 - p0));
    let norm = abc.norm();
    if norm == 0.0 {
        return Vector4::zeros();
    }
    let abc = abc / norm;
    let d = -abc.dot(&p0.coords);
    Vector4::new(abc.x, abc.y, abc.z, d)
}

impl TriangleMesh {
    /// Construct a mesh without optional attributes.
    ///
    /// # Errors
    ///
    /// * [MeshError::TooManyVertices] if the vertex count doesn't fit in a [VertexIndex].
    /// * [MeshError::VertexOutOfRange] if a triangle refers to a vertex that doesn't exist.
    pub fn new(vertices: Vec<Point>, triangles: Vec<Triangle>) -> Result<Self, MeshError> {
        check_vertex_count(vertices.len())?;
        for (t, tri) in triangles.iter().enumerate() {
            if let Some(&vertex) = tri.iter().find(|&&v| v as usize >= vertices.len()) {
                return Err(MeshError::VertexOutOfRange {
                    triangle: t,
                    vertex,
                    vertices: vertices.len(),
                });
            }
        }
        Ok(Self {
            vertices,
            triangles,
            ..Default::default()
        })
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[inline]
    pub fn vertex_normals(&self) -> &[Vector] {
        &self.vertex_normals
    }

    #[inline]
    pub fn vertex_colors(&self) -> &[Color] {
        &self.vertex_colors
    }

    #[inline]
    pub fn triangle_normals(&self) -> &[Vector] {
        &self.triangle_normals
    }

    #[inline]
    pub fn adjacency_list(&self) -> &[HashSet<VertexIndex>] {
        &self.adjacency_list
    }

    /// Replace the per-vertex normals. An empty vector removes them.
    pub fn set_vertex_normals(&mut self, normals: Vec<Vector>) -> Result<(), MeshError> {
        if !normals.is_empty() {
            check_length("vertex_normals", self.vertices.len(), normals.len())?;
        }
        self.vertex_normals = normals;
        Ok(())
    }

    /// Replace the per-vertex colors. An empty vector removes them.
    pub fn set_vertex_colors(&mut self, colors: Vec<Color>) -> Result<(), MeshError> {
        if !colors.is_empty() {
            check_length("vertex_colors", self.vertices.len(), colors.len())?;
        }
        self.vertex_colors = colors;
        Ok(())
    }

    /// Replace the per-triangle normals. An empty vector removes them.
    pub fn set_triangle_normals(&mut self, normals: Vec<Vector>) -> Result<(), MeshError> {
        if !normals.is_empty() {
            check_length("triangle_normals", self.triangles.len(), normals.len())?;
        }
        self.triangle_normals = normals;
        Ok(())
    }

    pub fn has_vertices(&self) -> bool {
        !self.vertices.is_empty()
    }

    pub fn has_triangles(&self) -> bool {
        self.has_vertices() && !self.triangles.is_empty()
    }

    pub fn has_vertex_normals(&self) -> bool {
        self.has_vertices() && self.vertex_normals.len() == self.vertices.len()
    }

    pub fn has_vertex_colors(&self) -> bool {
        self.has_vertices() && self.vertex_colors.len() == self.vertices.len()
    }

    pub fn has_triangle_normals(&self) -> bool {
        self.has_triangles() && self.triangle_normals.len() == self.triangles.len()
    }

    pub fn has_adjacency_list(&self) -> bool {
        self.has_vertices() && self.adjacency_list.len() == self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_vertices()
    }

    /// Remove every element and attribute.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Append `other`, shifting its vertex indices past this mesh's vertices.
    ///
    /// An optional attribute survives only if `other` carries it, and this mesh either carries it
    /// too or has no elements of the relevant kind yet. The adjacency list is rebuilt if present.
    pub fn append(&mut self, other: &TriangleMesh) -> Result<(), MeshError> {
        if other.is_empty() {
            return Ok(());
        }
        check_vertex_count(self.vertices.len() + other.vertices.len())?;
        let offset = self.vertices.len() as VertexIndex;

        let keep_vn = (!self.has_vertices() || self.has_vertex_normals()) && other.has_vertex_normals();
        let keep_vc = (!self.has_vertices() || self.has_vertex_colors()) && other.has_vertex_colors();
        let keep_tn =
            (!self.has_triangles() || self.has_triangle_normals()) && other.has_triangle_normals();
        let rebuild_adjacency = self.has_adjacency_list();

        self.vertices.extend_from_slice(&other.vertices);
        if keep_vn {
            self.vertex_normals.extend_from_slice(&other.vertex_normals);
        } else {
            self.vertex_normals.clear();
        }
        if keep_vc {
            self.vertex_colors.extend_from_slice(&other.vertex_colors);
        } else {
            self.vertex_colors.clear();
        }

        if keep_tn {
            self.triangle_normals.extend_from_slice(&other.triangle_normals);
        } else {
            self.triangle_normals.clear();
        }
        self.triangles
            .extend(other.triangles.iter().map(|t| t.map(|v| v + offset)));

        if rebuild_adjacency {
            self.compute_adjacency_list();
        } else {
            self.adjacency_list.clear();
        }
        Ok(())
    }

    /// Component-wise minimum of the vertices; zero for a mesh without vertices.
    pub fn min_bound(&self) -> Point {
        self.vertices
            .iter()
            .copied()
            .reduce(|a, b| a.inf(&b))
            .unwrap_or_else(Point::origin)
    }

    /// Component-wise maximum of the vertices; zero for a mesh without vertices.
    pub fn max_bound(&self) -> Point {
        self.vertices
            .iter()
            .copied()
            .reduce(|a, b| a.sup(&b))
            .unwrap_or_else(Point::origin)
    }

    /// The corners of `triangle`, or `None` if it refers to a vertex that doesn't exist.
    pub(crate) fn triangle_points(&self, triangle: &Triangle) -> Option<[&Point; 3]> {
        let [a, b, c] = *triangle;
        Some([
            self.vertices.get(a as usize)?,
            self.vertices.get(b as usize)?,
            self.vertices.get(c as usize)?,
        ])
    }

    /// Compute one normal per triangle as `(v1 - v0) × (v2 - v0)`.
    ///
    /// Unless `normalized`, the magnitude of each normal is twice the triangle's area. A
    /// triangle referring to a missing vertex gets a zero normal.
    pub fn compute_triangle_normals(&mut self, normalized: bool) {
        self.triangle_normals = self
            .triangles
            .iter()
            .map(|t| match self.triangle_points(t) {
                Some([p0, p1, p2]) => (p1 - p0).cross(&(p2 - p0)),
                None => Vector::zeros(),
            })
            .collect();
        if normalized {
            self.normalize_normals();
        }
    }

    /// Compute each vertex normal as the sum of the normals of the triangles around it.
    ///
    /// Missing triangle normals are computed first, unnormalized, so that the sum is weighted by
    /// area.
    pub fn compute_vertex_normals(&mut self, normalized: bool) {
        if !self.has_triangle_normals() {
            self.compute_triangle_normals(false);
        }
        let mut normals = vec![Vector::zeros(); self.vertices.len()];
        for (tri, n) in self.triangles.iter().zip(&self.triangle_normals) {
            for v in tri {
                if let Some(normal) = normals.get_mut(*v as usize) {
                    *normal += n;
                }
            }
        }
        self.vertex_normals = normals;
        if normalized {
            self.normalize_normals();
        }
    }

    /// Scale every vertex and triangle normal to unit length. Normals that can't be normalized
    /// become `(0, 0, 1)`.
    pub fn normalize_normals(&mut self) {
        self.vertex_normals.iter_mut().for_each(normalize_or_up);
        self.triangle_normals.iter_mut().for_each(normalize_or_up);
    }

    /// Rebuild the adjacency list: for every triangle edge, each endpoint lists the other.
    ///
    /// Indices past the end of the vertex array are skipped.
    pub fn compute_adjacency_list(&mut self) {
        let n = self.vertices.len();
        let mut adjacency = vec![HashSet::new(); n];
        for tri in &self.triangles {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                if (a as usize) < n && (b as usize) < n {
                    adjacency[a as usize].insert(b);
                    adjacency[b as usize].insert(a);
                }
            }
        }
        self.adjacency_list = adjacency;
    }

    /// Area of triangle `index`; zero if it refers to a missing vertex.
    ///
    /// # Panics
    ///
    /// If `index` is out of range.
    pub fn get_triangle_area(&self, index: usize) -> Real {
        match self.triangle_points(&self.triangles[index]) {
            Some([p0, p1, p2]) => compute_triangle_area(p0, p1, p2),
            None => 0.0,
        }
    }

    /// The area of every triangle, in triangle order.
    pub fn triangle_areas(&self) -> Vec<Real> {
        (0..self.triangles.len())
            .map(|t| self.get_triangle_area(t))
            .collect()
    }

    pub fn get_surface_area(&self) -> Real {
        (0..self.triangles.len())
            .map(|t| self.get_triangle_area(t))
            .sum()
    }

    /// Plane through triangle `index`; see [compute_triangle_plane]. The zero plane if the
    /// triangle refers to a missing vertex.
    ///
    /// # Panics
    ///
    /// If `index` is out of range.
    pub fn get_triangle_plane(&self, index: usize) -> Vector4<Real> {
        match self.triangle_points(&self.triangles[index]) {
            Some([p0, p1, p2]) => compute_triangle_plane(p0, p1, p2),
            None => Vector4::zeros(),
        }
    }
}
