use crate::{
    intersect::{aabb_aabb, triangle_aabb, triangle_triangle_3d},
    TriangleMesh,
};

impl TriangleMesh {
    /// Every pair `(i, j)`, `i < j`, of triangles that intersect without sharing a vertex.
    ///
    /// Triangles sharing a vertex always touch, so they are not tested. Neither are triangles
    /// referring to a missing vertex.
    pub fn get_self_intersecting_triangles(&self) -> Vec<(usize, usize)> {
        let candidates: Vec<_> = self
            .triangles
            .iter()
            .enumerate()
            .filter_map(|(t, tri)| {
                let points = self.triangle_points(tri)?;
                let [p0, p1, p2] = points;
                Some((t, tri, points, triangle_aabb(p0, p1, p2)))
            })
            .collect();

        let mut pairs = Vec::new();
        for (k, (i, tp, [p0, p1, p2], (min0, max0))) in candidates.iter().enumerate() {
            for (j, tq, [q0, q1, q2], (min1, max1)) in &candidates[k + 1..] {
                if tp.iter().any(|v| tq.contains(v)) {
                    continue;
                }
                if !aabb_aabb(min0, max0, min1, max1) {
                    continue;
                }
                if triangle_triangle_3d(p0, p1, p2, q0, q1, q2) {
                    pairs.push((*i, *j));
                }
            }
        }
        pairs
    }

    pub fn is_self_intersecting(&self) -> bool {
        !self.get_self_intersecting_triangles().is_empty()
    }

    /// Whether the vertex bounds of the two meshes overlap.
    pub fn is_bounding_box_intersecting(&self, other: &TriangleMesh) -> bool {
        aabb_aabb(
            &self.min_bound(),
            &self.max_bound(),
            &other.min_bound(),
            &other.max_bound(),
        )
    }

    /// Whether any triangle of `self` intersects any triangle of `other`. Triangles referring to a
    /// missing vertex are ignored.
    pub fn is_intersecting(&self, other: &TriangleMesh) -> bool {
        if !self.is_bounding_box_intersecting(other) {
            return false;
        }
        let others: Vec<_> = other
            .triangles
            .iter()
            .filter_map(|tq| other.triangle_points(tq))
            .collect();
        self.triangles
            .iter()
            .filter_map(|tp| self.triangle_points(tp))
            .any(|[p0, p1, p2]| {
                others
                    .iter()
                    .any(|[q0, q1, q2]| triangle_triangle_3d(p0, p1, p2, q0, q1, q2))
            })
    }
}
