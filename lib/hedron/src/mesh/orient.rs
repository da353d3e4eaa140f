use std::collections::{HashMap, VecDeque};

use super::topology::{edges_with_opposite, Edge};
use crate::{Triangle, TriangleMesh, VertexIndex};

/// Propagate a consistent winding across `triangles`, breadth-first through shared edges.
///
/// Each component is seeded from its lowest-indexed triangle, whose winding is kept. Returns the
/// indices of the triangles that had to be flipped, or `None` if no consistent winding exists.
fn propagate_orientation(triangles: &mut [Triangle]) -> Option<Vec<usize>> {
    let mut adjacent: HashMap<Edge, Vec<usize>> = HashMap::new();
    for (t, tri) in triangles.iter().enumerate() {
        for (edge, _) in edges_with_opposite(tri) {
            adjacent.entry(edge).or_default().push(t);
        }
    }

    // the direction in which each edge has been traversed so far
    let mut directed: HashMap<Edge, (VertexIndex, VertexIndex)> = HashMap::new();
    let mut visited = vec![false; triangles.len()];
    let mut flipped = Vec::new();
    let mut queue = VecDeque::new();

    for seed in 0..triangles.len() {
        if visited[seed] {
            continue;
        }
        queue.push_back(seed);
        while let Some(t) = queue.pop_front() {
            if visited[t] {
                continue;
            }
            visited[t] = true;

            let [a, b, c] = triangles[t];
            let same_direction = [(a, b), (b, c), (c, a)]
                .into_iter()
                .any(|(u, v)| directed.get(&Edge::new(u, v)).is_some_and(|d| d.0 == u));
            if same_direction {
                triangles[t].swap(0, 1);
                flipped.push(t);
            }

            let [a, b, c] = triangles[t];
            for (u, v) in [(a, b), (b, c), (c, a)] {
                let edge = Edge::new(u, v);
                match directed.get(&edge) {
                    Some(d) if d.0 == u => return None,
                    Some(_) => (),
                    None => {
                        directed.insert(edge, (u, v));
                    }
                }
                queue.extend(adjacent[&edge].iter().copied().filter(|n| !visited[*n]));
            }
        }
    }
    Some(flipped)
}

impl TriangleMesh {
    /// Whether the triangles can be wound consistently, so that every interior edge is
    /// traversed in opposite directions by its two triangles. The mesh is not modified.
    pub fn is_orientable(&self) -> bool {
        let mut scratch = self.triangles.clone();
        propagate_orientation(&mut scratch).is_some()
    }

    /// Flip triangles as needed so that the whole mesh is wound consistently.
    ///
    /// Returns false, leaving the mesh untouched, if it is not edge-manifold (boundary edges
    /// allowed) or cannot be oriented. Triangle normals of flipped triangles are negated.
    pub fn orient_triangles(&mut self) -> bool {
        if !self.is_edge_manifold(true) {
            return false;
        }
        let mut scratch = self.triangles.clone();
        let Some(flipped) = propagate_orientation(&mut scratch) else {
            return false;
        };
        self.triangles = scratch;
        if self.has_triangle_normals() {
            for t in &flipped {
                self.triangle_normals[*t] = -self.triangle_normals[*t];
            }
        }
        tracing::debug!(flipped = flipped.len(), "oriented triangles");
        true
    }
}
