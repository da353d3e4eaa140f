use std::collections::{HashMap, HashSet, VecDeque};

use crate::{TriangleMesh, VertexIndex};

/// An undirected edge between two vertices, stored as `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge(VertexIndex, VertexIndex);

impl Edge {
    #[inline]
    pub fn new(a: VertexIndex, b: VertexIndex) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// The smaller vertex index.
    #[inline]
    pub fn lo(self) -> VertexIndex {
        self.0
    }

    /// The larger vertex index.
    #[inline]
    pub fn hi(self) -> VertexIndex {
        self.1
    }
}

impl From<(VertexIndex, VertexIndex)> for Edge {
    fn from((a, b): (VertexIndex, VertexIndex)) -> Self {
        Self::new(a, b)
    }
}

/// The three edges of `tri`, each with the vertex opposite it.
#[inline]
pub(crate) fn edges_with_opposite(tri: &[VertexIndex; 3]) -> [(Edge, VertexIndex); 3] {
    [
        (Edge::new(tri[0], tri[1]), tri[2]),
        (Edge::new(tri[1], tri[2]), tri[0]),
        (Edge::new(tri[2], tri[0]), tri[1]),
    ]
}

impl TriangleMesh {
    /// How many triangles use each edge.
    pub fn edge_triangle_count(&self) -> HashMap<Edge, usize> {
        let mut counts = HashMap::new();
        for tri in &self.triangles {
            for (edge, _) in edges_with_opposite(tri) {
                *counts.entry(edge).or_insert(0) += 1;
            }
        }
        counts
    }

    /// The indices of the triangles using each edge, in ascending order.
    pub fn edge_to_triangles_map(&self) -> HashMap<Edge, Vec<usize>> {
        let mut map: HashMap<Edge, Vec<usize>> = HashMap::new();
        for (t, tri) in self.triangles.iter().enumerate() {
            for (edge, _) in edges_with_opposite(tri) {
                map.entry(edge).or_default().push(t);
            }
        }
        map
    }

    /// For each edge, the vertices opposite it in the triangles using it, in triangle order.
    pub fn edge_to_vertices_map(&self) -> HashMap<Edge, Vec<VertexIndex>> {
        let mut map: HashMap<Edge, Vec<VertexIndex>> = HashMap::new();
        for tri in &self.triangles {
            for (edge, opposite) in edges_with_opposite(tri) {
                map.entry(edge).or_default().push(opposite);
            }
        }
        map
    }

    /// Whether every edge is used by exactly two triangles, or by one or two if
    /// `allow_boundary_edges`.
    pub fn is_edge_manifold(&self, allow_boundary_edges: bool) -> bool {
        self.edge_triangle_count()
            .values()
            .all(|&n| edge_is_manifold(n, allow_boundary_edges))
    }

    /// Every edge that breaks [Self::is_edge_manifold], sorted.
    pub fn get_non_manifold_edges(&self, allow_boundary_edges: bool) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .edge_triangle_count()
            .into_iter()
            .filter(|(_, n)| !edge_is_manifold(*n, allow_boundary_edges))
            .map(|(edge, _)| edge)
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Vertices whose surrounding triangles don't form a single edge-connected fan, sorted.
    ///
    /// For each vertex, the edges opposite it in its triangles form its link; the vertex is
    /// manifold if the link is connected.
    pub fn get_non_manifold_vertices(&self) -> Vec<VertexIndex> {
        let mut vert_to_triangles: Vec<Vec<usize>> = vec![Vec::new(); self.vertices.len()];
        for (t, tri) in self.triangles.iter().enumerate() {
            for v in tri {
                if let Some(list) = vert_to_triangles.get_mut(*v as usize) {
                    if list.last() != Some(&t) {
                        list.push(t);
                    }
                }
            }
        }

        let mut non_manifold = Vec::new();
        for (v, triangles) in vert_to_triangles.iter().enumerate() {
            let v = v as VertexIndex;
            let mut link: HashMap<VertexIndex, HashSet<VertexIndex>> = HashMap::new();
            for tri in triangles.iter().map(|t| &self.triangles[*t]) {
                for (a, b) in [(tri[0], tri[1]), (tri[0], tri[2]), (tri[1], tri[2])] {
                    if a != v && b != v {
                        link.entry(a).or_default().insert(b);
                        link.entry(b).or_default().insert(a);
                    }
                }
            }
            let Some(&start) = link.keys().next() else {
                continue;
            };

            let mut visited = HashSet::from([start]);
            let mut queue = VecDeque::from([start]);
            while let Some(a) = queue.pop_front() {
                for b in &link[&a] {
                    if visited.insert(*b) {
                        queue.push_back(*b);
                    }
                }
            }
            if visited.len() != link.len() {
                non_manifold.push(v);
            }
        }
        non_manifold
    }

    pub fn is_vertex_manifold(&self) -> bool {
        self.get_non_manifold_vertices().is_empty()
    }

    /// Closed, manifold and free of self-intersections.
    pub fn is_watertight(&self) -> bool {
        self.is_edge_manifold(false) && self.is_vertex_manifold() && !self.is_self_intersecting()
    }

    /// `V + F - E`, counting each undirected edge once.
    pub fn euler_poincare_characteristic(&self) -> i64 {
        let v = self.vertices.len() as i64;
        let f = self.triangles.len() as i64;
        let e = self.edge_triangle_count().len() as i64;
        v + f - e
    }

    /// Make every edge manifold by deleting, for each edge used by more than two triangles, its
    /// smallest triangles until two are left. Ties go to the lower triangle index.
    ///
    /// Returns the number of triangles removed.
    pub fn remove_non_manifold_edges(&mut self) -> usize {
        let areas = self.triangle_areas();
        let mut edges: Vec<(Edge, Vec<usize>)> = self
            .edge_to_triangles_map()
            .into_iter()
            .filter(|(_, ts)| ts.len() > 2)
            .collect();
        edges.sort_unstable_by_key(|(edge, _)| *edge);

        let mut removed = vec![false; self.triangles.len()];
        for (_, mut triangles) in edges {
            triangles.retain(|t| !removed[*t]);
            // triangle indices are ascending, so a stable sort keeps the lower index first on ties
            triangles.sort_by(|a, b| areas[*a].total_cmp(&areas[*b]));
            let excess = triangles.len().saturating_sub(2);
            for t in &triangles[..excess] {
                removed[*t] = true;
            }
        }

        let count = self.retain_triangles(|t| !removed[t]);
        tracing::debug!(removed = count, "removed non-manifold edges");
        count
    }
}

#[inline]
fn edge_is_manifold(n: usize, allow_boundary_edges: bool) -> bool {
    if allow_boundary_edges {
        (1..=2).contains(&n)
    } else {
        n == 2
    }
}
