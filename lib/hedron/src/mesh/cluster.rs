use std::collections::VecDeque;

use super::topology::edges_with_opposite;
use crate::{Real, TriangleMesh};

/// Connected components of a mesh's triangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleClusters {
    /// The cluster of each triangle, in triangle order.
    pub triangle_clusters: Vec<usize>,
    /// Number of triangles in each cluster.
    pub cluster_triangle_counts: Vec<usize>,
    /// Total area of each cluster.
    pub cluster_areas: Vec<Real>,
}

impl TriangleClusters {
    #[inline]
    pub fn len(&self) -> usize {
        self.cluster_triangle_counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cluster_triangle_counts.is_empty()
    }
}

impl TriangleMesh {
    /// Group triangles into clusters connected through shared edges.
    ///
    /// Clusters are numbered in order of their lowest triangle index. Edges to a missing vertex
    /// don't connect triangles, and triangles referring to one add no area.
    pub fn cluster_connected_triangles(&self) -> TriangleClusters {
        let edge_to_triangles = self.edge_to_triangles_map();
        let areas = self.triangle_areas();
        let mut clusters = TriangleClusters {
            triangle_clusters: vec![usize::MAX; self.triangles.len()],
            ..Default::default()
        };

        let mut queue = VecDeque::new();
        for seed in 0..self.triangles.len() {
            if clusters.triangle_clusters[seed] != usize::MAX {
                continue;
            }
            let cluster = clusters.len();
            let (mut count, mut area) = (0, 0.0);
            clusters.triangle_clusters[seed] = cluster;
            queue.push_back(seed);
            while let Some(t) = queue.pop_front() {
                count += 1;
                area += areas[t];
                for (edge, _) in edges_with_opposite(&self.triangles[t]) {
                    // a missing vertex connects nothing
                    if edge.hi() as usize >= self.vertices.len() {
                        continue;
                    }
                    for &n in &edge_to_triangles[&edge] {
                        if clusters.triangle_clusters[n] == usize::MAX {
                            clusters.triangle_clusters[n] = cluster;
                            queue.push_back(n);
                        }
                    }
                }
            }
            clusters.cluster_triangle_counts.push(count);
            clusters.cluster_areas.push(area);
        }
        tracing::debug!(clusters = clusters.len(), "clustered connected triangles");
        clusters
    }
}
