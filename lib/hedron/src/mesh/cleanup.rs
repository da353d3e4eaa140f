use std::collections::{hash_map::Entry, HashMap};

use ordered_float::OrderedFloat;

use crate::{MeshError, Triangle, TriangleMesh, VertexIndex, INVALID_INDEX};

/// How many elements each stage of [TriangleMesh::purge] removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeReport {
    pub dangling_triangles: usize,
    pub duplicated_vertices: usize,
    pub duplicated_triangles: usize,
    pub degenerate_triangles: usize,
    pub unreferenced_vertices: usize,
}

impl PurgeReport {
    pub fn vertices_removed(&self) -> usize {
        self.duplicated_vertices + self.unreferenced_vertices
    }

    pub fn triangles_removed(&self) -> usize {
        self.dangling_triangles + self.duplicated_triangles + self.degenerate_triangles
    }
}

/// Rotate `tri` so that its smallest index comes first, keeping its winding.
fn rotate_to_min(tri: &Triangle) -> Triangle {
    let [t0, t1, t2] = *tri;
    if t0 <= t1 {
        if t0 <= t2 {
            [t0, t1, t2]
        } else {
            [t2, t0, t1]
        }
    } else if t1 <= t2 {
        [t1, t2, t0]
    } else {
        [t2, t0, t1]
    }
}

fn mask_from_indices(indices: &[usize], len: usize) -> Result<Vec<bool>, MeshError> {
    let mut mask = vec![false; len];
    for &index in indices {
        match mask.get_mut(index) {
            Some(m) => *m = true,
            None => return Err(MeshError::IndexOutOfRange { index, len }),
        }
    }
    Ok(mask)
}

fn check_mask(mask: &[bool], expected: usize) -> Result<(), MeshError> {
    if mask.len() != expected {
        return Err(MeshError::MaskLength {
            expected,
            found: mask.len(),
        });
    }
    Ok(())
}

/// Keep the elements of `items` for which `keep[i]`, in order. Empty attributes stay empty.
fn compact<T: Copy>(items: &mut Vec<T>, keep: &[bool]) {
    if items.is_empty() {
        return;
    }
    let mut k = 0;
    for i in 0..items.len() {
        if keep[i] {
            items[k] = items[i];
            k += 1;
        }
    }
    items.truncate(k);
}

impl TriangleMesh {
    /// Keep the triangles (and their normals) for which `keep` holds. Returns how many were
    /// dropped. The adjacency list is rebuilt if present and anything changed.
    pub(crate) fn retain_triangles(&mut self, mut keep: impl FnMut(usize) -> bool) -> usize {
        let mask: Vec<bool> = (0..self.triangles.len()).map(&mut keep).collect();
        let before = self.triangles.len();
        compact(&mut self.triangles, &mask);
        compact(&mut self.triangle_normals, &mask);
        let removed = before - self.triangles.len();
        if removed > 0 && self.has_adjacency_list() {
            self.compute_adjacency_list();
        }
        removed
    }

    /// Keep the vertices (and their normals and colors) for which `keep[i]`, and remap triangle
    /// indices. Triangles that referred to a dropped vertex get [INVALID_INDEX] instead.
    fn retain_vertices(&mut self, keep: &[bool]) -> usize {
        let before = self.vertices.len();
        let mut old_to_new = vec![INVALID_INDEX; before];
        let mut k: VertexIndex = 0;
        for (i, slot) in old_to_new.iter_mut().enumerate() {
            if keep[i] {
                *slot = k;
                k += 1;
            }
        }
        compact(&mut self.vertices, keep);
        compact(&mut self.vertex_normals, keep);
        compact(&mut self.vertex_colors, keep);
        self.remap_triangles(&old_to_new);
        before - self.vertices.len()
    }

    fn remap_triangles(&mut self, old_to_new: &[VertexIndex]) {
        for tri in &mut self.triangles {
            *tri = tri.map(|v| old_to_new.get(v as usize).copied().unwrap_or(INVALID_INDEX));
        }
    }

    /// Merge vertices with exactly equal coordinates. The first occurrence survives and later
    /// ones are redirected to it.
    ///
    /// Returns the number of vertices removed.
    pub fn remove_duplicated_vertices(&mut self) -> usize {
        let mut first_seen: HashMap<[OrderedFloat<f64>; 3], VertexIndex> = HashMap::new();
        let mut old_to_new = vec![INVALID_INDEX; self.vertices.len()];
        let mut keep = vec![false; self.vertices.len()];
        let mut k: VertexIndex = 0;
        for (i, v) in self.vertices.iter().enumerate() {
            let key = [OrderedFloat(v.x), OrderedFloat(v.y), OrderedFloat(v.z)];
            match first_seen.entry(key) {
                Entry::Occupied(first) => old_to_new[i] = old_to_new[*first.get() as usize],
                Entry::Vacant(slot) => {
                    slot.insert(i as VertexIndex);
                    old_to_new[i] = k;
                    keep[i] = true;
                    k += 1;
                }
            }
        }

        let before = self.vertices.len();
        compact(&mut self.vertices, &keep);
        compact(&mut self.vertex_normals, &keep);
        compact(&mut self.vertex_colors, &keep);
        let removed = before - self.vertices.len();
        if removed > 0 {
            self.remap_triangles(&old_to_new);
            if self.adjacency_list.len() == before {
                self.compute_adjacency_list();
            }
        }
        tracing::debug!(removed, "removed duplicated vertices");
        removed
    }

    /// Drop triangles that repeat an earlier triangle up to rotation. A triangle with reversed
    /// winding is not a duplicate.
    ///
    /// Returns the number of triangles removed.
    pub fn remove_duplicated_triangles(&mut self) -> usize {
        let mut seen: HashMap<Triangle, usize> = HashMap::new();
        let keep: Vec<bool> = self
            .triangles
            .iter()
            .enumerate()
            .map(|(t, tri)| match seen.entry(rotate_to_min(tri)) {
                Entry::Occupied(_) => false,
                Entry::Vacant(slot) => {
                    slot.insert(t);
                    true
                }
            })
            .collect();
        let removed = self.retain_triangles(|t| keep[t]);
        tracing::debug!(removed, "removed duplicated triangles");
        removed
    }

    /// Drop triangles that use the same vertex more than once.
    ///
    /// Returns the number of triangles removed.
    pub fn remove_degenerate_triangles(&mut self) -> usize {
        let keep: Vec<bool> = self
            .triangles
            .iter()
            .map(|&[a, b, c]| a != b && b != c && c != a)
            .collect();
        let removed = self.retain_triangles(|t| keep[t]);
        tracing::debug!(removed, "removed degenerate triangles");
        removed
    }

    /// Alias of [Self::remove_degenerate_triangles].
    pub fn remove_non_manifold_triangles(&mut self) -> usize {
        self.remove_degenerate_triangles()
    }

    /// Drop vertices that no triangle refers to.
    ///
    /// Returns the number of vertices removed.
    pub fn remove_unreferenced_vertices(&mut self) -> usize {
        let mut referenced = vec![false; self.vertices.len()];
        for v in self.triangles.iter().flatten() {
            if let Some(r) = referenced.get_mut(*v as usize) {
                *r = true;
            }
        }
        let had_adjacency = self.has_adjacency_list();
        let removed = self.retain_vertices(&referenced);
        if removed > 0 {
            if had_adjacency {
                self.compute_adjacency_list();
            } else {
                self.adjacency_list.clear();
            }
        }
        tracing::debug!(removed, "removed unreferenced vertices");
        removed
    }

    /// Alias of [Self::remove_unreferenced_vertices].
    pub fn remove_non_manifold_vertices(&mut self) -> usize {
        self.remove_unreferenced_vertices()
    }

    /// Drop triangles that refer to a vertex that doesn't exist, such as those left behind by
    /// [Self::remove_vertices_by_mask].
    ///
    /// Returns the number of triangles removed.
    pub fn remove_dangling_triangles(&mut self) -> usize {
        let n = self.vertices.len();
        let keep: Vec<bool> = self
            .triangles
            .iter()
            .map(|tri| tri.iter().all(|v| (*v as usize) < n))
            .collect();
        let removed = self.retain_triangles(|t| keep[t]);
        tracing::debug!(removed, "removed dangling triangles");
        removed
    }

    /// Run every cleanup pass, in order: dangling triangles, duplicated vertices, duplicated
    /// triangles, degenerate triangles, then unreferenced vertices.
    ///
    /// Afterwards every triangle refers to three distinct, existing vertices.
    #[tracing::instrument(
        skip(self),
        fields(vertices = self.vertices.len(), triangles = self.triangles.len())
    )]
    pub fn purge(&mut self) -> PurgeReport {
        let report = PurgeReport {
            dangling_triangles: self.remove_dangling_triangles(),
            duplicated_vertices: self.remove_duplicated_vertices(),
            duplicated_triangles: self.remove_duplicated_triangles(),
            degenerate_triangles: self.remove_degenerate_triangles(),
            unreferenced_vertices: self.remove_unreferenced_vertices(),
        };
        tracing::debug!(
            vertices_removed = report.vertices_removed(),
            triangles_removed = report.triangles_removed(),
            "purged mesh"
        );
        report
    }

    /// Remove the triangles at `indices`. Repeated indices are allowed.
    ///
    /// # Errors
    ///
    /// * [MeshError::IndexOutOfRange] if any index is past the end; nothing is removed then.
    pub fn remove_triangles_by_index(&mut self, indices: &[usize]) -> Result<usize, MeshError> {
        let mask = mask_from_indices(indices, self.triangles.len())?;
        self.remove_triangles_by_mask(&mask)
    }

    /// Remove every triangle `t` for which `mask[t]`.
    ///
    /// # Errors
    ///
    /// * [MeshError::MaskLength] if the mask isn't one entry per triangle.
    pub fn remove_triangles_by_mask(&mut self, mask: &[bool]) -> Result<usize, MeshError> {
        check_mask(mask, self.triangles.len())?;
        let removed = self.retain_triangles(|t| !mask[t]);
        tracing::debug!(removed, "removed triangles");
        Ok(removed)
    }

    /// Remove the vertices at `indices`. Repeated indices are allowed.
    ///
    /// See [Self::remove_vertices_by_mask].
    pub fn remove_vertices_by_index(&mut self, indices: &[usize]) -> Result<usize, MeshError> {
        let mask = mask_from_indices(indices, self.vertices.len())?;
        self.remove_vertices_by_mask(&mask)
    }

    /// Remove every vertex `v` for which `mask[v]`.
    ///
    /// Triangles are kept; any reference to a removed vertex becomes [INVALID_INDEX] until
    /// [Self::remove_dangling_triangles] (or [Self::purge]) drops them. The adjacency list is
    /// cleared.
    ///
    /// # Errors
    ///
    /// * [MeshError::MaskLength] if the mask isn't one entry per vertex.
    pub fn remove_vertices_by_mask(&mut self, mask: &[bool]) -> Result<usize, MeshError> {
        check_mask(mask, self.vertices.len())?;
        let keep: Vec<bool> = mask.iter().map(|m| !m).collect();
        let removed = self.retain_vertices(&keep);
        self.adjacency_list.clear();
        tracing::debug!(removed, "removed vertices");
        Ok(removed)
    }
}
