#![allow(dead_code)]

use hedron::{Point, Triangle, TriangleMesh};

/// A regular tetrahedron-ish solid with outward-facing triangles.
pub fn tetrahedron() -> TriangleMesh {
    TriangleMesh::new(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        ],
        vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
    )
    .unwrap()
}

/// A mesh built from arbitrary data.
///
/// Coordinates are snapped to a 3×3×3 lattice and triangle indices are wrapped into range, so
/// that duplicates and degenerate triangles are common.
pub fn soup(coords: &[(u8, u8, u8)], tris: &[(u8, u8, u8)]) -> TriangleMesh {
    let vertices: Vec<Point> = coords
        .iter()
        .map(|&(x, y, z)| Point::new((x % 3) as f64, (y % 3) as f64, (z % 3) as f64))
        .collect();
    let n = vertices.len();
    let triangles: Vec<Triangle> = if n == 0 {
        Vec::new()
    } else {
        tris.iter()
            .map(|&(a, b, c)| [a, b, c].map(|i| (i as usize % n) as u32))
            .collect()
    };
    TriangleMesh::new(vertices, triangles).unwrap()
}

/// Two triangles with no vertex in common.
pub fn disjoint_pair() -> TriangleMesh {
    TriangleMesh::new(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(5.0, 0.0, 0.0),
            Point::new(6.0, 0.0, 0.0),
            Point::new(5.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2], [3, 4, 5]],
    )
    .unwrap()
}
