mod common;

use common::{soup, tetrahedron};
use hedron::{Edge, MeshError, Point, TriangleMesh, Vector};
use nalgebra::Vector4;
use quickcheck_macros::quickcheck;

/// Three triangles hinged on the edge 0-1.
fn fin() -> TriangleMesh {
    TriangleMesh::new(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
            Point::new(0.0, -2.0, -2.0),
        ],
        vec![[0, 1, 2], [1, 0, 3], [0, 1, 4]],
    )
    .unwrap()
}

#[test]
fn construction_is_validated() {
    assert_eq!(
        TriangleMesh::new(vec![Point::origin()], vec![[0, 0, 1]]),
        Err(MeshError::VertexOutOfRange {
            triangle: 0,
            vertex: 1,
            vertices: 1
        })
    );
    let mut mesh = tetrahedron();
    assert!(matches!(
        mesh.set_vertex_colors(vec![Vector::zeros(); 3]),
        Err(MeshError::AttributeLength { expected: 4, .. })
    ));
    assert!(!mesh.has_vertex_colors());
}

#[test]
fn tetrahedron_is_watertight() {
    let mesh = tetrahedron();
    assert!(mesh.is_edge_manifold(false));
    assert!(mesh.is_vertex_manifold());
    assert!(!mesh.is_self_intersecting());
    assert!(mesh.is_watertight());
    assert!(mesh.is_orientable());
    assert_eq!(mesh.euler_poincare_characteristic(), 2);
}

#[test]
fn open_mesh_is_not_watertight() {
    let mut mesh = tetrahedron();
    mesh.remove_triangles_by_index(&[3]).unwrap();
    assert!(!mesh.is_edge_manifold(false));
    assert!(mesh.is_edge_manifold(true));
    assert!(!mesh.is_watertight());
    assert_eq!(
        mesh.get_non_manifold_edges(false),
        vec![Edge::new(1, 2), Edge::new(1, 3), Edge::new(2, 3)]
    );
    assert!(mesh.get_non_manifold_edges(true).is_empty());
}

#[test]
fn fin_edge_is_non_manifold() {
    let mesh = fin();
    assert_eq!(mesh.edge_triangle_count()[&Edge::new(0, 1)], 3);
    assert_eq!(mesh.edge_to_triangles_map()[&Edge::new(1, 0)], vec![0, 1, 2]);
    assert_eq!(mesh.edge_to_vertices_map()[&Edge::new(0, 1)], vec![2, 3, 4]);
    assert!(mesh.get_non_manifold_edges(false).contains(&Edge::new(0, 1)));
    assert_eq!(mesh.get_non_manifold_edges(true), vec![Edge::new(0, 1)]);
    assert!(!mesh.is_edge_manifold(true));
}

#[test]
fn remove_non_manifold_edges_keeps_largest() {
    let mut mesh = fin();
    mesh.compute_triangle_normals(false);
    // areas are 0.5, 0.5 and √2
    assert_eq!(mesh.remove_non_manifold_edges(), 1);
    assert_eq!(mesh.triangles(), &[[1, 0, 3], [0, 1, 4]]);
    assert_eq!(mesh.triangle_normals().len(), 2);
    assert!(mesh.is_edge_manifold(true));
    assert_eq!(mesh.remove_non_manifold_edges(), 0);
}

#[test]
fn bowtie_vertex_is_non_manifold() {
    let mesh = TriangleMesh::new(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(-1.0, 0.0, 0.0),
            Point::new(-1.0, -1.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 3, 4]],
    )
    .unwrap();
    assert!(mesh.is_edge_manifold(true));
    assert_eq!(mesh.get_non_manifold_vertices(), vec![0]);
    assert!(!mesh.is_vertex_manifold());
}

#[test]
fn adjacency_list_is_undirected() {
    let mut mesh = tetrahedron();
    assert!(!mesh.has_adjacency_list());
    mesh.compute_adjacency_list();
    assert!(mesh.has_adjacency_list());
    for (v, neighbors) in mesh.adjacency_list().iter().enumerate() {
        assert_eq!(neighbors.len(), 3);
        assert!(!neighbors.contains(&(v as u32)));
        for n in neighbors {
            assert!(mesh.adjacency_list()[*n as usize].contains(&(v as u32)));
        }
    }
}

#[test]
fn areas_and_planes() {
    let mesh = TriangleMesh::new(
        vec![
            Point::new(0.0, 0.0, 2.0),
            Point::new(1.0, 0.0, 2.0),
            Point::new(0.0, 1.0, 2.0),
            Point::new(2.0, 0.0, 2.0),
        ],
        vec![[0, 1, 2], [0, 1, 3]],
    )
    .unwrap();
    assert_eq!(mesh.get_triangle_area(0), 0.5);
    assert_eq!(mesh.get_triangle_area(1), 0.0);
    assert_eq!(mesh.get_surface_area(), 0.5);
    assert_eq!(mesh.get_triangle_plane(0), Vector4::new(0.0, 0.0, 1.0, -2.0));
    assert_eq!(mesh.get_triangle_plane(1), Vector4::zeros());
}

#[test]
fn vertex_normals_are_area_weighted() {
    let mut mesh = TriangleMesh::new(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 2, 3]],
    )
    .unwrap();
    mesh.compute_vertex_normals(false);
    assert_eq!(mesh.vertex_normals()[0], Vector::new(0.0, 0.0, 2.0));
    assert_eq!(mesh.vertex_normals()[1], Vector::new(0.0, 0.0, 1.0));
    mesh.normalize_normals();
    assert!(mesh.vertex_normals().iter().all(|n| *n == Vector::z()));
    assert!(mesh.triangle_normals().iter().all(|n| *n == Vector::z()));
}

#[test]
fn bounds_and_append() {
    let mut mesh = TriangleMesh::default();
    assert_eq!(mesh.min_bound(), Point::origin());

    let mut other = tetrahedron();
    other.set_vertex_colors(vec![Vector::x(); 4]).unwrap();
    mesh.append(&other).unwrap();
    // an empty receiver takes on the other's attributes
    assert!(mesh.has_vertex_colors());

    mesh.append(&tetrahedron()).unwrap();
    assert_eq!(mesh.vertices().len(), 8);
    assert_eq!(mesh.triangles()[4], [4, 6, 5]);
    assert!(!mesh.has_vertex_colors());
    assert_eq!(mesh.min_bound(), Point::new(0.0, 0.0, 0.0));
    assert_eq!(mesh.max_bound(), Point::new(1.0, 1.0, 1.0));

    mesh.clear();
    assert!(mesh.is_empty());
}

#[quickcheck]
fn edge_counts_sum_to_three_per_triangle(
    coords: Vec<(u8, u8, u8)>,
    tris: Vec<(u8, u8, u8)>,
) -> bool {
    let mesh = soup(&coords, &tris);
    mesh.edge_triangle_count().values().sum::<usize>() == 3 * mesh.triangles().len()
}
