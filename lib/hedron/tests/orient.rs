mod common;

use common::tetrahedron;
use hedron::{Point, TriangleMesh, Vector};

#[test]
fn flipped_face_is_restored() {
    let expected = tetrahedron();
    let mut triangles = expected.triangles().to_vec();
    triangles[3] = [2, 1, 3];
    let mut mesh = TriangleMesh::new(expected.vertices().to_vec(), triangles).unwrap();
    mesh.compute_triangle_normals(true);
    let flipped_normal = mesh.triangle_normals()[3];

    assert!(mesh.is_orientable());
    assert!(mesh.orient_triangles());
    assert_eq!(mesh.triangles(), expected.triangles());
    assert_eq!(mesh.triangle_normals()[3], -flipped_normal);
}

#[test]
fn non_manifold_mesh_is_left_alone() {
    let mut mesh = TriangleMesh::new(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
            Point::new(0.0, -1.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 1, 3], [1, 0, 4]],
    )
    .unwrap();
    let before = mesh.clone();
    assert!(!mesh.orient_triangles());
    assert_eq!(mesh, before);
}

#[test]
fn open_strip_can_be_oriented() {
    let mut mesh = TriangleMesh::new(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 3, 2]],
    )
    .unwrap();
    assert!(mesh.orient_triangles());
    assert_eq!(mesh.triangles(), &[[0, 1, 2], [3, 0, 2]]);
    mesh.compute_triangle_normals(true);
    assert!(mesh.triangle_normals().iter().all(|n| *n == Vector::z()));
}
