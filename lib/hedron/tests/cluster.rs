mod common;

use common::{disjoint_pair, soup, tetrahedron};
use quickcheck_macros::quickcheck;

#[test]
fn disjoint_triangles_form_two_clusters() {
    let clusters = disjoint_pair().cluster_connected_triangles();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters.triangle_clusters, vec![0, 1]);
    assert_eq!(clusters.cluster_triangle_counts, vec![1, 1]);
    assert_eq!(clusters.cluster_areas, vec![0.5, 0.5]);
}

#[test]
fn closed_solid_is_one_cluster() {
    let mut mesh = tetrahedron();
    mesh.append(&disjoint_pair()).unwrap();
    let clusters = mesh.cluster_connected_triangles();
    assert_eq!(clusters.triangle_clusters, vec![0, 0, 0, 0, 1, 2]);
    assert_eq!(clusters.cluster_triangle_counts, vec![4, 1, 1]);
}

#[quickcheck]
fn clusters_partition_triangles(coords: Vec<(u8, u8, u8)>, tris: Vec<(u8, u8, u8)>) -> bool {
    let mesh = soup(&coords, &tris);
    let clusters = mesh.cluster_connected_triangles();
    let total_area: f64 = clusters.cluster_areas.iter().sum();
    clusters.triangle_clusters.len() == mesh.triangles().len()
        && clusters.cluster_triangle_counts.iter().sum::<usize>() == mesh.triangles().len()
        && clusters.triangle_clusters.iter().all(|c| *c < clusters.len())
        && (total_area - mesh.get_surface_area()).abs() <= 1e-9 * (1.0 + total_area)
}
