use clap::Parser;
use nalgebra::vector;
use octomesh::{
    mesh::{MeshError, Point, TriangleMesh},
    spatial::{Color, WorldPoint},
    Octree,
};

mod cli;

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)]
    Tree(#[from] octomesh::Error<u32>),
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// `n` points spread evenly over a sphere, colored by their normal.
fn fibonacci_sphere(n: usize, center: WorldPoint, radius: f64) -> (Vec<WorldPoint>, Vec<Color>) {
    let golden = std::f64::consts::PI * (3.0 - 5f64.sqrt());
    (0..n)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
            let r = (1.0 - y * y).sqrt();
            let theta = golden * i as f64;
            let normal = vector![r * theta.cos(), y, r * theta.sin()];
            (center + normal * radius, normal.map(|c| (c + 1.0) / 2.0))
        })
        .unzip()
}

/// Two copies of a tetrahedron sharing their vertices by position only, plus some debris.
fn tetrahedron_soup() -> Result<TriangleMesh, MeshError> {
    let tetrahedron = TriangleMesh::new(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
            Point::new(4.0, 4.0, 4.0),
        ],
        vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3], [1, 1, 2]],
    )?;
    let mut soup = tetrahedron.clone();
    soup.append(&tetrahedron)?;
    Ok(soup)
}

fn run(cli: &cli::Cli) -> Result<(), Error> {
    let (points, colors) = fibonacci_sphere(cli.points, cli.center.into(), cli.radius);
    let mut tree = Octree::<Color>::with_max_depth(cli.max_depth);
    let inserted = tree.convert_from_point_cloud(&points, &colors, true, cli.size_expand)?;
    tracing::info!(
        inserted,
        nodes = tree.node_count(),
        leaves = tree.leaf_count(),
        origin = ?tree.origin(),
        size = tree.size(),
        "built octree"
    );
    if cli.print_tree {
        println!("{tree}");
    }

    let grid = tree.to_voxel_grid();
    let rebuilt = Octree::<Color>::from_voxel_grid(&grid, cli.max_depth)?;
    tracing::info!(
        voxels = grid.len(),
        voxel_size = grid.voxel_size,
        rebuilt_leaves = rebuilt.leaf_count(),
        "round-tripped through a voxel grid"
    );

    let mut mesh = tetrahedron_soup()?;
    let report = mesh.purge();
    let clusters = mesh.cluster_connected_triangles();
    tracing::info!(
        ?report,
        vertices = mesh.vertices().len(),
        triangles = mesh.triangles().len(),
        watertight = mesh.is_watertight(),
        euler = mesh.euler_poincare_characteristic(),
        clusters = clusters.len(),
        "purged triangle soup"
    );
    Ok(())
}

fn main() -> Result<(), Error> {
    let cli = cli::Cli::parse();
    cli::initialize_tracing(&cli.log_filter, cli.log_format);
    run(&cli).inspect_err(|e| tracing::error!("{e}"))
}
