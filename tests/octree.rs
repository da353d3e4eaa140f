use nalgebra::{point, vector};
use octomesh::{
    spatial::{Color, WorldPoint},
    Error, NodeData, NodeDataMut, Octant, Octree, DEFAULT_SIZE_EXPAND,
};
use quickcheck_macros::quickcheck;

/// Map arbitrary bytes into `[0, 16)`.
fn to_point(&(x, y, z): &(u8, u8, u8)) -> WorldPoint {
    point![x as f64 / 16.0, y as f64 / 16.0, z as f64 / 16.0]
}

fn to_color(&(x, y, z): &(u8, u8, u8)) -> Color {
    vector![x as f64 / 255.0, y as f64 / 255.0, z as f64 / 255.0]
}

fn build(points: &[(u8, u8, u8)], max_depth: usize) -> Octree {
    let mut tree = Octree::<Color>::new(max_depth, WorldPoint::origin(), 16.0);
    for p in points {
        assert_eq!(tree.insert_point(&to_point(p), to_color(p)), Ok(true));
    }
    tree
}

/// Ensure that Octrees can compile with any unsigned index type with width <= `size_of::`<usize>
#[test]
#[allow(clippy::just_underscores_and_digits)]
fn tree_index() {
    let _8 = Octree::<(), u8>::with_max_depth(3);
    let _16 = Octree::<(), u16>::with_max_depth(3);
    #[cfg(not(target_pointer_width = "16"))]
    {
        // size_of::<usize>() > 16
        let _32 = Octree::<(), u32>::with_max_depth(3);
        #[cfg(not(target_pointer_width = "32"))]
        {
            // size_of::<usize>() > 32
            let _64 = Octree::<(), u64>::with_max_depth(3);
        }
    }
    let _size = Octree::<(), usize>::with_max_depth(3);
}

#[test]
fn small_index_overflows() {
    let mut tree = Octree::<(), u8>::new(8, WorldPoint::origin(), 256.0);
    let result = (0..256)
        .map(|i| point![(i % 16) as f64 * 16.0, (i / 16) as f64 * 16.0, 0.5])
        .try_for_each(|p| tree.insert_point(&p, ()).map(|_| ()));
    assert!(matches!(result, Err(Error::IndexOverflow(256))));
}

#[test]
fn octant_layout() {
    assert_eq!(Octant::new(true, false, false), Octant(1));
    assert_eq!(Octant::new(false, true, false), Octant(2));
    assert_eq!(Octant::new(false, false, true), Octant(4));
    let o = Octant(6);
    assert_eq!((o.x(), o.y(), o.z()), (0, 1, 1));
}

#[test]
fn unbounded_tree_drops_everything() {
    let mut tree = Octree::<Color>::with_max_depth(2);
    assert_eq!(tree.insert_point(&WorldPoint::origin(), Color::zeros()), Ok(false));
    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 0);
}

#[test]
fn upper_face_is_outside() {
    let mut tree = build(&[(1, 2, 3)], 3);
    let count = tree.node_count();
    for p in [point![16.0, 1.0, 1.0], point![1.0, -0.5, 1.0], point![1.0, 1.0, 16.0]] {
        assert_eq!(tree.insert_point(&p, Color::zeros()), Ok(false));
    }
    assert_eq!(tree.node_count(), count);
    assert!(tree.locate_leaf_node(&point![16.0, 1.0, 1.0]).is_none());
}

#[test]
fn depth_zero_root_is_a_leaf() {
    let mut tree = Octree::<Color>::new(0, WorldPoint::origin(), 1.0);
    tree.insert_point(&point![0.1, 0.1, 0.1], Color::x()).unwrap();
    tree.insert_point(&point![0.9, 0.9, 0.9], Color::y()).unwrap();
    assert_eq!(tree.node_count(), 1);
    let root = tree.root().unwrap();
    assert!(matches!(tree.node(root), Some(NodeData::Leaf(c)) if *c == Color::y()));
}

#[test]
fn last_write_wins() {
    let mut tree = Octree::<Color>::new(2, WorldPoint::origin(), 4.0);
    tree.insert_point(&point![0.2, 0.2, 0.2], Color::x()).unwrap();
    tree.insert_point(&point![0.7, 0.7, 0.7], Color::z()).unwrap();
    let (color, info) = tree.locate_leaf_node(&point![0.5, 0.5, 0.5]).unwrap();
    assert_eq!(*color, Color::z());
    assert_eq!(info.depth, 2);
    assert_eq!(info.size(), 1.0);
    assert_eq!(tree.leaf_count(), 1);
}

#[test]
fn insert_with_accumulates() {
    let mut tree = Octree::<usize>::new(1, WorldPoint::origin(), 2.0);
    for p in [point![0.1, 0.1, 0.1], point![0.5, 0.5, 0.5], point![1.5, 0.5, 0.5]] {
        tree.insert_point_with(&p, || 0, |n| *n += 1).unwrap();
    }
    assert_eq!(tree.locate_leaf_node(&point![0.9, 0.9, 0.9]).map(|(n, _)| *n), Some(2));
    let (n, info) = tree.locate_leaf_node(&point![1.0, 0.0, 0.0]).unwrap();
    assert_eq!((*n, info.child_index), (1, Octant(1)));
}

#[test]
fn traversal_is_pre_order() {
    let mut tree = Octree::<Color>::new(1, WorldPoint::origin(), 2.0);
    tree.insert_point(&point![1.5, 1.5, 1.5], Color::x()).unwrap();
    tree.insert_point(&point![0.5, 0.5, 0.5], Color::y()).unwrap();
    tree.insert_point(&point![1.5, 0.5, 0.5], Color::z()).unwrap();

    let mut visited = Vec::new();
    tree.traverse(|_, data, info| visited.push((data.is_leaf(), info.child_index.0, info.depth)));
    assert_eq!(visited, vec![(false, 0, 0), (true, 0, 1), (true, 1, 1), (true, 7, 1)]);

    tree.traverse_mut(|_, data, info| {
        if let NodeDataMut::Leaf(color) = data {
            *color = Color::repeat(info.child_index.0 as f64);
        }
    });
    let leaves: Vec<Color> = tree.leaves().map(|(c, _)| *c).collect();
    assert_eq!(leaves, vec![Color::repeat(0.0), Color::repeat(1.0), Color::repeat(7.0)]);
}

#[test]
fn point_cloud_bounds_are_fitted() {
    let mut tree = Octree::<Color>::with_max_depth(3);
    let points = [point![0.0, 0.0, 0.0], point![2.0, 1.0, 1.0]];
    let colors = [Color::x(), Color::y()];
    assert_eq!(tree.convert_from_point_cloud(&points, &colors, true, 0.5), Ok(2));
    assert_eq!(tree.origin(), point![-0.5, -1.0, -1.0]);
    assert_eq!(tree.size(), 3.0);
    assert_eq!(tree.max_bound(), point![2.5, 2.0, 2.0]);
    assert_eq!(tree.locate_leaf_node(&points[1]).map(|(c, _)| *c), Some(Color::y()));

    let same = [point![1.0, 1.0, 1.0]; 3];
    assert_eq!(
        tree.convert_from_point_cloud(&same, &colors.repeat(2)[..3], true, DEFAULT_SIZE_EXPAND),
        Ok(3)
    );
    assert_eq!(tree.size(), DEFAULT_SIZE_EXPAND);
    assert_eq!(tree.leaf_count(), 1);
}

#[test]
fn point_cloud_validation() {
    let mut tree = build(&[(1, 1, 1), (200, 3, 40)], 4);
    let before = tree.clone();
    let points = [point![0.0, 0.0, 0.0]];

    assert!(matches!(
        tree.convert_from_point_cloud(&points, &[Color::x()], true, 1.5),
        Err(Error::InvalidSizeExpand(_))
    ));
    assert!(matches!(
        tree.convert_from_point_cloud(&points, &[], true, 0.1),
        Err(Error::ColorCountMismatch { points: 1, colors: 0 })
    ));
    assert_eq!(tree, before);

    let mut unbounded = Octree::<Color>::with_max_depth(4);
    assert!(matches!(
        unbounded.convert_from_point_cloud(&points, &[Color::x()], false, 0.1),
        Err(Error::Unbounded(_))
    ));
}

#[test]
fn clear_and_display() {
    let mut tree = build(&[(1, 1, 1), (200, 3, 40), (17, 99, 250)], 3);
    let text = tree.to_string();
    assert_eq!(text.matches("<L").count(), tree.leaf_count());
    assert_eq!(text.matches("<B").count(), tree.node_count() - tree.leaf_count());

    tree.clear(false);
    assert!(tree.is_empty());
    assert_eq!(tree.size(), 16.0);
    tree.clear(true);
    assert_eq!(tree.size(), 0.0);
}

#[quickcheck]
fn inserted_points_are_located(points: Vec<(u8, u8, u8)>) -> bool {
    let tree = build(&points, 4);
    points.iter().all(|p| {
        let p = to_point(p);
        tree.locate_leaf_node(&p)
            .is_some_and(|(_, info)| info.contains(&p) && info.depth == 4)
    })
}

#[quickcheck]
fn leaves_sit_at_max_depth(points: Vec<(u8, u8, u8)>) -> bool {
    let tree = build(&points, 3);
    tree.iter().all(|(_, data, info)| data.is_leaf() == (info.depth == 3))
        && tree.leaves().count() == tree.leaf_count()
}

#[quickcheck]
fn copy_is_equal_and_independent(points: Vec<(u8, u8, u8)>) -> bool {
    if points.is_empty() {
        return build(&points, 3).clone() == build(&points, 3);
    }
    let tree = build(&points, 3);
    let mut copy = tree.clone();
    if copy != tree {
        return false;
    }
    let p = to_point(&points[0]);
    if let Some((color, _)) = copy.locate_leaf_node_mut(&p) {
        *color += Color::repeat(1.0);
    }
    copy != tree && tree.locate_leaf_node(&p).map(|(c, _)| *c) != copy.locate_leaf_node(&p).map(|(c, _)| *c)
}

#[quickcheck]
fn equality_ignores_arena_layout(points: Vec<(u8, u8, u8)>) -> bool {
    let mut forward = Octree::<Color>::new(3, WorldPoint::origin(), 16.0);
    let mut backward = Octree::<Color>::new(3, WorldPoint::origin(), 16.0);
    for p in &points {
        forward.insert_point(&to_point(p), Color::x()).unwrap();
    }
    for p in points.iter().rev() {
        backward.insert_point(&to_point(p), Color::x()).unwrap();
    }
    forward == backward && build(&points, 3) == build(&points, 3)
}

#[test]
fn equality_checks_shape() {
    let a = build(&[(1, 1, 1)], 3);
    let b = build(&[(250, 1, 1)], 3);
    let c = build(&[(1, 1, 1)], 2);
    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_eq!(Octree::<Color>::default(), Octree::<Color>::default());
}
