//! Exact intersection tests between triangles and boxes.
//!
//! The triangle test is Möller's interval-overlap method: each triangle is first tested against
//! the other's plane, then both are intersected with the line where the planes meet and the two
//! resulting intervals are compared. Coplanar triangles fall back to a 2D edge and containment
//! test. No tolerance is applied anywhere.

use crate::{Point, Real, Vector};

/// Whether the closed boxes `[min0, max0]` and `[min1, max1]` overlap.
pub fn aabb_aabb(min0: &Point, max0: &Point, min1: &Point, max1: &Point) -> bool {
    (0..3).all(|i| min0[i] <= max1[i] && min1[i] <= max0[i])
}

/// The box around three points, as `(min, max)`.
pub fn triangle_aabb(p0: &Point, p1: &Point, p2: &Point) -> (Point, Point) {
    (p0.inf(p1).inf(p2), p0.sup(p1).sup(p2))
}

/// Whether triangles `v0 v1 v2` and `u0 u1 u2` share at least one point.
pub fn triangle_triangle_3d(
    v0: &Point,
    v1: &Point,
    v2: &Point,
    u0: &Point,
    u1: &Point,
    u2: &Point,
) -> bool {
    // plane of the first triangle
    let n1 = (v1 - v0).cross(&(v2 - v0));
    let d1 = -n1.dot(&v0.coords);
    let du = [u0, u1, u2].map(|u| n1.dot(&u.coords) + d1);
    let (du0du1, du0du2) = (du[0] * du[1], du[0] * du[2]);
    if du0du1 > 0.0 && du0du2 > 0.0 {
        return false;
    }

    // plane of the second triangle
    let n2 = (u1 - u0).cross(&(u2 - u0));
    let d2 = -n2.dot(&u0.coords);
    let dv = [v0, v1, v2].map(|v| n2.dot(&v.coords) + d2);
    let (dv0dv1, dv0dv2) = (dv[0] * dv[1], dv[0] * dv[2]);
    if dv0dv1 > 0.0 && dv0dv2 > 0.0 {
        return false;
    }

    // project onto the largest axis of the intersection line direction
    let index = n1.cross(&n2).iamax();
    let vp = [v0[index], v1[index], v2[index]];
    let up = [u0[index], u1[index], u2[index]];

    let Some(iv) = interval(vp, dv, dv0dv1, dv0dv2) else {
        return coplanar_tri_tri(&n1, [v0, v1, v2], [u0, u1, u2]);
    };
    let Some(iu) = interval(up, du, du0du1, du0du2) else {
        return coplanar_tri_tri(&n1, [v0, v1, v2], [u0, u1, u2]);
    };

    let xx = iv.x0 * iv.x1;
    let yy = iu.x0 * iu.x1;
    let xxyy = xx * yy;

    let tmp = iv.a * xxyy;
    let mut isect1 = [tmp + iv.b * iv.x1 * yy, tmp + iv.c * iv.x0 * yy];
    let tmp = iu.a * xxyy;
    let mut isect2 = [tmp + iu.b * xx * iu.x1, tmp + iu.c * xx * iu.x0];

    sort2(&mut isect1);
    sort2(&mut isect2);
    !(isect1[1] < isect2[0] || isect2[1] < isect1[0])
}

/// The terms of a triangle's interval along the planes' intersection line, kept as fractions
/// so that no division is needed.
struct Interval {
    a: Real,
    b: Real,
    c: Real,
    x0: Real,
    x1: Real,
}

/// `None` if the triangle lies in the other's plane.
fn interval(p: [Real; 3], d: [Real; 3], d0d1: Real, d0d2: Real) -> Option<Interval> {
    // pick the vertex alone on its side of the plane
    let lone = if d0d1 > 0.0 {
        2
    } else if d0d2 > 0.0 {
        1
    } else if d[1] * d[2] > 0.0 || d[0] != 0.0 {
        0
    } else if d[1] != 0.0 {
        1
    } else if d[2] != 0.0 {
        2
    } else {
        return None;
    };
    let (i, j, k) = match lone {
        0 => (0, 1, 2),
        1 => (1, 0, 2),
        _ => (2, 0, 1),
    };
    Some(Interval {
        a: p[i],
        b: (p[j] - p[i]) * d[i],
        c: (p[k] - p[i]) * d[i],
        x0: d[i] - d[j],
        x1: d[i] - d[k],
    })
}

#[inline]
fn sort2(a: &mut [Real; 2]) {
    if a[0] > a[1] {
        a.swap(0, 1);
    }
}

fn coplanar_tri_tri(n: &Vector, v: [&Point; 3], u: [&Point; 3]) -> bool {
    // project onto the axis-aligned plane that maximizes the triangles' area
    let a = n.abs();
    let (i0, i1) = if a.x > a.y {
        if a.x > a.z {
            (1, 2)
        } else {
            (0, 1)
        }
    } else if a.z > a.y {
        (0, 1)
    } else {
        (0, 2)
    };
    let v = v.map(|p| [p[i0], p[i1]]);
    let u = u.map(|p| [p[i0], p[i1]]);

    for (s, e) in [(0, 1), (1, 2), (2, 0)] {
        if edge_against_tri_edges(v[s], v[e], &u) {
            return true;
        }
    }
    point_in_tri(v[0], &u) || point_in_tri(u[0], &v)
}

fn edge_against_tri_edges(v0: [Real; 2], v1: [Real; 2], u: &[[Real; 2]; 3]) -> bool {
    let ax = v1[0] - v0[0];
    let ay = v1[1] - v0[1];
    [(0, 1), (1, 2), (2, 0)]
        .into_iter()
        .any(|(s, e)| edge_edge(ax, ay, v0, u[s], u[e]))
}

fn edge_edge(ax: Real, ay: Real, v0: [Real; 2], u0: [Real; 2], u1: [Real; 2]) -> bool {
    let bx = u0[0] - u1[0];
    let by = u0[1] - u1[1];
    let cx = v0[0] - u0[0];
    let cy = v0[1] - u0[1];
    let f = ay * bx - ax * by;
    let d = by * cx - bx * cy;
    if (f > 0.0 && d >= 0.0 && d <= f) || (f < 0.0 && d <= 0.0 && d >= f) {
        let e = ax * cy - ay * cx;
        if f > 0.0 {
            e >= 0.0 && e <= f
        } else {
            e <= 0.0 && e >= f
        }
    } else {
        false
    }
}

fn point_in_tri(p: [Real; 2], u: &[[Real; 2]; 3]) -> bool {
    let side = |s: [Real; 2], e: [Real; 2]| {
        let a = e[1] - s[1];
        let b = -(e[0] - s[0]);
        let c = -a * s[0] - b * s[1];
        a * p[0] + b * p[1] + c
    };
    let d0 = side(u[0], u[1]);
    let d1 = side(u[1], u[2]);
    let d2 = side(u[2], u[0]);
    d0 * d1 > 0.0 && d0 * d2 > 0.0
}
