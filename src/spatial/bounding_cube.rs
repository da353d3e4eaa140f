use nalgebra::point;

use super::{Real, WorldPoint};
use crate::Octant;

/// Axis-Aligned Bounding Cube
///
/// Containment is half-open: a point `p` lies within the cube iff `origin ≤ p < origin + length`
/// on every axis, so a coordinate exactly on the upper face is outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabc {
    pub origin: WorldPoint,
    pub length: Real,
}

impl Aabc {
    pub fn new(origin: WorldPoint, length: Real) -> Self {
        Self { origin, length }
    }

    /// A cube at the origin with zero length; contains nothing.
    pub fn empty() -> Self {
        Self {
            origin: WorldPoint::origin(),
            length: 0.0,
        }
    }

    pub fn maxs(&self) -> WorldPoint {
        self.origin.map(|c| c + self.length)
    }

    /// Determine whether a point `p` lies within `self`.
    pub fn contains(&self, p: &WorldPoint) -> bool {
        let Self {
            length: l,
            origin: o,
        } = &self;
        (p.x >= o.x && p.x < (o.x + *l))
            && (p.y >= o.y && (p.y < (o.y + *l)))
            && (p.z >= o.z && (p.z < (o.z + *l)))
    }

    /// Determine the center point of `self`.
    pub fn center(&self) -> WorldPoint {
        let l2 = self.length / 2.0;
        self.origin.map(|c| c + l2)
    }

    /// Given an [Octant] `oct`, construct an [Aabc] `n` such that `n` is the `oct`th octant of `self`
    pub fn child(&self, oct: Octant) -> Self {
        let l2 = self.length / 2.0;
        let step = |bit: u8| if bit == 0 { 0.0 } else { l2 };
        Self {
            origin: point![
                self.origin.x + step(oct.x()),
                self.origin.y + step(oct.y()),
                self.origin.z + step(oct.z())
            ],
            length: l2,
        }
    }

    /// Determine the [Octant] of `p`.
    ///
    /// Each axis is bisected independently at the midpoint; a coordinate exactly on the
    /// midpoint belongs to the upper half. This still works even if `p` ∉ `self`: the result is
    /// given as if taking the octant of `p` within an infinitely-large cube sharing a center
    /// with `self`.
    pub fn octant_of(&self, p: &WorldPoint) -> Octant {
        let c = self.center();
        Octant::new(p.x >= c.x, p.y >= c.y, p.z >= c.z)
    }
}
