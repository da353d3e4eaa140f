use super::{Real, WorldPoint};

/// Axis-Aligned Bounding Box
///
/// Unlike [Aabc](super::Aabc), `maxs` is part of the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub mins: WorldPoint,
    pub maxs: WorldPoint,
}

impl Aabb {
    #[inline]
    pub fn new(mins: WorldPoint, maxs: WorldPoint) -> Self {
        Self { mins, maxs }
    }

    /// The tightest box around a set of points, or `None` if there are no points.
    pub fn from_points<'p>(points: impl IntoIterator<Item = &'p WorldPoint>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(Self::new(first, first), |mut bb, p| {
            bb.expand_to(p);
            bb
        }))
    }

    /// Grow `self` such that it contains `p`.
    pub fn expand_to(&mut self, p: &WorldPoint) {
        self.mins = self.mins.inf(p);
        self.maxs = self.maxs.sup(p);
    }

    /// Determine the center of `self`.
    #[inline]
    pub fn center(&self) -> WorldPoint {
        nalgebra::center(&self.mins, &self.maxs)
    }

    /// The length of the longest side of `self`.
    #[inline]
    pub fn max_extent(&self) -> Real {
        (self.maxs - self.mins).max()
    }
}
