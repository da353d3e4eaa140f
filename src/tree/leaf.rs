use crate::spatial::{is_approx, Color};

/// Data that can be stored in the leaves of an [Octree](crate::Octree).
///
/// Tree equality compares leaves with [LeafData::approx_eq] rather than [PartialEq], so that
/// payloads built from floating-point arithmetic can tolerate rounding.
pub trait LeafData: Clone {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl LeafData for Color {
    fn approx_eq(&self, other: &Self) -> bool {
        is_approx(self, other)
    }
}

/// Occupancy only.
impl LeafData for () {
    fn approx_eq(&self, _: &Self) -> bool {
        true
    }
}
