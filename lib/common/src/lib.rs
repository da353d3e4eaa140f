use std::{hash::Hash, ops::Shl};

use num_traits::{AsPrimitive, NumCast, PrimInt};

/// Trait for types which can act as indices within an array (or an array-like structure).
pub trait ArrayIndex:
    PrimInt
    + AsPrimitive<usize>
    + AsPrimitive<u8>
    + Shl<Self, Output = Self>
    + Hash
    + std::fmt::Debug
    + 'static
{
    /// Widen `self` to a `usize` suitable for slice indexing.
    #[inline]
    fn as_usize(self) -> usize {
        <Self as AsPrimitive<usize>>::as_(self)
    }

    /// Narrow a `usize` into `Self`, if it fits.
    #[inline]
    fn try_from_usize(n: usize) -> Option<Self> {
        <Self as NumCast>::from(n)
    }
}
impl<P> ArrayIndex for P where
    P: PrimInt
        + AsPrimitive<usize>
        + AsPrimitive<u8>
        + Shl<Self, Output = Self>
        + Hash
        + std::fmt::Debug
        + 'static
{
}
