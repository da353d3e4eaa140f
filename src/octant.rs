use nalgebra::Vector3;

/// A way to refer to the eight children of an octree node.
///
/// # Diagram
/// `XYZ>A`, where `XYZ` are the octant coords, and `A` is the corresponding child array index.
/// <pre>
/// Lower (z = 0)   Upper (z = 1)
/// -------------   -------------     2 - 3     Y
/// |010>2|110>3|   |011>6|111>7|   6 - 7 |     |
/// |-----|-----|   |-----|-----|   |   | 1     ___ X
/// |000>0|100>1|   |001>4|101>5|   4 - 5      /
/// -------------   -------------             Z
/// </pre>
///
/// The index packs one bit per axis as `x + 2y + 4z`, so child `0` shares its origin with the
/// parent and child `7` is the one furthest from it.
#[repr(transparent)]
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Octant(pub u8);

impl Octant {
    /// Iterator through all possible octants, in child-index order.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        (0..8).map(Self)
    }

    /// Construct an Octant from per-axis upper/lower halves.
    #[inline]
    pub fn new(x: bool, y: bool, z: bool) -> Self {
        Self((x as u8) | ((y as u8) << 1) | ((z as u8) << 2))
    }

    /// `1` if this octant lies in the upper half along X, else `0`.
    #[inline]
    pub fn x(self) -> u8 {
        self.0 & 0b001
    }
    /// `1` if this octant lies in the upper half along Y, else `0`.
    #[inline]
    pub fn y(self) -> u8 {
        (self.0 & 0b010) >> 1
    }
    /// `1` if this octant lies in the upper half along Z, else `0`.
    #[inline]
    pub fn z(self) -> u8 {
        (self.0 & 0b100) >> 2
    }

    /// Get a [Vector3\<u8\>](Vector3) from Octant `0` to self, in units of one child edge.
    pub fn vector(self) -> Vector3<u8> {
        Vector3::new(self.x(), self.y(), self.z())
    }
}

impl From<Octant> for usize {
    fn from(oct: Octant) -> Self {
        oct.0 as usize
    }
}

impl From<Octant> for u8 {
    fn from(oct: Octant) -> Self {
        oct.0
    }
}
