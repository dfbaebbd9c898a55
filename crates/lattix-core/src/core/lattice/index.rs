use super::error::LatticeError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    One([i64; 1]),
    Two([i64; 2]),
    Three([i64; 3]),
    Many(Box<[i64]>),
}

/// An immutable integer coordinate on a lattice, expressed in units of the
/// unit-cell basis vectors.
///
/// One-, two- and three-dimensional indices are stored inline; higher
/// dimensionalities fall back to a boxed slice. The representation is
/// canonical for a given dimensionality, so equality and hashing are by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitIndex(Repr);

impl UnitIndex {
    pub const fn new1(i: i64) -> Self {
        Self(Repr::One([i]))
    }

    pub const fn new2(i: i64, j: i64) -> Self {
        Self(Repr::Two([i, j]))
    }

    pub const fn new3(i: i64, j: i64, k: i64) -> Self {
        Self(Repr::Three([i, j, k]))
    }

    /// Creates an index from its per-axis coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::EmptyDimensionality`] if `coords` is empty.
    pub fn from_slice(coords: &[i64]) -> Result<Self, LatticeError> {
        if coords.is_empty() {
            return Err(LatticeError::EmptyDimensionality);
        }
        Ok(Self::from_fn(coords.len(), |axis| coords[axis]))
    }

    /// The index with every coordinate equal to zero.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::EmptyDimensionality`] if `dimensionality` is zero.
    pub fn origin(dimensionality: usize) -> Result<Self, LatticeError> {
        if dimensionality == 0 {
            return Err(LatticeError::EmptyDimensionality);
        }
        Ok(Self::from_fn(dimensionality, |_| 0))
    }

    // `dimensionality` must be at least one.
    pub(crate) fn from_fn(dimensionality: usize, mut f: impl FnMut(usize) -> i64) -> Self {
        match dimensionality {
            1 => Self(Repr::One([f(0)])),
            2 => Self(Repr::Two([f(0), f(1)])),
            3 => Self(Repr::Three([f(0), f(1), f(2)])),
            _ => Self(Repr::Many((0..dimensionality).map(f).collect())),
        }
    }

    pub fn dimensionality(&self) -> usize {
        self.as_slice().len()
    }

    pub fn as_slice(&self) -> &[i64] {
        match &self.0 {
            Repr::One(c) => c,
            Repr::Two(c) => c,
            Repr::Three(c) => c,
            Repr::Many(c) => c,
        }
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.as_slice().to_vec()
    }

    /// Returns the coordinate along `axis`.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::AxisOutOfRange`] if `axis >= self.dimensionality()`.
    pub fn coord(&self, axis: usize) -> Result<i64, LatticeError> {
        self.as_slice()
            .get(axis)
            .copied()
            .ok_or(LatticeError::AxisOutOfRange {
                axis,
                dimensionality: self.dimensionality(),
            })
    }

    pub fn plus(&self, other: &UnitIndex) -> Result<UnitIndex, LatticeError> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn minus(&self, other: &UnitIndex) -> Result<UnitIndex, LatticeError> {
        self.zip_with(other, |a, b| a - b)
    }

    pub fn times(&self, scalar: i64) -> UnitIndex {
        let coords = self.as_slice();
        Self::from_fn(coords.len(), |axis| coords[axis] * scalar)
    }

    pub fn is_origin(&self) -> bool {
        self.as_slice().iter().all(|&c| c == 0)
    }

    fn zip_with(
        &self,
        other: &UnitIndex,
        op: impl Fn(i64, i64) -> i64,
    ) -> Result<UnitIndex, LatticeError> {
        LatticeError::check_dimensions(self.dimensionality(), other.dimensionality())?;
        let (lhs, rhs) = (self.as_slice(), other.as_slice());
        Ok(Self::from_fn(lhs.len(), |axis| op(lhs[axis], rhs[axis])))
    }
}

impl From<[i64; 1]> for UnitIndex {
    fn from(coords: [i64; 1]) -> Self {
        Self(Repr::One(coords))
    }
}

impl From<[i64; 2]> for UnitIndex {
    fn from(coords: [i64; 2]) -> Self {
        Self(Repr::Two(coords))
    }
}

impl From<[i64; 3]> for UnitIndex {
    fn from(coords: [i64; 3]) -> Self {
        Self(Repr::Three(coords))
    }
}

impl fmt::Display for UnitIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (axis, c) in self.as_slice().iter().enumerate() {
            if axis > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_dimensional_constructors_match_from_slice() {
        assert_eq!(UnitIndex::new1(4), UnitIndex::from_slice(&[4]).unwrap());
        assert_eq!(UnitIndex::new2(1, -2), UnitIndex::from_slice(&[1, -2]).unwrap());
        assert_eq!(
            UnitIndex::new3(1, 2, 3),
            UnitIndex::from_slice(&[1, 2, 3]).unwrap()
        );
        assert_eq!(UnitIndex::new3(1, 2, 3), UnitIndex::from([1, 2, 3]));
    }

    #[test]
    fn from_slice_rejects_empty_coordinates() {
        assert_eq!(
            UnitIndex::from_slice(&[]),
            Err(LatticeError::EmptyDimensionality)
        );
        assert_eq!(UnitIndex::origin(0), Err(LatticeError::EmptyDimensionality));
    }

    #[test]
    fn high_dimensional_indices_are_supported() {
        let a = UnitIndex::from_slice(&[1, 2, 3, 4, 5]).unwrap();
        let b = UnitIndex::from_slice(&[1, 1, 1, 1, 1]).unwrap();
        assert_eq!(a.dimensionality(), 5);
        assert_eq!(a.plus(&b).unwrap().to_vec(), vec![2, 3, 4, 5, 6]);
        assert_eq!(a.coord(4), Ok(5));
    }

    #[test]
    fn coord_is_bounds_checked() {
        let index = UnitIndex::new2(7, 8);
        assert_eq!(index.coord(0), Ok(7));
        assert_eq!(index.coord(1), Ok(8));
        assert_eq!(
            index.coord(2),
            Err(LatticeError::AxisOutOfRange {
                axis: 2,
                dimensionality: 2
            })
        );
    }

    #[test]
    fn plus_requires_equal_dimensionality() {
        let a = UnitIndex::new2(1, 2);
        let b = UnitIndex::new3(1, 2, 3);
        assert_eq!(
            a.plus(&b),
            Err(LatticeError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn adding_then_subtracting_restores_the_original() {
        let samples = [
            (UnitIndex::new1(-3), UnitIndex::new1(11)),
            (UnitIndex::new2(5, -9), UnitIndex::new2(-2, 4)),
            (UnitIndex::new3(0, 7, -1), UnitIndex::new3(3, -3, 8)),
        ];
        for (a, b) in samples {
            let round_trip = a.plus(&b).unwrap().plus(&b.times(-1)).unwrap();
            assert_eq!(round_trip, a);
            assert_eq!(a.plus(&b).unwrap().minus(&b).unwrap(), a);
        }
    }

    #[test]
    fn times_scales_every_axis() {
        assert_eq!(UnitIndex::new3(1, -2, 3).times(3), UnitIndex::new3(3, -6, 9));
        assert!(UnitIndex::new2(4, 5).times(0).is_origin());
    }

    #[test]
    fn display_lists_coordinates() {
        assert_eq!(UnitIndex::new3(1, -2, 3).to_string(), "(1, -2, 3)");
    }
}
