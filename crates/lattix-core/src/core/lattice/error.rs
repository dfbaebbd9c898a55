use super::index::UnitIndex;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LatticeError {
    #[error("Unit cell side length must be positive and finite, found {0}")]
    NonPositiveSide(f64),

    #[error("Period length along axis {axis} must be positive, found {length}")]
    NonPositivePeriod { axis: usize, length: i64 },

    #[error("Period {lengths} holds more sites than can be counted")]
    TooManySites { lengths: UnitIndex },

    #[error("Lattice coordinates must have at least one dimension")]
    EmptyDimensionality,

    #[error("Dimensionality mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Axis {axis} is out of range for a {dimensionality}-dimensional coordinate")]
    AxisOutOfRange { axis: usize, dimensionality: usize },

    #[error("Unit cell basis is singular and cannot be inverted")]
    DegenerateBasis,
}

impl LatticeError {
    /// Returns `Ok(())` when `found == expected`, otherwise a
    /// [`LatticeError::DimensionMismatch`].
    pub(crate) fn check_dimensions(expected: usize, found: usize) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::DimensionMismatch { expected, found })
        }
    }
}
