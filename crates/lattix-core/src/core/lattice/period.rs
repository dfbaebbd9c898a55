use super::error::LatticeError;
use super::index::UnitIndex;
use itertools::Itertools;

/// The extent of a periodic simulation box, in unit-cell steps along each axis.
///
/// Every absolute [`UnitIndex`] has exactly one periodic image inside the
/// primary box `[0, N_0) x [0, N_1) x ...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Period {
    lengths: UnitIndex,
    count: usize,
}

impl Period {
    /// Creates a period from its per-axis lengths.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::EmptyDimensionality`] for an empty slice,
    /// [`LatticeError::NonPositivePeriod`] if any length is zero or negative,
    /// and [`LatticeError::TooManySites`] if the box holds more sites than a
    /// `usize` can count.
    pub fn new(lengths: &[i64]) -> Result<Self, LatticeError> {
        Self::from_index(UnitIndex::from_slice(lengths)?)
    }

    pub fn from_index(lengths: UnitIndex) -> Result<Self, LatticeError> {
        if let Some((axis, &length)) = lengths
            .as_slice()
            .iter()
            .enumerate()
            .find(|(_, length)| **length <= 0)
        {
            return Err(LatticeError::NonPositivePeriod { axis, length });
        }
        let count = lengths
            .as_slice()
            .iter()
            .try_fold(1usize, |count, &n| {
                usize::try_from(n).ok().and_then(|n| count.checked_mul(n))
            })
            .ok_or_else(|| LatticeError::TooManySites {
                lengths: lengths.clone(),
            })?;
        Ok(Self { lengths, count })
    }

    /// A box with the same `length` along each of `dimensionality` axes.
    pub fn cubic(length: i64, dimensionality: usize) -> Result<Self, LatticeError> {
        if dimensionality == 0 {
            return Err(LatticeError::EmptyDimensionality);
        }
        Self::from_index(UnitIndex::from_fn(dimensionality, |_| length))
    }

    pub fn dimensionality(&self) -> usize {
        self.lengths.dimensionality()
    }

    pub fn lengths(&self) -> &UnitIndex {
        &self.lengths
    }

    pub fn length(&self, axis: usize) -> Result<i64, LatticeError> {
        self.lengths.coord(axis)
    }

    /// Number of sites in the primary box.
    pub fn count_sites(&self) -> usize {
        self.count
    }

    /// Reduces `k` into `[0, n)`, wrapping negative values from the top.
    ///
    /// `n` must be positive.
    #[inline]
    pub fn compute_image(k: i64, n: i64) -> i64 {
        debug_assert!(n > 0, "period length must be positive");
        k.rem_euclid(n)
    }

    pub fn image_of(&self, index: &UnitIndex) -> Result<UnitIndex, LatticeError> {
        self.check(index)?;
        let (coords, lengths) = (index.as_slice(), self.lengths.as_slice());
        Ok(UnitIndex::from_fn(coords.len(), |axis| {
            Self::compute_image(coords[axis], lengths[axis])
        }))
    }

    /// Whether `index` already lies in the primary box.
    pub fn contains(&self, index: &UnitIndex) -> Result<bool, LatticeError> {
        self.check(index)?;
        Ok(index
            .as_slice()
            .iter()
            .zip(self.lengths.as_slice())
            .all(|(&c, &n)| (0..n).contains(&c)))
    }

    /// Every index in the primary box. Axis 0 varies slowest and the last
    /// axis varies fastest.
    ///
    /// This row-major order is intentional: [`Period::ordinal`], `fill` and
    /// the `sites` output all rely on it, so do not reverse it to make axis 0
    /// the fastest.
    pub fn enumerate(&self) -> Vec<UnitIndex> {
        let dim = self.dimensionality();
        self.lengths
            .as_slice()
            .iter()
            .map(|&n| 0..n)
            .multi_cartesian_product()
            .map(|coords| UnitIndex::from_fn(dim, |axis| coords[axis]))
            .collect()
    }

    /// Position of a primary-box index in [`Period::enumerate`] order, or
    /// `None` if `image` is not a primary-box index of this period.
    pub fn ordinal(&self, image: &UnitIndex) -> Option<usize> {
        if image.dimensionality() != self.dimensionality() {
            return None;
        }
        let mut ordinal = 0usize;
        for (&c, &n) in image.as_slice().iter().zip(self.lengths.as_slice()) {
            if !(0..n).contains(&c) {
                return None;
            }
            ordinal = ordinal * n as usize + c as usize;
        }
        Some(ordinal)
    }

    /// Inverse of [`Period::ordinal`].
    pub fn site_at(&self, ordinal: usize) -> Option<UnitIndex> {
        if ordinal >= self.count_sites() {
            return None;
        }
        let lengths = self.lengths.as_slice();
        let mut coords = vec![0i64; lengths.len()];
        let mut rest = ordinal;
        for axis in (0..lengths.len()).rev() {
            let n = lengths[axis] as usize;
            coords[axis] = (rest % n) as i64;
            rest /= n;
        }
        Some(UnitIndex::from_fn(coords.len(), |axis| coords[axis]))
    }

    fn check(&self, index: &UnitIndex) -> Result<(), LatticeError> {
        LatticeError::check_dimensions(self.dimensionality(), index.dimensionality())
    }
}
