use super::error::LatticeError;
use super::index::UnitIndex;
use super::period::Period;
use super::unit_cell::{Point, UnitCell};
use rayon::prelude::*;

/// A periodic Bravais lattice: the geometry of a [`UnitCell`] repeated over
/// the box described by a [`Period`].
///
/// Lattices are immutable and can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Lattice {
    unit_cell: UnitCell,
    period: Period,
}

impl Lattice {
    /// Combines a unit cell and a period.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::DimensionMismatch`] unless both share the same
    /// dimensionality.
    pub fn new(unit_cell: UnitCell, period: Period) -> Result<Self, LatticeError> {
        LatticeError::check_dimensions(unit_cell.dimensionality(), period.dimensionality())?;
        Ok(Self { unit_cell, period })
    }

    pub fn unit_cell(&self) -> &UnitCell {
        &self.unit_cell
    }

    pub fn period(&self) -> &Period {
        &self.period
    }

    pub fn dimensionality(&self) -> usize {
        self.unit_cell.dimensionality()
    }

    pub fn count_sites(&self) -> usize {
        self.period.count_sites()
    }

    pub fn origin(&self) -> UnitIndex {
        UnitIndex::from_fn(self.dimensionality(), |_| 0)
    }

    pub fn index_of(&self, point: &Point) -> Result<UnitIndex, LatticeError> {
        self.unit_cell.index_of(point)
    }

    pub fn point_at(&self, index: &UnitIndex) -> Result<Point, LatticeError> {
        self.unit_cell.point_at(index)
    }

    pub fn image_of(&self, index: &UnitIndex) -> Result<UnitIndex, LatticeError> {
        self.period.image_of(index)
    }

    /// The periodic image of the site nearest to `point`.
    pub fn image_of_point(&self, point: &Point) -> Result<UnitIndex, LatticeError> {
        self.period.image_of(&self.unit_cell.index_of(point)?)
    }

    pub fn neighbors(&self, index: &UnitIndex) -> Result<Vec<UnitIndex>, LatticeError> {
        self.unit_cell.neighbors(index)
    }

    /// Continuous coordinates of every primary-box site, in
    /// [`Period::enumerate`] order.
    pub fn list_points(&self) -> Vec<Point> {
        self.period
            .enumerate()
            .par_iter()
            .map(|index| self.unit_cell.position(index))
            .collect()
    }

    /// Continuous coordinates of the nearest neighbors of the site closest to
    /// `point`.
    ///
    /// The neighbors are reported in absolute space; they are not wrapped back
    /// into the primary box.
    pub fn list_neighbors(&self, point: &Point) -> Result<Vec<Point>, LatticeError> {
        let center = self.unit_cell.index_of(point)?;
        Ok(self
            .unit_cell
            .neighbors(&center)?
            .iter()
            .map(|index| self.unit_cell.position(index))
            .collect())
    }
}
