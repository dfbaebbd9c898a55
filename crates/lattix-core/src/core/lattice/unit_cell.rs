use super::error::LatticeError;
use super::index::UnitIndex;
use nalgebra::{DMatrix, DVector};
use phf::{Map, phf_map};
use std::fmt;
use std::sync::LazyLock;

/// A point in continuous space.
pub type Point = DVector<f64>;

/// The crystal families supported by [`UnitCell`].
///
/// Families differ only by their data tables: the primitive basis (for a unit
/// side length) and the nearest-neighbor translations in index space.
///
/// The declaration order matches [`CellFamily::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellFamily {
    Linear,
    Square,
    SimpleCubic,
    BodyCenteredCubic,
    FaceCenteredCubic,
}

static CELL_FAMILY_NAMES: Map<&'static str, CellFamily> = phf_map! {
    "linear" => CellFamily::Linear,
    "square" => CellFamily::Square,
    "sc" => CellFamily::SimpleCubic,
    "simple-cubic" => CellFamily::SimpleCubic,
    "bcc" => CellFamily::BodyCenteredCubic,
    "body-centered-cubic" => CellFamily::BodyCenteredCubic,
    "fcc" => CellFamily::FaceCenteredCubic,
    "face-centered-cubic" => CellFamily::FaceCenteredCubic,
};

// Basis vectors for a unit side length, one row per vector.
const LINEAR_BASIS: &[&[f64]] = &[&[1.0]];
const SQUARE_BASIS: &[&[f64]] = &[&[1.0, 0.0], &[0.0, 1.0]];
const SIMPLE_CUBIC_BASIS: &[&[f64]] = &[&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]];
const BCC_BASIS: &[&[f64]] = &[&[-0.5, 0.5, 0.5], &[0.5, -0.5, 0.5], &[0.5, 0.5, -0.5]];
const FCC_BASIS: &[&[f64]] = &[&[0.0, 0.5, 0.5], &[0.5, 0.0, 0.5], &[0.5, 0.5, 0.0]];

const LINEAR_NEIGHBORS: &[&[i64]] = &[&[1], &[-1]];
const SQUARE_NEIGHBORS: &[&[i64]] = &[&[1, 0], &[-1, 0], &[0, 1], &[0, -1]];
const SIMPLE_CUBIC_NEIGHBORS: &[&[i64]] = &[
    &[1, 0, 0],
    &[-1, 0, 0],
    &[0, 1, 0],
    &[0, -1, 0],
    &[0, 0, 1],
    &[0, 0, -1],
];
const BCC_NEIGHBORS: &[&[i64]] = &[
    &[1, 0, 0],
    &[-1, 0, 0],
    &[0, 1, 0],
    &[0, -1, 0],
    &[0, 0, 1],
    &[0, 0, -1],
    &[1, 1, 1],
    &[-1, -1, -1],
];
const FCC_NEIGHBORS: &[&[i64]] = &[
    &[1, 0, 0],
    &[-1, 0, 0],
    &[0, 1, 0],
    &[0, -1, 0],
    &[0, 0, 1],
    &[0, 0, -1],
    &[1, -1, 0],
    &[-1, 1, 0],
    &[1, 0, -1],
    &[-1, 0, 1],
    &[0, 1, -1],
    &[0, -1, 1],
];

impl CellFamily {
    pub const ALL: [CellFamily; 5] = [
        CellFamily::Linear,
        CellFamily::Square,
        CellFamily::SimpleCubic,
        CellFamily::BodyCenteredCubic,
        CellFamily::FaceCenteredCubic,
    ];

    /// Looks up a family by a case-insensitive name or abbreviation
    /// (`"sc"`, `"bcc"`, `"fcc"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        CELL_FAMILY_NAMES
            .get(name.trim().to_ascii_lowercase().as_str())
            .copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            CellFamily::Linear => "linear",
            CellFamily::Square => "square",
            CellFamily::SimpleCubic => "simple-cubic",
            CellFamily::BodyCenteredCubic => "bcc",
            CellFamily::FaceCenteredCubic => "fcc",
        }
    }

    pub fn dimensionality(self) -> usize {
        self.basis_table().len()
    }

    /// Nearest-neighbor distance for a unit side length.
    pub fn neighbor_distance_factor(self) -> f64 {
        match self {
            CellFamily::Linear | CellFamily::Square | CellFamily::SimpleCubic => 1.0,
            CellFamily::BodyCenteredCubic => 3.0_f64.sqrt() / 2.0,
            CellFamily::FaceCenteredCubic => std::f64::consts::FRAC_1_SQRT_2,
        }
    }

    fn basis_table(self) -> &'static [&'static [f64]] {
        match self {
            CellFamily::Linear => LINEAR_BASIS,
            CellFamily::Square => SQUARE_BASIS,
            CellFamily::SimpleCubic => SIMPLE_CUBIC_BASIS,
            CellFamily::BodyCenteredCubic => BCC_BASIS,
            CellFamily::FaceCenteredCubic => FCC_BASIS,
        }
    }

    fn neighbor_table(self) -> &'static [&'static [i64]] {
        match self {
            CellFamily::Linear => LINEAR_NEIGHBORS,
            CellFamily::Square => SQUARE_NEIGHBORS,
            CellFamily::SimpleCubic => SIMPLE_CUBIC_NEIGHBORS,
            CellFamily::BodyCenteredCubic => BCC_NEIGHBORS,
            CellFamily::FaceCenteredCubic => FCC_NEIGHBORS,
        }
    }
}

impl fmt::Display for CellFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The geometry of one crystal family at a given side length.
///
/// A unit cell converts between continuous points and discrete [`UnitIndex`]
/// coordinates and knows the translations that reach every nearest neighbor
/// of a site. Instances are immutable once built.
#[derive(Debug, Clone)]
pub struct UnitCell {
    family: CellFamily,
    side: f64,
    /// Basis vectors stored as matrix columns.
    basis: DMatrix<f64>,
    inverse: DMatrix<f64>,
    neighbor_translations: Vec<UnitIndex>,
}

static FUNDAMENTAL_CELLS: LazyLock<[UnitCell; 5]> = LazyLock::new(|| {
    CellFamily::ALL.map(|family| {
        UnitCell::new(family, 1.0).expect("fundamental unit cell tables are valid")
    })
});

impl UnitCell {
    /// Builds the unit cell of `family` with the given side length.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::NonPositiveSide`] if `side` is not a positive,
    /// finite number.
    pub fn new(family: CellFamily, side: f64) -> Result<Self, LatticeError> {
        if !(side.is_finite() && side > 0.0) {
            return Err(LatticeError::NonPositiveSide(side));
        }

        let table = family.basis_table();
        let dim = table.len();
        let basis = DMatrix::from_fn(dim, dim, |row, col| table[col][row] * side);
        let inverse = basis
            .clone()
            .try_inverse()
            .ok_or(LatticeError::DegenerateBasis)?;

        let neighbor_translations = family
            .neighbor_table()
            .iter()
            .map(|offset| UnitIndex::from_fn(dim, |axis| offset[axis]))
            .collect();

        Ok(Self {
            family,
            side,
            basis,
            inverse,
            neighbor_translations,
        })
    }

    pub fn linear(side: f64) -> Result<Self, LatticeError> {
        Self::new(CellFamily::Linear, side)
    }

    pub fn square(side: f64) -> Result<Self, LatticeError> {
        Self::new(CellFamily::Square, side)
    }

    pub fn simple_cubic(side: f64) -> Result<Self, LatticeError> {
        Self::new(CellFamily::SimpleCubic, side)
    }

    pub fn bcc(side: f64) -> Result<Self, LatticeError> {
        Self::new(CellFamily::BodyCenteredCubic, side)
    }

    pub fn fcc(side: f64) -> Result<Self, LatticeError> {
        Self::new(CellFamily::FaceCenteredCubic, side)
    }

    /// The shared unit cell of `family` with side length one.
    pub fn fundamental(family: CellFamily) -> &'static UnitCell {
        &FUNDAMENTAL_CELLS[family as usize]
    }

    pub fn family(&self) -> CellFamily {
        self.family
    }

    pub fn side(&self) -> f64 {
        self.side
    }

    pub fn dimensionality(&self) -> usize {
        self.basis.ncols()
    }

    pub fn neighbor_distance(&self) -> f64 {
        self.side * self.family.neighbor_distance_factor()
    }

    pub fn basis_vectors(&self) -> Vec<Point> {
        self.basis
            .column_iter()
            .map(|column| column.into_owned())
            .collect()
    }

    pub fn neighbor_translations(&self) -> &[UnitIndex] {
        &self.neighbor_translations
    }

    /// Returns the index of the lattice site nearest to `point`.
    ///
    /// The point is mapped into basis coordinates with the inverse basis and
    /// each coordinate is rounded to the nearest integer.
    pub fn index_of(&self, point: &Point) -> Result<UnitIndex, LatticeError> {
        LatticeError::check_dimensions(self.dimensionality(), point.len())?;
        let fractional = &self.inverse * point;
        Ok(UnitIndex::from_fn(self.dimensionality(), |axis| {
            fractional[axis].round() as i64
        }))
    }

    /// Returns the continuous position of the site at `index`.
    pub fn point_at(&self, index: &UnitIndex) -> Result<Point, LatticeError> {
        LatticeError::check_dimensions(self.dimensionality(), index.dimensionality())?;
        Ok(self.position(index))
    }

    // Callers guarantee that `index` has the cell's dimensionality.
    pub(crate) fn position(&self, index: &UnitIndex) -> Point {
        let coords = DVector::from_iterator(
            index.dimensionality(),
            index.as_slice().iter().map(|&c| c as f64),
        );
        &self.basis * coords
    }

    /// Returns the indices of every nearest neighbor of `index`.
    pub fn neighbors(&self, index: &UnitIndex) -> Result<Vec<UnitIndex>, LatticeError> {
        LatticeError::check_dimensions(self.dimensionality(), index.dimensionality())?;
        self.neighbor_translations
            .iter()
            .map(|offset| index.plus(offset))
            .collect()
    }
}
