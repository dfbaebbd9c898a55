use crate::core::lattice::{Lattice, LatticeError, Point};
use crate::core::models::population::Population;
use std::fmt::Display;
use std::fs::File;
use std::hash::Hash;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Decimal places used for every coordinate column.
pub const COORDINATE_PRECISION: usize = 6;

const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

#[derive(Debug, Error)]
pub enum SiteWriteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Lattice error: {0}")]
    Lattice(#[from] LatticeError),
}

/// One output row: an identifier and the continuous position of its site.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteRow {
    pub label: String,
    pub point: Point,
}

/// Header for a table of `dimensionality`-dimensional sites:
/// `cell` followed by one column per axis.
pub fn header(dimensionality: usize) -> Vec<String> {
    std::iter::once("cell".to_string())
        .chain((0..dimensionality).map(|axis| match AXIS_NAMES.get(axis) {
            Some(name) => name.to_string(),
            None => format!("x{axis}"),
        }))
        .collect()
}

/// Anything that can be written as a delimited table of labelled sites.
pub trait SiteTable {
    fn dimensionality(&self) -> usize;

    fn rows(&self) -> Result<Vec<SiteRow>, SiteWriteError>;

    /// Writes the header row and then one row per site.
    ///
    /// # Errors
    ///
    /// Returns an error if a row cannot be produced or the writer fails.
    fn write_to(&self, writer: &mut impl Write) -> Result<(), SiteWriteError> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(header(self.dimensionality()))?;
        for row in self.rows()? {
            let coords = row
                .point
                .iter()
                .map(|c| format!("{c:.prec$}", prec = COORDINATE_PRECISION));
            csv.write_record(std::iter::once(row.label).chain(coords))?;
        }
        csv.flush()?;
        Ok(())
    }

    fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), SiteWriteError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl<T> SiteTable for Population<T>
where
    T: Clone + Eq + Hash + Display,
{
    fn dimensionality(&self) -> usize {
        self.lattice().dimensionality()
    }

    /// Occupants in storage order, positioned at their absolute indices.
    fn rows(&self) -> Result<Vec<SiteRow>, SiteWriteError> {
        self.iter()
            .map(|(occupant, index)| {
                Ok(SiteRow {
                    label: occupant.to_string(),
                    point: self.lattice().point_at(index)?,
                })
            })
            .collect()
    }
}

impl SiteTable for Lattice {
    fn dimensionality(&self) -> usize {
        Lattice::dimensionality(self)
    }

    /// Every primary-box site, labelled by its enumeration ordinal.
    fn rows(&self) -> Result<Vec<SiteRow>, SiteWriteError> {
        Ok(self
            .list_points()
            .into_iter()
            .enumerate()
            .map(|(ordinal, point)| SiteRow {
                label: ordinal.to_string(),
                point,
            })
            .collect())
    }
}
