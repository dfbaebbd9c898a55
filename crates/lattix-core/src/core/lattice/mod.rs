//! # Lattice Geometry
//!
//! Discrete crystal coordinates and the periodic box they live in.
//!
//! - [`unit_cell`] - The five supported crystal families and point/index conversion
//! - [`index`] - Integer lattice coordinates
//! - [`period`] - Periodic boundary bookkeeping and primary-box enumeration
//! - [`bravais`] - The periodic lattice combining a unit cell with a period
//! - [`error`] - Validation errors shared by the geometry types
//!
//! All types in this module are immutable after construction.

pub mod bravais;
pub mod error;
pub mod index;
pub mod period;
pub mod unit_cell;

pub use bravais::Lattice;
pub use error::LatticeError;
pub use index::UnitIndex;
pub use period::Period;
pub use unit_cell::{CellFamily, Point, UnitCell};
