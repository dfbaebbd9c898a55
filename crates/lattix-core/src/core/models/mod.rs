//! # Core Models Module
//!
//! Occupancy of a periodic lattice.
//!
//! - [`population`] - Which occupant sits on which site, with lookups in both directions
//! - [`ids`] - Stable handles for the occupied-site records

pub mod ids;
pub mod population;
