//! # Core Module
//!
//! The stateless foundation of lattix.
//!
//! - **Geometry** ([`lattice`]) - Unit cells, integer indices, periodic boxes and Bravais lattices
//! - **Occupancy** ([`models`]) - The [`Population`](models::population::Population) container
//! - **File I/O** ([`io`]) - Delimited-text output of sites and populations

pub mod io;
pub mod lattice;
pub mod models;
