//! Writes lattice sites and populations as delimited text.
//!
//! The output is a header row (`cell` followed by one column per axis) and one
//! row per site, with coordinates in fixed precision.

pub mod sites;
