//! # Engine Module
//!
//! The stateful layer of lattix: it drives a [`Population`](crate::core::models::population::Population)
//! from empty to a grown aggregate.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Lattice geometry, target size and RNG seed, with a builder
//! - **Growth** ([`growth`]) - The surface-limited [`SurfaceGrower`](growth::SurfaceGrower)
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-level error type wrapping the core errors
//!
//! The weighted pool of open surface sites used by the grower lives in a
//! crate-private Fenwick tree so that both updates and draws are logarithmic
//! in the size of the periodic box.

pub mod config;
pub mod error;
pub mod growth;
pub(crate) mod open_sites;
pub mod progress;
