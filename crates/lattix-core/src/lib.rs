//! # lattix
//!
//! Periodic Bravais lattices, occupancy tracking and surface-limited growth of
//! connected aggregates.
//!
//! ## Architecture
//!
//! The library keeps a strict three-layer split.
//!
//! - **[`core`]: The Foundation.** Immutable lattice geometry (`UnitCell`, `Period`,
//!   `Lattice`), the `Population` occupancy container and delimited-text output.
//!
//! - **[`engine`]: The Logic Core.** Configuration, progress reporting and the
//!   `SurfaceGrower`, which grows an aggregate site by site from a weighted pool of
//!   open surface sites.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that turn a configuration
//!   into a grown population.
//!
//! ```no_run
//! use lattix::core::lattice::CellFamily;
//! use lattix::engine::config::GrowthConfigBuilder;
//! use lattix::engine::progress::ProgressReporter;
//!
//! let config = GrowthConfigBuilder::new()
//!     .family(CellFamily::FaceCenteredCubic)
//!     .side(1.0)
//!     .period(vec![20, 20, 20])
//!     .target_size(500)
//!     .seed(42)
//!     .build()?;
//! let result = lattix::workflows::grow::run(&config, &ProgressReporter::new())?;
//! assert_eq!(result.population.count_occupants(), 500);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
