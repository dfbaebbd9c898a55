//! # Workflows Module
//!
//! High-level entry points that tie the [`core`](crate::core) and
//! [`engine`](crate::engine) layers together.
//!
//! - **Growth Workflow** ([`grow`]) - Builds the configured lattice, seeds the RNG and grows an
//!   aggregate of sequentially numbered cells.

pub mod grow;
