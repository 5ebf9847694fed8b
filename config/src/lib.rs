//! # Config Crate
//!
//! Centralized configuration constants for the extra mesh object generators.
//! Parameter limits, tolerances and recursion guards live here so that the
//! solid, surface and expression crates agree on the same bounds.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{approx_equal, MIN_GRID_DIVISIONS, MAX_GRID_DIVISIONS};
//!
//! let div_x = 16;
//! assert!((MIN_GRID_DIVISIONS..=MAX_GRID_DIVISIONS).contains(&div_x));
//! assert!(approx_equal(0.5, 1.0 / 2.0));
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All limits defined once, used everywhere
//! - **Host Compatible**: Ranges match the add-on's operator properties
//! - **Pure**: No I/O, no environment lookups

pub mod constants;
