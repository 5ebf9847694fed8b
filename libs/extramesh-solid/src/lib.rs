//! # Extra Mesh: Solids
//!
//! Platonic, Archimedean and Catalan solids from a single pipeline: pick a
//! Platonic seed, truncate its vertices and edges (optionally as a snub),
//! and optionally take the polar dual.
//!
//! ## Architecture
//!
//! ```text
//! Seed ─→ vertex stars ─→ truncation ─→ [polar dual] ─→ Mesh
//!                                                        │
//! SolidParams ─→ generate (validate, size policy) ───────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use extramesh_solid::{build, Seed, Snub};
//!
//! // Snub cube: 6 squares and 32 triangles
//! let mesh = build(Seed::C6, 1.0, 0.5, Snub::Left, false);
//! assert_eq!(mesh.vertex_count(), 24);
//! assert_eq!(mesh.face_count(), 38);
//! ```

pub mod dual;
pub mod error;
pub mod params;
pub mod presets;
pub mod seed;
pub mod star;
pub mod truncate;

pub use dual::polar_dual;
pub use error::SolidError;
pub use params::{generate, SolidParams, Snub};
pub use presets::{preset, presets, SolidPreset};
pub use seed::Seed;
pub use truncate::build;
