//! # Extra Mesh: Function Surfaces
//!
//! Meshes sampled from user equations on a regular grid.
//!
//! - **Z surfaces**: `z = f(x, y)` over a rectangle centered at the origin
//! - **XYZ surfaces**: `(x, y, z) = F(u, v)` with optional wrapping in
//!   either direction, V end caps, six chained helper equations and a
//!   sequence of objects indexed by `n`
//!
//! Equations are compiled once per build by `extramesh_expr`, which only
//! accepts the fixed math vocabulary and the bound names.
//!
//! ## Usage
//!
//! ```rust
//! use extramesh_surface::{build_xyz, preset};
//!
//! let sphere = preset("sphere").unwrap();
//! let meshes = build_xyz(&sphere)?;
//! assert!(meshes[0].is_on_sphere(1.0, 1e-9));
//! # Ok::<(), extramesh_surface::SurfaceError>(())
//! ```

mod equation;
pub mod error;
pub mod params;
pub mod presets;
pub mod xyz_surface;
pub mod z_surface;

pub use error::{Sample, SurfaceError};
pub use params::{Helpers, UvRange, XyzSurfaceParams, ZSurfaceParams, HELPER_NAMES};
pub use presets::{preset, presets, SurfacePreset};
pub use xyz_surface::{build_xyz, build_xyz_par};
pub use z_surface::build_z;
