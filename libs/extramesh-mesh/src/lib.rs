//! # Extra Mesh: Mesh
//!
//! Shared output type of the mesh generators and the ring bridge that
//! stitches rows of vertices into faces.
//!
//! ## Architecture
//!
//! ```text
//! extramesh-solid   ─┐
//!                    ├─→ extramesh-mesh (Mesh, bridge)
//! extramesh-surface ─┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use extramesh_mesh::{bridge, Mesh};
//! use glam::DVec3;
//!
//! let mut mesh = Mesh::new();
//! for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
//!     mesh.add_vertex(DVec3::new(x, y, 0.0));
//! }
//! mesh.extend_faces(bridge(&[0, 1], &[2, 3], false, false)?);
//! assert_eq!(mesh.face_count(), 1);
//! # Ok::<(), extramesh_mesh::MeshError>(())
//! ```

pub mod bridge;
pub mod error;
pub mod mesh;

pub use bridge::bridge;
pub use error::MeshError;
pub use mesh::{flipped_faces, Face, Mesh};
