//! # Mesh Errors
//!
//! Error types for mesh construction and bridging.

use thiserror::Error;

/// Errors that can occur while assembling or checking a mesh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// The bridge received rings it cannot connect.
    #[error("Invalid rings: cannot bridge {first} vertices to {second} vertices")]
    InvalidRings { first: usize, second: usize },

    /// A face references a vertex that does not exist.
    #[error("Face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    /// A face has fewer than three distinct vertices.
    #[error("Face {face} is degenerate: {message}")]
    DegenerateFace { face: usize, message: String },
}

impl MeshError {
    /// Creates an invalid rings error from the two ring lengths.
    pub fn invalid_rings(first: usize, second: usize) -> Self {
        Self::InvalidRings { first, second }
    }

    /// Creates a degenerate face error.
    pub fn degenerate(face: usize, message: impl Into<String>) -> Self {
        Self::DegenerateFace {
            face,
            message: message.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
