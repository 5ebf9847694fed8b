//! # Solid Errors
//!
//! Error types for the polyhedron generators.
//!
//! ## Error Policy
//!
//! - [`build`](crate::build) clamps its arguments and never fails
//! - Parameter records are validated, not clamped
//! - The standalone dual rejects open or non-manifold input

use extramesh_mesh::MeshError;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while generating a solid.
///
/// ## Example
///
/// ```rust
/// use extramesh_solid::{Seed, SolidError};
///
/// let err = "7".parse::<Seed>().unwrap_err();
/// assert!(matches!(err, SolidError::UnknownSeed { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolidError {
    /// The seed tag is not one of the five Platonic solids.
    #[error("Unknown seed '{tag}': expected one of 4, 6, 8, 12, 20")]
    UnknownSeed { tag: String },

    /// A parameter record carries an out-of-range or non-finite value.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name as it appears on the record
        name: &'static str,
        /// What was wrong with it
        message: String,
    },

    /// The dual of a mesh that is not a closed 2-manifold was requested.
    #[error("Mesh is not a closed manifold: {message}")]
    NonManifold { message: String },

    /// The mesh itself is malformed.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl SolidError {
    /// Creates an unknown seed error.
    pub fn unknown_seed(tag: impl Into<String>) -> Self {
        Self::UnknownSeed { tag: tag.into() }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Creates a non-manifold error.
    pub fn non_manifold(message: impl Into<String>) -> Self {
        Self::NonManifold {
            message: message.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_seed_display() {
        let msg = SolidError::unknown_seed("7").to_string();
        assert!(msg.contains("'7'"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = SolidError::invalid_parameter("size", "must be positive, got -1");
        assert_eq!(err.to_string(), "Invalid parameter 'size': must be positive, got -1");
    }

    #[test]
    fn test_mesh_error_converts() {
        let err: SolidError = MeshError::invalid_rings(0, 0).into();
        assert!(matches!(err, SolidError::Mesh(_)));
        assert!(err.to_string().contains("Invalid rings"));
    }
}
