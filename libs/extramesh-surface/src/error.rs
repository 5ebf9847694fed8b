//! # Surface Errors
//!
//! Error types for the function surface builders. Every error aborts the
//! build; no partial mesh is returned.

use std::fmt;

use extramesh_expr::{CompileError, EvalError};
use extramesh_mesh::MeshError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// SAMPLE
// =============================================================================

/// Grid point at which an equation was evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Sample {
    /// A Z surface sample.
    Xy { x: f64, y: f64 },
    /// An XYZ surface sample of object `n`.
    Uv { u: f64, v: f64, n: u32 },
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sample::Xy { x, y } => write!(f, "x={x}, y={y}"),
            Sample::Uv { u, v, n } => write!(f, "u={u}, v={v}, n={n}"),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building a function surface.
///
/// ## Example
///
/// ```rust
/// use extramesh_surface::{build_z, SurfaceError};
///
/// match build_z("1/0", 3, 3, 2.0, 2.0) {
///     Err(SurfaceError::ExpressionEval { sample, .. }) => println!("failed at {sample}"),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    /// Grid dimensions, sizes or ranges out of bounds.
    #[error("Invalid grid: {message}")]
    InvalidGrid { message: String },

    /// A required equation is empty or whitespace only.
    #[error("{label} equation is empty")]
    EmptyEquation { label: &'static str },

    /// An equation failed to parse or uses a name outside the whitelist.
    #[error("Cannot compile {label} equation '{expression}': {source}")]
    ExpressionCompile {
        label: &'static str,
        expression: String,
        source: CompileError,
    },

    /// An equation raised a numeric error at a sample.
    #[error("Cannot evaluate {label} equation '{expression}' at {sample}: {source}")]
    ExpressionEval {
        label: &'static str,
        expression: String,
        sample: Sample,
        source: EvalError,
    },

    /// The sampled rings could not be bridged.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl SurfaceError {
    /// Creates an invalid grid error.
    pub fn invalid_grid(message: impl Into<String>) -> Self {
        Self::InvalidGrid {
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
    use extramesh_expr::{Expression, Scope};

    #[test]
    fn test_sample_display() {
        assert_eq!(Sample::Xy { x: 1.0, y: -0.5 }.to_string(), "x=1, y=-0.5");
        assert_eq!(
            Sample::Uv { u: 0.0, v: 2.5, n: 3 }.to_string(),
            "u=0, v=2.5, n=3"
        );
    }

    #[test]
    fn test_compile_error_display_names_equation() {
        let source = Expression::compile("q", &Scope::new(&["x"])).unwrap_err();
        let err = SurfaceError::ExpressionCompile {
            label: "z",
            expression: "q".into(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Cannot compile z equation 'q'"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let err = SurfaceError::ExpressionEval {
            label: "x",
            expression: "1/u".into(),
            sample: Sample::Uv { u: 0.0, v: 0.0, n: 0 },
            source: EvalError::zero_division("float division by zero"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("u=0, v=0, n=0"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SurfaceError>();
    }
}
