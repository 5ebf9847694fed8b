//! # Labelled Equations
//!
//! A compiled expression tagged with the field it came from, so compile and
//! evaluation failures name the offending equation.

use extramesh_expr::{Expression, Scope};

use crate::error::{Sample, SurfaceError};

#[derive(Debug, Clone)]
pub(crate) struct Equation {
    label: &'static str,
    expression: Expression,
}

impl Equation {
    pub(crate) fn compile(
        label: &'static str,
        source: &str,
        scope: &Scope,
    ) -> Result<Self, SurfaceError> {
        let expression =
            Expression::compile(source, scope).map_err(|source_error| SurfaceError::ExpressionCompile {
                label,
                expression: source.to_string(),
                source: source_error,
            })?;
        Ok(Self { label, expression })
    }

    /// Evaluates at `values`, attributing failures to `sample`.
    pub(crate) fn eval(&self, values: &[f64], sample: Sample) -> Result<f64, SurfaceError> {
        self.expression
            .eval(values)
            .map_err(|source| SurfaceError::ExpressionEval {
                label: self.label,
                expression: self.expression.source().to_string(),
                sample,
                source,
            })
    }
}

// =============================================================================
// TESTS
// =============================================================================
