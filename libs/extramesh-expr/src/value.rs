//! # Runtime Values
//!
//! Expressions compute floats; `frexp` and `modf` produce pairs that can
//! be subscripted or handed to `min`/`max`.

use crate::error::EvalError;
use std::fmt;

/// Value produced while evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A float (booleans are `1.0` / `0.0`).
    Number(f64),
    /// An immutable tuple of floats.
    Tuple(Vec<f64>),
}

impl Value {
    /// Boolean value: `1.0` or `0.0`.
    pub fn from_bool(b: bool) -> Self {
        Value::Number(if b { 1.0 } else { 0.0 })
    }

    /// Python truthiness: nonzero numbers (NaN included) and non-empty tuples.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0,
            Value::Tuple(items) => !items.is_empty(),
        }
    }

    /// Type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "float",
            Value::Tuple(_) => "tuple",
        }
    }

    /// Extract a number or fail with a type error naming `context`.
    pub fn as_number(&self, context: &str) -> Result<f64, EvalError> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::Tuple(_) => Err(EvalError::type_error(format!(
                "{context} expects a number, got tuple"
            ))),
        }
    }

    /// Python `t[i]` with negative indices counting from the end.
    pub fn index(&self, index: &Value) -> Result<Value, EvalError> {
        let items = match self {
            Value::Tuple(items) => items,
            Value::Number(_) => {
                return Err(EvalError::type_error("'float' object is not subscriptable"))
            }
        };
        let raw = integral(index.as_number("tuple index")?, "tuple indices must be integers")?;
        let len = items.len() as i64;
        let resolved = if raw < 0 { raw + len } else { raw };
        if !(0..len).contains(&resolved) {
            return Err(EvalError::Index {
                index: raw,
                len: items.len(),
            });
        }
        Ok(Value::Number(items[resolved as usize]))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Convert an integral float to `i64`, or fail with `message`.
pub(crate) fn integral(value: f64, message: &str) -> Result<i64, EvalError> {
    // 2^63 bounds the values representable in i64
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if value.fract() != 0.0 || !value.is_finite() {
        return Err(EvalError::type_error(message));
    }
    if value.abs() >= LIMIT {
        return Err(EvalError::overflow("integer conversion"));
    }
    Ok(value as i64)
}
