//! # Float Arithmetic
//!
//! Checked arithmetic operators with Python float semantics:
//!
//! - `/`, `//` and `%` by zero raise instead of producing `inf`/`NaN`
//! - `//` and `%` round toward negative infinity (the result of `%` takes
//!   the divisor's sign)
//! - `**` rejects `0 ** negative`, negative bases with fractional
//!   exponents and overflow from finite operands

use crate::ast::BinaryOp;
use crate::error::EvalError;

/// Apply a binary arithmetic operator.
pub fn binary(op: BinaryOp, x: f64, y: f64) -> Result<f64, EvalError> {
    match op {
        BinaryOp::Add => Ok(x + y),
        BinaryOp::Sub => Ok(x - y),
        BinaryOp::Mul => Ok(x * y),
        BinaryOp::Div => divide(x, y),
        BinaryOp::FloorDiv => floor_divide(x, y),
        BinaryOp::Mod => modulo(x, y),
        BinaryOp::Pow => power(x, y),
    }
}

/// True division.
pub fn divide(x: f64, y: f64) -> Result<f64, EvalError> {
    if y == 0.0 {
        return Err(EvalError::zero_division("float division by zero"));
    }
    Ok(x / y)
}

/// `x % y`, sign follows the divisor.
///
/// ```rust
/// use extramesh_expr::numeric::modulo;
///
/// assert_eq!(modulo(-1.0, 3.0), Ok(2.0));
/// assert_eq!(modulo(1.0, -3.0), Ok(-2.0));
/// ```
pub fn modulo(x: f64, y: f64) -> Result<f64, EvalError> {
    if y == 0.0 {
        return Err(EvalError::zero_division("float modulo"));
    }
    Ok(divmod(x, y).1)
}

/// `x // y`, rounded toward negative infinity.
pub fn floor_divide(x: f64, y: f64) -> Result<f64, EvalError> {
    if y == 0.0 {
        return Err(EvalError::zero_division("float floor division by zero"));
    }
    Ok(divmod(x, y).0)
}

/// Floored quotient and remainder for nonzero `y`.
fn divmod(x: f64, y: f64) -> (f64, f64) {
    let mut rem = x % y;
    // x - rem is an exact multiple of y up to rounding
    let mut div = (x - rem) / y;
    if rem != 0.0 {
        if (y < 0.0) != (rem < 0.0) {
            rem += y;
            div -= 1.0;
        }
    } else {
        rem = 0.0_f64.copysign(y);
    }

    let floor = if div != 0.0 {
        let floor = div.floor();
        if div - floor > 0.5 {
            floor + 1.0
        } else {
            floor
        }
    } else {
        0.0_f64.copysign(x / y)
    };

    (floor, rem)
}

/// `x ** y`.
///
/// ```rust
/// use extramesh_expr::numeric::power;
///
/// assert_eq!(power(2.0, -1.0), Ok(0.5));
/// assert_eq!(power(-2.0, 3.0), Ok(-8.0));
/// assert!(power(0.0, -1.0).is_err());
/// assert!(power(-8.0, 1.0 / 3.0).is_err());
/// ```
pub fn power(x: f64, y: f64) -> Result<f64, EvalError> {
    if y == 0.0 {
        return Ok(1.0);
    }
    // IEEE special cases agree with Python for non-finite operands
    if !x.is_finite() || !y.is_finite() {
        return Ok(x.powf(y));
    }
    if x == 0.0 && y < 0.0 {
        return Err(EvalError::zero_division(
            "0.0 cannot be raised to a negative power",
        ));
    }
    if x < 0.0 && y.fract() != 0.0 {
        return Err(EvalError::domain("**"));
    }
    let result = x.powf(y);
    if result.is_infinite() {
        return Err(EvalError::overflow("**"));
    }
    Ok(result)
}

// =============================================================================
// TESTS
// =============================================================================
