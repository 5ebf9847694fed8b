//! # Builtin Functions and Constants
//!
//! The complete whitelist of callable names. Anything not listed here is
//! rejected at compile time.
//!
//! ## Error policy
//!
//! Follows the math module of the language the expressions are written in:
//! a NaN result from non-NaN input is a domain error, an infinite result
//! from finite input is an overflow (for functions that can overflow) or a
//! domain error (for poles such as `log(0)`).

use crate::error::EvalError;
use crate::value::{integral, Value};
use std::f64::consts;
use std::fmt;

/// Value of a whitelisted constant.
///
/// ```rust
/// use extramesh_expr::builtins::constant;
///
/// assert_eq!(constant("pi"), Some(std::f64::consts::PI));
/// assert_eq!(constant("tau"), None);
/// ```
pub fn constant(name: &str) -> Option<f64> {
    match name {
        "e" => Some(consts::E),
        "pi" => Some(consts::PI),
        _ => None,
    }
}

// =============================================================================
// ARITY
// =============================================================================

/// Accepted argument counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Range(usize, usize),
    AtLeast(usize),
}

impl Arity {
    /// Check if `count` arguments are accepted.
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(n) => count == n,
            Arity::Range(lo, hi) => (lo..=hi).contains(&count),
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: usize| if n == 1 { "argument" } else { "arguments" };
        match *self {
            Arity::Exact(n) => write!(f, "exactly {} {}", n, plural(n)),
            Arity::Range(lo, hi) => write!(f, "{} to {} arguments", lo, hi),
            Arity::AtLeast(n) => write!(f, "at least {} {}", n, plural(n)),
        }
    }
}

// =============================================================================
// BUILTIN
// =============================================================================

/// A whitelisted function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Acos,
    Asin,
    Atan,
    Atan2,
    Ceil,
    Cos,
    Cosh,
    Degrees,
    Exp,
    Fabs,
    Floor,
    Fmod,
    Frexp,
    Hypot,
    Ldexp,
    Log,
    Log10,
    Modf,
    Pow,
    Radians,
    Sin,
    Sinh,
    Sqrt,
    Tan,
    Tanh,
    Gcd,
    Lcm,
    Min,
    Max,
}

impl Builtin {
    /// Every builtin, in alphabetical order of the math functions followed
    /// by the integer and aggregate helpers.
    pub const ALL: [Builtin; 29] = [
        Builtin::Acos,
        Builtin::Asin,
        Builtin::Atan,
        Builtin::Atan2,
        Builtin::Ceil,
        Builtin::Cos,
        Builtin::Cosh,
        Builtin::Degrees,
        Builtin::Exp,
        Builtin::Fabs,
        Builtin::Floor,
        Builtin::Fmod,
        Builtin::Frexp,
        Builtin::Hypot,
        Builtin::Ldexp,
        Builtin::Log,
        Builtin::Log10,
        Builtin::Modf,
        Builtin::Pow,
        Builtin::Radians,
        Builtin::Sin,
        Builtin::Sinh,
        Builtin::Sqrt,
        Builtin::Tan,
        Builtin::Tanh,
        Builtin::Gcd,
        Builtin::Lcm,
        Builtin::Min,
        Builtin::Max,
    ];

    /// Look up a function by name.
    pub fn lookup(name: &str) -> Option<Builtin> {
        let builtin = match name {
            "acos" => Builtin::Acos,
            "asin" => Builtin::Asin,
            "atan" => Builtin::Atan,
            "atan2" => Builtin::Atan2,
            "ceil" => Builtin::Ceil,
            "cos" => Builtin::Cos,
            "cosh" => Builtin::Cosh,
            "degrees" => Builtin::Degrees,
            "exp" => Builtin::Exp,
            "fabs" => Builtin::Fabs,
            "floor" => Builtin::Floor,
            "fmod" => Builtin::Fmod,
            "frexp" => Builtin::Frexp,
            "hypot" => Builtin::Hypot,
            "ldexp" => Builtin::Ldexp,
            "log" => Builtin::Log,
            "log10" => Builtin::Log10,
            "modf" => Builtin::Modf,
            "pow" => Builtin::Pow,
            "radians" => Builtin::Radians,
            "sin" => Builtin::Sin,
            "sinh" => Builtin::Sinh,
            "sqrt" => Builtin::Sqrt,
            "tan" => Builtin::Tan,
            "tanh" => Builtin::Tanh,
            "gcd" => Builtin::Gcd,
            "lcm" => Builtin::Lcm,
            "min" => Builtin::Min,
            "max" => Builtin::Max,
            _ => return None,
        };
        Some(builtin)
    }

    /// Name as written in expressions.
    pub const fn name(&self) -> &'static str {
        match self {
            Builtin::Acos => "acos",
            Builtin::Asin => "asin",
            Builtin::Atan => "atan",
            Builtin::Atan2 => "atan2",
            Builtin::Ceil => "ceil",
            Builtin::Cos => "cos",
            Builtin::Cosh => "cosh",
            Builtin::Degrees => "degrees",
            Builtin::Exp => "exp",
            Builtin::Fabs => "fabs",
            Builtin::Floor => "floor",
            Builtin::Fmod => "fmod",
            Builtin::Frexp => "frexp",
            Builtin::Hypot => "hypot",
            Builtin::Ldexp => "ldexp",
            Builtin::Log => "log",
            Builtin::Log10 => "log10",
            Builtin::Modf => "modf",
            Builtin::Pow => "pow",
            Builtin::Radians => "radians",
            Builtin::Sin => "sin",
            Builtin::Sinh => "sinh",
            Builtin::Sqrt => "sqrt",
            Builtin::Tan => "tan",
            Builtin::Tanh => "tanh",
            Builtin::Gcd => "gcd",
            Builtin::Lcm => "lcm",
            Builtin::Min => "min",
            Builtin::Max => "max",
        }
    }

    /// Accepted argument counts.
    pub const fn arity(&self) -> Arity {
        match self {
            Builtin::Atan2 | Builtin::Fmod | Builtin::Ldexp | Builtin::Pow => Arity::Exact(2),
            Builtin::Log => Arity::Range(1, 2),
            Builtin::Hypot | Builtin::Gcd | Builtin::Lcm => Arity::AtLeast(0),
            Builtin::Min | Builtin::Max => Arity::AtLeast(1),
            _ => Arity::Exact(1),
        }
    }

    /// Call the function. The argument count has already been checked.
    pub fn call(&self, args: &[Value]) -> Result<Value, EvalError> {
        let name = self.name();
        let arg = |i: usize| -> Result<f64, EvalError> {
            args.get(i)
                .ok_or_else(|| EvalError::type_error(format!("{name}() is missing an argument")))?
                .as_number(name)
        };

        let number = match self {
            Builtin::Acos => unary(name, arg(0)?, f64::acos, false)?,
            Builtin::Asin => unary(name, arg(0)?, f64::asin, false)?,
            Builtin::Atan => unary(name, arg(0)?, f64::atan, false)?,
            Builtin::Cos => unary(name, arg(0)?, f64::cos, false)?,
            Builtin::Sin => unary(name, arg(0)?, f64::sin, false)?,
            Builtin::Tan => unary(name, arg(0)?, f64::tan, false)?,
            Builtin::Cosh => unary(name, arg(0)?, f64::cosh, true)?,
            Builtin::Sinh => unary(name, arg(0)?, f64::sinh, true)?,
            Builtin::Tanh => unary(name, arg(0)?, f64::tanh, false)?,
            Builtin::Exp => unary(name, arg(0)?, f64::exp, true)?,
            Builtin::Degrees => unary(name, arg(0)?, f64::to_degrees, true)?,
            Builtin::Radians => unary(name, arg(0)?, f64::to_radians, true)?,
            Builtin::Fabs => arg(0)?.abs(),
            Builtin::Sqrt => unary(name, arg(0)?, f64::sqrt, false)?,
            Builtin::Ceil => to_integer(name, arg(0)?.ceil())?,
            Builtin::Floor => to_integer(name, arg(0)?.floor())?,
            Builtin::Log10 => logarithm(name, arg(0)?, f64::log10)?,
            Builtin::Log => {
                let num = logarithm(name, arg(0)?, f64::ln)?;
                if args.len() == 2 {
                    let den = logarithm(name, arg(1)?, f64::ln)?;
                    crate::numeric::divide(num, den)?
                } else {
                    num
                }
            }
            Builtin::Atan2 => arg(0)?.atan2(arg(1)?),
            Builtin::Fmod => fmod(arg(0)?, arg(1)?)?,
            Builtin::Pow => math_pow(arg(0)?, arg(1)?)?,
            Builtin::Ldexp => {
                let exponent = integral(arg(1)?, "ldexp() expects an integer exponent")?;
                ldexp(arg(0)?, exponent)?
            }
            Builtin::Hypot => {
                let values = args
                    .iter()
                    .map(|a| a.as_number(name))
                    .collect::<Result<Vec<_>, _>>()?;
                hypot(&values)?
            }
            Builtin::Frexp => {
                let (mantissa, exponent) = frexp(arg(0)?);
                return Ok(Value::Tuple(vec![mantissa, exponent as f64]));
            }
            Builtin::Modf => {
                let (fraction, whole) = modf(arg(0)?);
                return Ok(Value::Tuple(vec![fraction, whole]));
            }
            Builtin::Gcd => {
                let ints = integers(name, args)?;
                ints.into_iter().fold(0, gcd) as f64
            }
            Builtin::Lcm => lcm(&integers(name, args)?)?,
            Builtin::Min => return extremum(name, args, |candidate, best| candidate < best),
            Builtin::Max => return extremum(name, args, |candidate, best| candidate > best),
        };

        Ok(Value::Number(number))
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// CHECKED MATH
// =============================================================================

/// One-argument function with NaN/infinity checks.
fn unary(name: &'static str, x: f64, f: fn(f64) -> f64, can_overflow: bool) -> Result<f64, EvalError> {
    let r = f(x);
    if r.is_nan() && !x.is_nan() {
        return Err(EvalError::domain(name));
    }
    if r.is_infinite() && x.is_finite() {
        return Err(if can_overflow {
            EvalError::overflow(name)
        } else {
            EvalError::domain(name)
        });
    }
    Ok(r)
}

/// Logarithms reject zero and negative input outright.
fn logarithm(name: &'static str, x: f64, f: fn(f64) -> f64) -> Result<f64, EvalError> {
    if x.is_nan() {
        return Ok(x);
    }
    if x <= 0.0 {
        return Err(EvalError::domain(name));
    }
    Ok(f(x))
}

/// `ceil`/`floor` results must be representable as integers.
fn to_integer(name: &'static str, x: f64) -> Result<f64, EvalError> {
    if x.is_nan() {
        Err(EvalError::domain(name))
    } else if x.is_infinite() {
        Err(EvalError::overflow(name))
    } else {
        Ok(x)
    }
}

fn fmod(x: f64, y: f64) -> Result<f64, EvalError> {
    if y.is_infinite() && x.is_finite() {
        return Ok(x);
    }
    let r = x % y;
    if r.is_nan() && !x.is_nan() && !y.is_nan() {
        return Err(EvalError::domain("fmod"));
    }
    Ok(r)
}

/// `pow()` is stricter than `**`: `pow(0, -1)` is a domain error.
fn math_pow(x: f64, y: f64) -> Result<f64, EvalError> {
    let r = x.powf(y);
    if !x.is_finite() || !y.is_finite() {
        return Ok(r);
    }
    if r.is_nan() {
        return Err(EvalError::domain("pow"));
    }
    if r.is_infinite() {
        return Err(if x == 0.0 {
            EvalError::domain("pow")
        } else {
            EvalError::overflow("pow")
        });
    }
    Ok(r)
}

fn hypot(values: &[f64]) -> Result<f64, EvalError> {
    if values.iter().any(|v| v.is_infinite()) {
        return Ok(f64::INFINITY);
    }
    let r = values.iter().fold(0.0_f64, |acc, v| acc.hypot(*v));
    if r.is_infinite() {
        return Err(EvalError::overflow("hypot"));
    }
    Ok(r)
}

/// Split `x` into a mantissa in `[0.5, 1)` and a power of two.
pub fn frexp(x: f64) -> (f64, i32) {
    if x == 0.0 || !x.is_finite() {
        return (x, 0);
    }
    let bits = x.to_bits();
    let raw_exponent = ((bits >> 52) & 0x7ff) as i32;
    if raw_exponent == 0 {
        // Subnormal: scale into the normal range first
        let (mantissa, exponent) = frexp(x * 2f64.powi(54));
        return (mantissa, exponent - 54);
    }
    let mantissa_bits = (bits & !(0x7ffu64 << 52)) | (1022u64 << 52);
    (f64::from_bits(mantissa_bits), raw_exponent - 1022)
}

/// `x * 2**exponent` without intermediate overflow.
fn ldexp(x: f64, exponent: i64) -> Result<f64, EvalError> {
    if x == 0.0 || !x.is_finite() {
        return Ok(x);
    }
    let mut remaining = exponent.clamp(-2200, 2200);
    let mut r = x;
    while remaining != 0 {
        let step = remaining.clamp(-1000, 1000);
        r *= 2f64.powi(step as i32);
        remaining -= step;
    }
    if r.is_infinite() {
        return Err(EvalError::overflow("ldexp"));
    }
    Ok(r)
}

/// Fractional and integer parts, both carrying the sign of `x`.
pub fn modf(x: f64) -> (f64, f64) {
    if x.is_infinite() {
        return (0.0_f64.copysign(x), x);
    }
    (x.fract(), x.trunc())
}

fn integers(name: &'static str, args: &[Value]) -> Result<Vec<i64>, EvalError> {
    args.iter()
        .map(|a| integral(a.as_number(name)?, &format!("{name}() arguments must be integers")))
        .collect()
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a as i64
}

fn lcm(values: &[i64]) -> Result<f64, EvalError> {
    let mut acc: i128 = 1;
    for &v in values {
        if v == 0 {
            return Ok(0.0);
        }
        let g = gcd(acc as i64, v) as i128;
        acc = (acc / g)
            .checked_mul(v.unsigned_abs() as i128)
            .filter(|r| *r <= i64::MAX as i128)
            .ok_or_else(|| EvalError::overflow("lcm"))?;
    }
    Ok(acc as f64)
}

/// `min`/`max` over several numbers, or over the items of one tuple.
///
/// The first item wins ties and is only replaced by a strictly better one.
fn extremum(
    name: &'static str,
    args: &[Value],
    better: fn(f64, f64) -> bool,
) -> Result<Value, EvalError> {
    let items: Vec<f64> = match args {
        [Value::Tuple(items)] => items.clone(),
        [Value::Number(_)] => {
            return Err(EvalError::type_error("'float' object is not iterable"));
        }
        _ => args
            .iter()
            .map(|a| a.as_number(name))
            .collect::<Result<_, _>>()?,
    };
    let mut iter = items.into_iter();
    let first = iter
        .next()
        .ok_or_else(|| EvalError::type_error(format!("{name}() arg is an empty sequence")))?;
    Ok(Value::Number(
        iter.fold(first, |best, x| if better(x, best) { x } else { best }),
    ))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn call(name: &str, args: &[f64]) -> Result<Value, EvalError> {
        let values: Vec<Value> = args.iter().map(|a| Value::Number(*a)).collect();
        Builtin::lookup(name)
            .unwrap_or_else(|| panic!("{name} is not a builtin"))
            .call(&values)
    }

    fn number(name: &str, args: &[f64]) -> f64 {
        match call(name, args) {
            Ok(Value::Number(n)) => n,
            other => panic!("{name}{args:?} returned {other:?}"),
        }
    }

    #[test]
    fn test_lookup_roundtrips_names() {
        for builtin in Builtin::ALL {
            assert_eq!(Builtin::lookup(builtin.name()), Some(builtin));
        }
        assert_eq!(Builtin::lookup("__import__"), None);
        assert_eq!(Builtin::lookup("eval"), None);
        assert_eq!(Builtin::lookup("abs"), None);
    }

    #[test]
    fn test_arity() {
        assert!(Builtin::Atan2.arity().accepts(2));
        assert!(!Builtin::Atan2.arity().accepts(1));
        assert!(Builtin::Log.arity().accepts(2));
        assert!(Builtin::Hypot.arity().accepts(0));
        assert!(!Builtin::Max.arity().accepts(0));
        assert_eq!(Arity::Exact(1).to_string(), "exactly 1 argument");
        assert_eq!(Arity::Range(1, 2).to_string(), "1 to 2 arguments");
    }

    #[test]
    fn test_trig() {
        assert_relative_eq!(number("sin", &[consts::FRAC_PI_2]), 1.0);
        assert_relative_eq!(number("atan2", &[1.0, 1.0]), consts::FRAC_PI_4);
        assert_relative_eq!(number("degrees", &[consts::PI]), 180.0);
        assert_relative_eq!(number("radians", &[90.0]), consts::FRAC_PI_2);
    }

    #[test]
    fn test_domain_errors() {
        assert_eq!(call("sqrt", &[-1.0]), Err(EvalError::domain("sqrt")));
        assert_eq!(call("log", &[0.0]), Err(EvalError::domain("log")));
        assert_eq!(call("acos", &[2.0]), Err(EvalError::domain("acos")));
        assert_eq!(call("fmod", &[1.0, 0.0]), Err(EvalError::domain("fmod")));
        assert_eq!(call("sin", &[f64::INFINITY]), Err(EvalError::domain("sin")));
        assert_eq!(call("pow", &[0.0, -1.0]), Err(EvalError::domain("pow")));
        assert_eq!(call("pow", &[-8.0, 1.0 / 3.0]), Err(EvalError::domain("pow")));
        assert_eq!(call("floor", &[f64::NAN]), Err(EvalError::domain("floor")));
    }

    #[test]
    fn test_overflow_errors() {
        assert_eq!(call("exp", &[1000.0]), Err(EvalError::overflow("exp")));
        assert_eq!(call("cosh", &[1000.0]), Err(EvalError::overflow("cosh")));
        assert_eq!(call("pow", &[10.0, 400.0]), Err(EvalError::overflow("pow")));
        assert_eq!(call("ldexp", &[1.0, 5000.0]), Err(EvalError::overflow("ldexp")));
        assert_eq!(call("ceil", &[f64::INFINITY]), Err(EvalError::overflow("ceil")));
    }

    #[test]
    fn test_log_with_base() {
        assert_relative_eq!(number("log", &[8.0, 2.0]), 3.0, epsilon = 1e-12);
        assert!(matches!(call("log", &[8.0, 1.0]), Err(EvalError::ZeroDivision { .. })));
        assert_relative_eq!(number("log10", &[1000.0]), 3.0);
    }

    #[test]
    fn test_frexp() {
        assert_eq!(frexp(8.0), (0.5, 4));
        assert_eq!(frexp(-3.0), (-0.75, 2));
        assert_eq!(frexp(0.0), (0.0, 0));
        let (m, e) = frexp(f64::MIN_POSITIVE / 4.0);
        assert_eq!(m, 0.5);
        assert_eq!(e, -1023);
        assert_eq!(
            call("frexp", &[1.0]),
            Ok(Value::Tuple(vec![0.5, 1.0]))
        );
    }

    #[test]
    fn test_ldexp() {
        assert_eq!(number("ldexp", &[0.75, 2.0]), 3.0);
        assert_eq!(number("ldexp", &[1e-300, 1000.0]), 1e-300 * 2f64.powi(1000));
        assert!(matches!(call("ldexp", &[1.0, 0.5]), Err(EvalError::Type { .. })));
    }

    #[test]
    fn test_modf() {
        assert_eq!(modf(-3.5), (-0.5, -3.0));
        assert_eq!(modf(f64::INFINITY), (0.0, f64::INFINITY));
    }

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(number("gcd", &[12.0, 18.0]), 6.0);
        assert_eq!(number("gcd", &[-4.0, 6.0]), 2.0);
        assert_eq!(number("gcd", &[]), 0.0);
        assert_eq!(number("lcm", &[4.0, 6.0]), 12.0);
        assert_eq!(number("lcm", &[4.0, 0.0]), 0.0);
        assert_eq!(number("lcm", &[]), 1.0);
        assert!(matches!(call("gcd", &[1.5, 2.0]), Err(EvalError::Type { .. })));
    }

    #[test]
    fn test_min_max() {
        assert_eq!(number("max", &[1.0, 3.0, 2.0]), 3.0);
        assert_eq!(number("min", &[1.0, -3.0, 2.0]), -3.0);
        assert_eq!(
            Builtin::Max.call(&[Value::Tuple(vec![0.5, 4.0])]),
            Ok(Value::Number(4.0))
        );
        assert!(matches!(call("max", &[1.0]), Err(EvalError::Type { .. })));
        // The first NaN sticks, a later one is ignored
        assert!(number("max", &[f64::NAN, 1.0]).is_nan());
        assert_eq!(number("max", &[1.0, f64::NAN]), 1.0);
    }

    #[test]
    fn test_hypot() {
        assert_eq!(number("hypot", &[3.0, 4.0]), 5.0);
        assert_eq!(number("hypot", &[]), 0.0);
        assert_eq!(number("hypot", &[f64::NAN, f64::INFINITY]), f64::INFINITY);
    }

    #[test]
    fn test_tuple_argument_rejected() {
        let pair = Value::Tuple(vec![1.0, 2.0]);
        assert!(matches!(
            Builtin::Sin.call(&[pair]),
            Err(EvalError::Type { .. })
        ));
    }
}
