//! # Configuration Constants
//!
//! Centralized constants for the mesh generators. All parameter ranges,
//! precision values and recursion limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Surface Limits**: Grid divisions, sizes and UV ranges
//! - **Solid Limits**: Truncation ranges and target size
//! - **Expression Limits**: Nesting depth and stack growth

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Truncation parameters are compared against their special values
/// (`0`, `0.5`) with this tolerance.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Tolerance used by geometric checks in tests and validation helpers,
/// e.g. planarity or "all vertices on a sphere" assertions.
pub const GEOMETRY_TOLERANCE: f64 = 1e-9;

// =============================================================================
// SURFACE LIMITS
// =============================================================================

/// Minimum number of vertices per axis of a Z function surface.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_GRID_DIVISIONS;
/// assert_eq!(MIN_GRID_DIVISIONS, 3);
/// ```
pub const MIN_GRID_DIVISIONS: u32 = 3;

/// Maximum number of vertices per axis of a Z function surface.
pub const MAX_GRID_DIVISIONS: u32 = 256;

/// Maximum edge length of a Z function surface along either axis.
///
/// Sizes must lie in `(0, MAX_SURFACE_SIZE]`.
pub const MAX_SURFACE_SIZE: f64 = 100.0;

/// Magnitude bound of the U/V parameter ranges.
///
/// `u_min`/`v_min` lie in `[-UV_RANGE_LIMIT, 0]`, `u_max`/`v_max` in
/// `[0, UV_RANGE_LIMIT]`.
pub const UV_RANGE_LIMIT: f64 = 100.0;

/// Minimum number of steps (faces) along U or V.
pub const MIN_UV_STEPS: u32 = 1;

/// Maximum number of steps (faces) along U or V.
///
/// # Example
///
/// ```rust
/// use config::constants::{MAX_UV_STEPS, MIN_UV_STEPS};
///
/// let requested = 4096;
/// let steps = requested.clamp(MIN_UV_STEPS, MAX_UV_STEPS);
/// assert_eq!(steps, 1024);
/// ```
pub const MAX_UV_STEPS: u32 = 1024;

/// Minimum step count of a wrapped direction.
///
/// A single wrapped step would bridge a ring of one vertex to itself.
pub const MIN_WRAPPED_STEPS: u32 = 2;

/// Maximum number of objects generated by one XYZ surface call (`n_count`).
pub const MAX_OBJECT_COUNT: u32 = 100;

// =============================================================================
// SOLID LIMITS
// =============================================================================

/// Upper bound of the vertex truncation parameter.
///
/// Values above `1.0` truncate the dual seed (birectified forms).
pub const MAX_VERTEX_TRUNCATION: f64 = 2.0;

/// Upper bound of the edge truncation parameter.
pub const MAX_EDGE_TRUNCATION: f64 = 1.0;

/// Smallest accepted target radius of a solid.
pub const MIN_SOLID_SIZE: f64 = 0.01;

/// Largest accepted target radius of a solid.
pub const MAX_SOLID_SIZE: f64 = 100.0;

/// Default target radius of a solid.
pub const DEFAULT_SOLID_SIZE: f64 = 1.0;

// =============================================================================
// EXPRESSION LIMITS
// =============================================================================

/// Maximum nesting depth of an expression (parentheses, calls, operators).
///
/// Deeper expressions are rejected at compile time.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_EXPRESSION_DEPTH;
///
/// let depth = 32;
/// assert!(depth < MAX_EXPRESSION_DEPTH);
/// ```
pub const MAX_EXPRESSION_DEPTH: usize = 256;

/// Bytes of stack space reserved when growing the stack with `stacker`
/// around the recursive-descent parser.
pub const STACKER_STACK_SIZE_BYTES: usize = 8 * 1024 * 1024;

/// Remaining-stack threshold below which `stacker` allocates a new segment.
pub const STACKER_RED_ZONE_BYTES: usize = STACKER_STACK_SIZE_BYTES / 8;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Clamps `value` into `[0, max]`, mapping non-finite input to `0`.
///
/// Mirrors how the host's slider properties never hand out values outside
/// their declared range.
///
/// # Example
///
/// ```rust
/// use config::constants::clamp_unit_range;
///
/// assert_eq!(clamp_unit_range(3.0, 2.0), 2.0);
/// assert_eq!(clamp_unit_range(-1.0, 2.0), 0.0);
/// assert_eq!(clamp_unit_range(f64::NAN, 2.0), 0.0);
/// ```
#[inline]
pub fn clamp_unit_range(value: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, max)
    } else {
        0.0
    }
}
