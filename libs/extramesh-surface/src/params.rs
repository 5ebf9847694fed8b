//! # Surface Parameters
//!
//! Parameter records for both surface kinds, with the add-on's defaults
//! and range validation against `config::constants`.

use std::f64::consts::PI;

use config::constants::{
    MAX_GRID_DIVISIONS, MAX_OBJECT_COUNT, MAX_SURFACE_SIZE, MAX_UV_STEPS, MIN_GRID_DIVISIONS,
    MIN_UV_STEPS, MIN_WRAPPED_STEPS, UV_RANGE_LIMIT,
};
use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;

// =============================================================================
// Z SURFACE
// =============================================================================

/// Parameters of a `z = f(x, y)` surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZSurfaceParams {
    /// Equation in `x` and `y`
    pub equation: String,
    /// Vertices along x, `[3, 256]`
    pub div_x: u32,
    /// Vertices along y, `[3, 256]`
    pub div_y: u32,
    /// Extent along x, `(0, 100]`
    pub size_x: f64,
    /// Extent along y, `(0, 100]`
    pub size_y: f64,
}

impl Default for ZSurfaceParams {
    fn default() -> Self {
        Self {
            equation: "1 - ( x**2 + y**2 )".to_string(),
            div_x: 16,
            div_y: 16,
            size_x: 2.0,
            size_y: 2.0,
        }
    }
}

impl ZSurfaceParams {
    /// Checks the equation, grid dimensions and sizes.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        if self.equation.trim().is_empty() {
            return Err(SurfaceError::EmptyEquation { label: "z" });
        }
        validate_z_grid(self.div_x, self.div_y, self.size_x, self.size_y)
    }
}

pub(crate) fn validate_z_grid(
    div_x: u32,
    div_y: u32,
    size_x: f64,
    size_y: f64,
) -> Result<(), SurfaceError> {
    check_divisions("div_x", div_x)?;
    check_divisions("div_y", div_y)?;
    check_size("size_x", size_x)?;
    check_size("size_y", size_y)
}

fn check_divisions(name: &str, value: u32) -> Result<(), SurfaceError> {
    if !(MIN_GRID_DIVISIONS..=MAX_GRID_DIVISIONS).contains(&value) {
        return Err(SurfaceError::invalid_grid(format!(
            "{name} must be in [{MIN_GRID_DIVISIONS}, {MAX_GRID_DIVISIONS}], got {value}"
        )));
    }
    Ok(())
}

fn check_size(name: &str, value: f64) -> Result<(), SurfaceError> {
    if !(value > 0.0 && value <= MAX_SURFACE_SIZE) {
        return Err(SurfaceError::invalid_grid(format!(
            "{name} must be in (0, {MAX_SURFACE_SIZE}], got {value}"
        )));
    }
    Ok(())
}

// =============================================================================
// UV RANGE
// =============================================================================

/// Sampling of one parameter direction.
///
/// `steps` is the number of faces along the direction. Without `wrap` the
/// direction has `steps + 1` samples from `min` to `max` inclusive; with
/// `wrap` the sample at `max` is dropped and the last sample connects back
/// to the first.
///
/// ## Example
///
/// ```rust
/// use extramesh_surface::UvRange;
///
/// let range = UvRange::new(0.0, 1.0, 4, true);
/// assert_eq!(range.sample_count(), 4);
/// assert_eq!(range.value(3), 0.75);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvRange {
    pub min: f64,
    pub max: f64,
    pub steps: u32,
    pub wrap: bool,
}

impl UvRange {
    pub fn new(min: f64, max: f64, steps: u32, wrap: bool) -> Self {
        Self {
            min,
            max,
            steps,
            wrap,
        }
    }

    /// Distance between consecutive samples.
    pub fn step(&self) -> f64 {
        (self.max - self.min) / f64::from(self.steps)
    }

    /// Number of distinct samples along the direction.
    pub fn sample_count(&self) -> usize {
        if self.wrap {
            self.steps as usize
        } else {
            self.steps as usize + 1
        }
    }

    /// Parameter value of sample `index`.
    pub fn value(&self, index: usize) -> f64 {
        self.min + index as f64 * self.step()
    }

    /// Checks bounds, step count and wrapping.
    ///
    /// `axis` names the direction in the error message.
    pub fn validate(&self, axis: &str) -> Result<(), SurfaceError> {
        if !(self.min >= -UV_RANGE_LIMIT && self.min <= 0.0) {
            return Err(SurfaceError::invalid_grid(format!(
                "{axis}_min must be in [-{UV_RANGE_LIMIT}, 0], got {}",
                self.min
            )));
        }
        if !(self.max >= 0.0 && self.max <= UV_RANGE_LIMIT) {
            return Err(SurfaceError::invalid_grid(format!(
                "{axis}_max must be in [0, {UV_RANGE_LIMIT}], got {}",
                self.max
            )));
        }
        if !(MIN_UV_STEPS..=MAX_UV_STEPS).contains(&self.steps) {
            return Err(SurfaceError::invalid_grid(format!(
                "{axis}_steps must be in [{MIN_UV_STEPS}, {MAX_UV_STEPS}], got {}",
                self.steps
            )));
        }
        if self.wrap && self.steps < MIN_WRAPPED_STEPS {
            return Err(SurfaceError::invalid_grid(format!(
                "wrapping {axis} needs at least {MIN_WRAPPED_STEPS} steps, got {}",
                self.steps
            )));
        }
        Ok(())
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// The six helper equations, evaluated in order before `x`, `y` and `z`.
///
/// Each helper sees `u`, `v`, `n` and the helpers before it. Blank helpers
/// read as `"0"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Helpers {
    pub a: String,
    pub b: String,
    pub c: String,
    pub f: String,
    pub g: String,
    pub h: String,
}

impl Default for Helpers {
    fn default() -> Self {
        Self {
            a: "0".to_string(),
            b: "0".to_string(),
            c: "0".to_string(),
            f: "0".to_string(),
            g: "0".to_string(),
            h: "0".to_string(),
        }
    }
}

/// Binding names of the helpers, in evaluation order.
pub const HELPER_NAMES: [&str; 6] = ["a", "b", "c", "f", "g", "h"];

impl Helpers {
    /// `(name, equation)` pairs in evaluation order, blanks replaced by `"0"`.
    pub fn equations(&self) -> [(&'static str, &str); 6] {
        let equations = [&self.a, &self.b, &self.c, &self.f, &self.g, &self.h];
        std::array::from_fn(|k| (HELPER_NAMES[k], blank_to_zero(equations[k])))
    }
}

fn blank_to_zero(equation: &str) -> &str {
    if equation.trim().is_empty() {
        "0"
    } else {
        equation
    }
}

// =============================================================================
// XYZ SURFACE
// =============================================================================

/// Parameters of an `(x, y, z) = F(u, v)` surface.
///
/// The defaults describe the add-on's twisted horn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XyzSurfaceParams {
    pub x_eq: String,
    pub y_eq: String,
    pub z_eq: String,
    pub u: UvRange,
    pub v: UvRange,
    /// Cap both V boundaries with triangle fans (only with `u.wrap` and
    /// without `v.wrap`)
    pub close_v: bool,
    /// Number of objects; object `n` binds `n` in `[0, n_count)`
    pub n_count: u32,
    pub helpers: Helpers,
}

impl Default for XyzSurfaceParams {
    fn default() -> Self {
        Self {
            x_eq: "cos(v)*(1+cos(u))*sin(v/8)".to_string(),
            y_eq: "sin(u)*sin(v/8)+cos(v/8)*1.5".to_string(),
            z_eq: "sin(v)*(1+cos(u))*sin(v/8)".to_string(),
            u: UvRange::new(0.0, 2.0 * PI, 32, true),
            v: UvRange::new(0.0, 4.0 * PI, 128, false),
            close_v: false,
            n_count: 1,
            helpers: Helpers::default(),
        }
    }
}

impl XyzSurfaceParams {
    /// Parameters for the given coordinate equations, everything else at
    /// its default.
    pub fn new(x_eq: &str, y_eq: &str, z_eq: &str) -> Self {
        Self {
            x_eq: x_eq.to_string(),
            y_eq: y_eq.to_string(),
            z_eq: z_eq.to_string(),
            ..Self::default()
        }
    }

    pub fn with_u(mut self, u: UvRange) -> Self {
        self.u = u;
        self
    }

    pub fn with_v(mut self, v: UvRange) -> Self {
        self.v = v;
        self
    }

    pub fn with_close_v(mut self, close_v: bool) -> Self {
        self.close_v = close_v;
        self
    }

    pub fn with_n_count(mut self, n_count: u32) -> Self {
        self.n_count = n_count;
        self
    }

    pub fn with_helpers(mut self, helpers: Helpers) -> Self {
        self.helpers = helpers;
        self
    }

    /// Coordinate equations with their labels.
    pub fn coordinate_equations(&self) -> [(&'static str, &str); 3] {
        [
            ("x", self.x_eq.as_str()),
            ("y", self.y_eq.as_str()),
            ("z", self.z_eq.as_str()),
        ]
    }

    /// Whether the V boundaries get end caps.
    pub fn caps_v(&self) -> bool {
        self.close_v && self.u.wrap && !self.v.wrap
    }

    /// Checks ranges, step counts and the object count.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        for (label, equation) in self.coordinate_equations() {
            if equation.trim().is_empty() {
                return Err(SurfaceError::EmptyEquation { label });
            }
        }
        self.u.validate("u")?;
        self.v.validate("v")?;
        if !(1..=MAX_OBJECT_COUNT).contains(&self.n_count) {
            return Err(SurfaceError::invalid_grid(format!(
                "n_count must be in [1, {MAX_OBJECT_COUNT}], got {}",
                self.n_count
            )));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_z_defaults_valid() {
        let params = ZSurfaceParams::default();
        assert_eq!(params.equation, "1 - ( x**2 + y**2 )");
        assert_eq!((params.div_x, params.div_y), (16, 16));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_z_validation() {
        let bad = [
            ZSurfaceParams { div_x: 2, ..Default::default() },
            ZSurfaceParams { div_y: 257, ..Default::default() },
            ZSurfaceParams { size_x: 0.0, ..Default::default() },
            ZSurfaceParams { size_y: 100.5, ..Default::default() },
            ZSurfaceParams { size_x: f64::NAN, ..Default::default() },
        ];
        for params in bad {
            assert!(matches!(params.validate(), Err(SurfaceError::InvalidGrid { .. })));
        }
        let edge = ZSurfaceParams { div_x: 3, div_y: 256, size_x: 100.0, ..Default::default() };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_uv_range_sampling() {
        let open = UvRange::new(-1.0, 1.0, 4, false);
        assert_eq!(open.sample_count(), 5);
        assert_relative_eq!(open.step(), 0.5);
        assert_relative_eq!(open.value(4), 1.0);

        let wrapped = UvRange { wrap: true, ..open };
        assert_eq!(wrapped.sample_count(), 4);
        assert_relative_eq!(wrapped.value(3), 0.5);
    }

    #[test]
    fn test_uv_range_validation() {
        assert!(UvRange::new(-100.0, 100.0, 1024, false).validate("u").is_ok());
        assert!(UvRange::new(0.0, 0.0, 1, false).validate("u").is_ok());

        let bad = [
            UvRange::new(0.5, 1.0, 4, false),
            UvRange::new(-101.0, 1.0, 4, false),
            UvRange::new(0.0, -1.0, 4, false),
            UvRange::new(0.0, f64::INFINITY, 4, false),
            UvRange::new(0.0, 1.0, 0, false),
            UvRange::new(0.0, 1.0, 1025, false),
            UvRange::new(0.0, 1.0, 1, true),
        ];
        for range in bad {
            let err = range.validate("v").unwrap_err();
            assert!(matches!(err, SurfaceError::InvalidGrid { .. }), "{range:?}");
        }
    }

    #[test]
    fn test_helpers_blank_reads_zero() {
        let helpers = Helpers {
            b: "  ".to_string(),
            f: "a*2".to_string(),
            ..Helpers::default()
        };
        let equations = helpers.equations();
        assert_eq!(equations[1], ("b", "0"));
        assert_eq!(equations[3], ("f", "a*2"));
        assert_eq!(equations.map(|(name, _)| name), HELPER_NAMES);
    }

    #[test]
    fn test_xyz_defaults_are_twisted_horn() {
        let params = XyzSurfaceParams::default();
        assert!(params.u.wrap && !params.v.wrap);
        assert_eq!((params.u.steps, params.v.steps), (32, 128));
        assert_relative_eq!(params.v.max, 4.0 * PI);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_xyz_validation() {
        let empty = XyzSurfaceParams::new("u", " ", "v");
        assert_eq!(
            empty.validate(),
            Err(SurfaceError::EmptyEquation { label: "y" })
        );
        for n_count in [0, 101] {
            let params = XyzSurfaceParams::default().with_n_count(n_count);
            assert!(matches!(params.validate(), Err(SurfaceError::InvalidGrid { .. })));
        }
    }

    #[test]
    fn test_caps_need_wrapped_u_and_open_v() {
        let params = XyzSurfaceParams::default().with_close_v(true);
        assert!(params.caps_v());
        let wrapped_v = params.clone().with_v(UvRange::new(0.0, 1.0, 8, true));
        assert!(!wrapped_v.caps_v());
        let open_u = params.with_u(UvRange::new(0.0, 1.0, 8, false));
        assert!(!open_u.caps_v());
    }
}
