//! # Solid Parameters
//!
//! The record-level API: a validated parameter set plus the host's size
//! policy. Unlike [`build`], nothing here clamps; out-of-range values are
//! reported.

use std::str::FromStr;

use config::constants::{
    DEFAULT_SOLID_SIZE, MAX_EDGE_TRUNCATION, MAX_SOLID_SIZE, MAX_VERTEX_TRUNCATION,
    MIN_SOLID_SIZE,
};
use extramesh_mesh::Mesh;
use serde::{Deserialize, Serialize};

use crate::error::SolidError;
use crate::seed::Seed;
use crate::truncate::build;

/// Chirality of a snub.
///
/// `Left` and `Right` give mirror images of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Snub {
    #[default]
    None,
    Left,
    Right,
}

impl FromStr for Snub {
    type Err = SolidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Snub::None),
            "left" => Ok(Snub::Left),
            "right" => Ok(Snub::Right),
            _ => Err(SolidError::invalid_parameter(
                "snub",
                format!("expected None, Left or Right, got '{s}'"),
            )),
        }
    }
}

/// Full parameter set of a solid.
///
/// ## Example
///
/// ```rust
/// use extramesh_solid::{generate, Seed, SolidParams};
///
/// let params = SolidParams {
///     seed: Seed::C6,
///     vertex_truncation: 1.0,
///     size: 2.0,
///     keep_size: true,
///     ..SolidParams::default()
/// };
/// let mesh = generate(&params)?;
/// assert_eq!(mesh.vertex_count(), 12);
/// assert!(mesh.is_on_sphere(2.0, 1e-9));
/// # Ok::<(), extramesh_solid::SolidError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolidParams {
    /// Starting Platonic solid
    pub seed: Seed,
    /// Amount of vertex truncation, `[0, 2]`
    pub vertex_truncation: f64,
    /// Amount of edge truncation, `[0, 1]`
    pub edge_truncation: f64,
    /// Snub chirality
    pub snub: Snub,
    /// Produce the dual of the truncated solid
    pub dual: bool,
    /// Scale so the reference vertex lies exactly at `size`
    pub keep_size: bool,
    /// Target radius
    pub size: f64,
}

impl Default for SolidParams {
    fn default() -> Self {
        Self {
            seed: Seed::T4,
            vertex_truncation: 0.0,
            edge_truncation: 0.0,
            snub: Snub::None,
            dual: false,
            keep_size: false,
            size: DEFAULT_SOLID_SIZE,
        }
    }
}

impl SolidParams {
    /// Default parameters on another seed.
    pub fn new(seed: Seed) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Sets both truncation amounts.
    pub fn with_truncation(mut self, vertex: f64, edge: f64) -> Self {
        self.vertex_truncation = vertex;
        self.edge_truncation = edge;
        self
    }

    pub fn with_snub(mut self, snub: Snub) -> Self {
        self.snub = snub;
        self
    }

    pub fn with_dual(mut self, dual: bool) -> Self {
        self.dual = dual;
        self
    }

    /// Sets the target radius and whether it is enforced exactly.
    pub fn with_size(mut self, size: f64, keep_size: bool) -> Self {
        self.size = size;
        self.keep_size = keep_size;
        self
    }

    /// Checks every numeric field against its range.
    pub fn validate(&self) -> Result<(), SolidError> {
        check_range(
            "vertex_truncation",
            self.vertex_truncation,
            0.0,
            MAX_VERTEX_TRUNCATION,
        )?;
        check_range("edge_truncation", self.edge_truncation, 0.0, MAX_EDGE_TRUNCATION)?;
        check_range("size", self.size, MIN_SOLID_SIZE, MAX_SOLID_SIZE)
    }
}

fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), SolidError> {
    if !value.is_finite() || value < min || value > max {
        return Err(SolidError::invalid_parameter(
            name,
            format!("expected a value in [{min}, {max}], got {value}"),
        ));
    }
    Ok(())
}

/// Validates `params`, builds the solid and applies the size policy.
///
/// With `keep_size` the mesh is scaled so its reference vertex (the last
/// vertex of a dual, the first otherwise) lies at `size`; without it the
/// raw solid is scaled by `size`.
///
/// # Errors
///
/// [`SolidError::InvalidParameter`] when a field is out of range.
pub fn generate(params: &SolidParams) -> Result<Mesh, SolidError> {
    params.validate()?;

    let mut mesh = build(
        params.seed,
        params.vertex_truncation,
        params.edge_truncation,
        params.snub,
        params.dual,
    );

    let factor = if params.keep_size {
        let reference = if params.dual {
            mesh.vertices().last()
        } else {
            mesh.vertices().first()
        };
        let radius = reference.map_or(1.0, |v| v.length());
        params.size / radius
    } else {
        params.size
    };
    mesh.scale(factor);

    log::debug!(
        "generated {:?} solid: {} vertices, {} faces",
        params.seed,
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

// =============================================================================
// TESTS
// =============================================================================
