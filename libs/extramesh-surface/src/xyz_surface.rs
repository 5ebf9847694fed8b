//! # XYZ Function Surface
//!
//! Samples `(x, y, z) = F(u, v)` over a `(u, v)` grid, once per object
//! `n` in `[0, n_count)`. [`build_xyz`] stays on the calling thread;
//! [`build_xyz_par`] spreads the objects over rayon's pool.
//!
//! ## Layout
//!
//! Vertices are emitted in rows of constant `v`, each row running along
//! `u`. Cell `(vN, uN)` becomes the quad
//! `(vN,uN) → (vN,uN+1) → (vN+1,uN+1) → (vN+1,uN)`, so a tube wrapped in
//! `u` faces outward. Wrapping a direction drops its last sample and
//! joins the last row or column back to the first.
//!
//! ## Bindings
//!
//! Every equation sees one slot array `[u, v, n, a, b, c, f, g, h]`.
//! Helper `k` is compiled against the first `3 + k` names only, so it may
//! read `u`, `v`, `n` and the helpers evaluated before it.

use extramesh_expr::Scope;
use extramesh_mesh::{bridge, Face, Mesh};
use glam::DVec3;
use rayon::prelude::*;

use crate::equation::Equation;
use crate::error::{Sample, SurfaceError};
use crate::params::XyzSurfaceParams;

/// Names bound for XYZ equations, in slot order.
const BINDINGS: [&str; 9] = ["u", "v", "n", "a", "b", "c", "f", "g", "h"];

/// Slots taken by `u`, `v` and `n` ahead of the helpers.
const LOOP_SLOTS: usize = 3;

/// Every equation of one XYZ build, compiled once and shared by all objects.
struct CompiledSurface {
    helpers: Vec<Equation>,
    coordinates: [Equation; 3],
}

impl CompiledSurface {
    fn compile(params: &XyzSurfaceParams) -> Result<Self, SurfaceError> {
        let scope = Scope::new(&BINDINGS);

        let helpers = params
            .helpers
            .equations()
            .into_iter()
            .enumerate()
            .map(|(k, (label, source))| {
                Equation::compile(label, source, &scope.prefix(LOOP_SLOTS + k))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let [(x_label, x_eq), (y_label, y_eq), (z_label, z_eq)] = params.coordinate_equations();
        let coordinates = [
            Equation::compile(x_label, x_eq, &scope)?,
            Equation::compile(y_label, y_eq, &scope)?,
            Equation::compile(z_label, z_eq, &scope)?,
        ];

        Ok(Self {
            helpers,
            coordinates,
        })
    }

    fn point(&self, u: f64, v: f64, n: u32) -> Result<DVec3, SurfaceError> {
        let sample = Sample::Uv { u, v, n };
        let mut values = [0.0; BINDINGS.len()];
        values[..LOOP_SLOTS].copy_from_slice(&[u, v, f64::from(n)]);

        for (k, helper) in self.helpers.iter().enumerate() {
            values[LOOP_SLOTS + k] = helper.eval(&values, sample)?;
        }

        let [x, y, z] = &self.coordinates;
        Ok(DVec3::new(
            x.eval(&values, sample)?,
            y.eval(&values, sample)?,
            z.eval(&values, sample)?,
        ))
    }
}

/// Builds one mesh per object `n` in `[0, n_count)`, in order of `n`.
///
/// Runs on the calling thread and stops at the first failing object. See
/// [`build_xyz_par`] to sample the objects on rayon's pool instead.
///
/// # Errors
///
/// - [`SurfaceError::EmptyEquation`] for a blank coordinate equation
/// - [`SurfaceError::InvalidGrid`] for ranges, steps or `n_count` out of
///   bounds
/// - [`SurfaceError::ExpressionCompile`] / [`SurfaceError::ExpressionEval`]
///   when an equation cannot be compiled or evaluated
///
/// ## Example
///
/// ```rust
/// use std::f64::consts::TAU;
/// use extramesh_surface::{build_xyz, UvRange, XyzSurfaceParams};
///
/// let params = XyzSurfaceParams::new("cos(u)", "sin(u)", "v")
///     .with_u(UvRange::new(0.0, TAU, 8, true))
///     .with_v(UvRange::new(0.0, 1.0, 1, false));
/// let meshes = build_xyz(&params)?;
/// assert_eq!(meshes[0].vertex_count(), 16);
/// assert_eq!(meshes[0].face_count(), 8);
/// # Ok::<(), extramesh_surface::SurfaceError>(())
/// ```
pub fn build_xyz(params: &XyzSurfaceParams) -> Result<Vec<Mesh>, SurfaceError> {
    let surface = prepare(params)?;
    (0..params.n_count)
        .map(|n| build_object(&surface, params, n))
        .collect()
}

/// Same result as [`build_xyz`], with the objects sampled in parallel on
/// rayon's global pool.
///
/// Every object is built before the results are inspected, so the error
/// returned is the one of the lowest failing `n` regardless of scheduling.
pub fn build_xyz_par(params: &XyzSurfaceParams) -> Result<Vec<Mesh>, SurfaceError> {
    let surface = prepare(params)?;
    let results = (0..params.n_count)
        .into_par_iter()
        .map(|n| build_object(&surface, params, n))
        .collect::<Vec<Result<Mesh, SurfaceError>>>();

    results.into_iter().collect()
}

fn prepare(params: &XyzSurfaceParams) -> Result<CompiledSurface, SurfaceError> {
    params.validate()?;
    let surface = CompiledSurface::compile(params)?;
    log::debug!(
        "building {} xyz surface(s) on a {}x{} grid",
        params.n_count,
        params.u.steps,
        params.v.steps
    );
    Ok(surface)
}

impl XyzSurfaceParams {
    /// Builds the surfaces described by these parameters.
    pub fn build(&self) -> Result<Vec<Mesh>, SurfaceError> {
        build_xyz(self)
    }
}

fn build_object(
    surface: &CompiledSurface,
    params: &XyzSurfaceParams,
    n: u32,
) -> Result<Mesh, SurfaceError> {
    let (u, v) = (&params.u, &params.v);
    let ring = u.sample_count();
    let rows = v.sample_count();

    let mut mesh = Mesh::with_capacity(ring * rows, (u.steps * v.steps) as usize);
    for row in 0..rows {
        let v_value = v.value(row);
        for column in 0..ring {
            mesh.add_vertex(surface.point(u.value(column), v_value, n)?);
        }
    }

    let row_indices = |row: usize| -> Vec<u32> {
        let start = (row * ring) as u32;
        (start..start + ring as u32).collect()
    };

    for row in 0..v.steps as usize {
        let next = if v.wrap && row + 1 >= rows { 0 } else { row + 1 };
        mesh.extend_faces(bridge(
            &row_indices(row),
            &row_indices(next),
            u.wrap,
            true,
        )?);
    }

    if params.caps_v() {
        mesh.extend_faces(end_caps(ring, v.steps as usize));
    }

    log::trace!(
        "xyz surface n={n}: {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

/// Triangle fans closing the first and last rows of a tube.
///
/// Both fans have `ring - 2` triangles. The first row's fan runs against
/// the row order and the last row's fan with it, so both face away from
/// the tube.
fn end_caps(ring: usize, v_steps: usize) -> Vec<Face> {
    let first = ring as u32 - 1;
    let last = (v_steps * ring) as u32;

    (1..ring.saturating_sub(1) as u32)
        .flat_map(|k| {
            [
                vec![first, first - k, first - k - 1],
                vec![last, last + k, last + k + 1],
            ]
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
