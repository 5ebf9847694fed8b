//! # Z Function Surface
//!
//! Samples `z = f(x, y)` on a regular grid centered at the origin and
//! bridges consecutive x-rows into quads facing +z.

use extramesh_expr::Scope;
use extramesh_mesh::{bridge, Mesh};
use glam::DVec3;

use crate::equation::Equation;
use crate::error::{Sample, SurfaceError};
use crate::params::{validate_z_grid, ZSurfaceParams};

/// Builds a `z = f(x, y)` surface.
///
/// The grid has `div_x × div_y` vertices spanning
/// `[-size_x/2, size_x/2] × [-size_y/2, size_y/2]`. Vertices are emitted
/// row by row in x, each row running along y, giving
/// `(div_x - 1)(div_y - 1)` quads.
///
/// # Errors
///
/// - [`SurfaceError::EmptyEquation`] for a blank equation
/// - [`SurfaceError::InvalidGrid`] for divisions outside `[3, 256]` or
///   sizes outside `(0, 100]`
/// - [`SurfaceError::ExpressionCompile`] / [`SurfaceError::ExpressionEval`]
///   when the equation cannot be compiled or evaluated
///
/// ## Example
///
/// ```rust
/// use extramesh_surface::build_z;
///
/// let mesh = build_z("x**2 + y**2", 3, 3, 2.0, 2.0)?;
/// assert_eq!(mesh.vertex_count(), 9);
/// assert_eq!(mesh.face_count(), 4);
/// assert_eq!(mesh.vertices()[0].z, 2.0);
/// # Ok::<(), extramesh_surface::SurfaceError>(())
/// ```
pub fn build_z(
    equation: &str,
    div_x: u32,
    div_y: u32,
    size_x: f64,
    size_y: f64,
) -> Result<Mesh, SurfaceError> {
    if equation.trim().is_empty() {
        return Err(SurfaceError::EmptyEquation { label: "z" });
    }
    validate_z_grid(div_x, div_y, size_x, size_y)?;
    let equation = Equation::compile("z", equation, &Scope::new(&["x", "y"]))?;
    log::debug!("building z surface on a {div_x}x{div_y} grid of {size_x}x{size_y}");

    let delta_x = size_x / f64::from(div_x - 1);
    let delta_y = size_y / f64::from(div_y - 1);
    let start_x = -size_x / 2.0;
    let start_y = -size_y / 2.0;

    let (columns, rows) = (div_y as usize, div_x as usize);
    let mut mesh = Mesh::with_capacity(rows * columns, (rows - 1) * (columns - 1));
    let mut previous: Vec<u32> = Vec::new();

    for row_x in 0..div_x {
        let x = start_x + f64::from(row_x) * delta_x;
        let mut current = Vec::with_capacity(columns);

        for row_y in 0..div_y {
            let y = start_y + f64::from(row_y) * delta_y;
            let z = equation.eval(&[x, y], Sample::Xy { x, y })?;
            current.push(mesh.add_vertex(DVec3::new(x, y, z)));
        }

        if !previous.is_empty() {
            mesh.extend_faces(bridge(&previous, &current, false, false)?);
        }
        previous = current;
    }

    log::trace!(
        "z surface: {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

impl ZSurfaceParams {
    /// Builds the surface described by these parameters.
    pub fn build(&self) -> Result<Mesh, SurfaceError> {
        build_z(&self.equation, self.div_x, self.div_y, self.size_x, self.size_y)
    }
}

// =============================================================================
// TESTS
// =============================================================================
