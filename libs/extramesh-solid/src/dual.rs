//! # Polar Dual
//!
//! Reciprocation about the unit sphere: every face becomes a vertex at the
//! pole of its plane (`n / (n · p)`), every vertex becomes the face that
//! joins the poles of its star in ring order.

use config::constants::EPSILON;
use extramesh_mesh::{Face, Mesh, MeshError};
use glam::DVec3;

use crate::error::SolidError;
use crate::star::{vertex_stars, VertexStar};

/// Computes the polar dual of a closed, consistently wound mesh.
///
/// Vertex `i` of the result is the pole of face `i`; face `j` of the result
/// surrounds vertex `j` of the input. Applying it twice to a solid whose
/// face planes avoid the origin gives back the original positions.
///
/// # Errors
///
/// - [`SolidError::Mesh`] for out-of-range indices, degenerate faces, or a
///   face whose plane passes through the origin
/// - [`SolidError::NonManifold`] when an edge is not shared by exactly two
///   opposite half-edges or a vertex is not surrounded by a single fan
///
/// ## Example
///
/// ```rust
/// use extramesh_solid::{polar_dual, Seed};
///
/// let dual = polar_dual(&Seed::C6.mesh())?;
/// assert_eq!(dual.vertex_count(), 6);
/// assert_eq!(dual.face_count(), 8);
/// # Ok::<(), extramesh_solid::SolidError>(())
/// ```
pub fn polar_dual(mesh: &Mesh) -> Result<Mesh, SolidError> {
    mesh.validate()?;
    if !mesh.is_closed_manifold() {
        return Err(SolidError::non_manifold(
            "every edge must be shared by exactly two opposite half-edges",
        ));
    }

    let stars = vertex_stars(mesh);
    if let Some(vertex) = stars.iter().position(|star| !star.is_complete()) {
        return Err(SolidError::non_manifold(format!(
            "vertex {vertex} is not surrounded by a single fan of faces"
        )));
    }

    for index in 0..mesh.face_count() {
        let distance = mesh.face_normal(index).dot(anchor(mesh, index));
        if distance.abs() < EPSILON {
            return Err(MeshError::degenerate(index, "face plane passes through the origin").into());
        }
    }

    Ok(reciprocate(mesh, &stars))
}

/// Reciprocates `mesh` using precomputed stars, without any checks.
pub(crate) fn reciprocate(mesh: &Mesh, stars: &[VertexStar]) -> Mesh {
    let mut dual = Mesh::with_capacity(mesh.face_count(), mesh.vertex_count());
    dual.extend_vertices((0..mesh.face_count()).map(|index| pole(mesh, index)));
    dual.extend_faces(
        stars
            .iter()
            .map(|star| star.faces.iter().map(|&face| face as u32).collect::<Face>()),
    );
    log::trace!(
        "reciprocated {} faces into {} vertices",
        mesh.face_count(),
        dual.vertex_count()
    );
    dual
}

/// Mean distance of the first face's vertices from the origin, measured as
/// the length of their centroid.
pub(crate) fn first_face_radius(mesh: &Mesh) -> f64 {
    mesh.face_centroid(0).length()
}

fn pole(mesh: &Mesh, index: usize) -> DVec3 {
    let normal = mesh.face_normal(index);
    normal / normal.dot(anchor(mesh, index))
}

fn anchor(mesh: &Mesh, index: usize) -> DVec3 {
    mesh.vertex(mesh.face(index)[0])
}

// =============================================================================
// TESTS
// =============================================================================
