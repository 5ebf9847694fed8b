//! # Truncation Pipeline
//!
//! Derives Archimedean and Catalan solids from a Platonic seed.
//!
//! ## Parameters
//!
//! Both truncation amounts are halved on entry, so with `t = vtrunc / 2`
//! and `e = etrunc / 2`:
//!
//! | `t` | `e` | Result |
//! |-----|-----|--------|
//! | `0` | any | the seed |
//! | `(0, 0.5)` | `0` | truncated seed |
//! | `0.5` | `0` | rectified seed |
//! | `(0.5, 1)` | `0` | truncated dual seed |
//! | `1` | `0` | the dual seed |
//! | any | `(0, 0.5)` | bevelled, or a snub when chirality is set |
//! | any | `0.5` | edges collapsed to a single quad per edge |
//!
//! Past `t = 0.5` the pipeline switches to the dual seed with `t ← 1 - t`,
//! then mirrors and rescales the result so the size sweeps continuously
//! through `vtrunc = 1`.
//!
//! ## Output Order
//!
//! Vertex faces (one per seed vertex), then edge faces, then face faces
//! (one per seed face).

use config::constants::{
    approx_equal, approx_zero, clamp_unit_range, MAX_EDGE_TRUNCATION, MAX_VERTEX_TRUNCATION,
};
use extramesh_mesh::{Face, Mesh};
use glam::DVec3;

use crate::dual::{first_face_radius, reciprocate};
use crate::params::Snub;
use crate::seed::Seed;
use crate::star::{cyclic, vertex_stars, VertexStar};

// =============================================================================
// CUT CLASSIFICATION
// =============================================================================

/// How the generated vertices of one seed vertex are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cut {
    /// Vertex truncation only: one vertex per star step.
    Corners,
    /// `t = 0.5`, `e = 0`: one vertex per seed edge, shared by both ends.
    Rectify,
    /// `e = 0.5`: the midpoint of consecutive corners.
    Midpoints,
    /// `0 < e < 0.5` without chirality: two vertices per star step.
    Bevel,
    /// Snub, keeping the offset toward the following corner.
    LeftSnub,
    /// Snub, keeping the offset toward the preceding corner.
    RightSnub,
}

impl Cut {
    fn classify(t: f64, e: f64, snub: Snub) -> Self {
        if approx_equal(e, 0.5) {
            Cut::Midpoints
        } else if !approx_zero(e) {
            match snub {
                Snub::None => Cut::Bevel,
                Snub::Left => Cut::LeftSnub,
                Snub::Right => Cut::RightSnub,
            }
        } else if approx_equal(t, 0.5) {
            Cut::Rectify
        } else {
            Cut::Corners
        }
    }
}

// =============================================================================
// BUILD
// =============================================================================

/// Builds a solid from a seed and truncation parameters.
///
/// Out-of-range parameters are clamped (`vertex_truncation` into `[0, 2]`,
/// `edge_truncation` into `[0, 1]`) and non-finite values read as `0`, so
/// this never fails. `snub` only takes effect for edge truncations strictly
/// between `0` and `1`.
///
/// ## Example
///
/// ```rust
/// use extramesh_solid::{build, Seed, Snub};
///
/// // Icosidodecahedron: 20 triangles and 12 pentagons
/// let mesh = build(Seed::I20, 1.0, 0.0, Snub::None, false);
/// assert_eq!(mesh.vertex_count(), 30);
/// assert_eq!(mesh.face_count(), 32);
/// ```
pub fn build(
    seed: Seed,
    vertex_truncation: f64,
    edge_truncation: f64,
    snub: Snub,
    dual: bool,
) -> Mesh {
    let mut t = clamp_unit_range(vertex_truncation, MAX_VERTEX_TRUNCATION) * 0.5;
    let e = clamp_unit_range(edge_truncation, MAX_EDGE_TRUNCATION) * 0.5;
    log::debug!("building solid from {seed:?}: t={t}, e={e}, snub={snub:?}, dual={dual}");

    if approx_zero(t) {
        if !dual {
            return seed.mesh();
        }
        let mut mesh = seed.dual().mesh();
        let size = first_face_radius(&mesh);
        mirror(&mut mesh, size);
        return mesh;
    }

    let (input, supposed_size) = if t < 0.5 || approx_equal(t, 0.5) {
        (seed.mesh(), None)
    } else {
        let dual_seed = seed.dual().mesh();
        let size = first_face_radius(&dual_seed);
        t = 1.0 - t;
        if approx_zero(t) {
            let mut mesh = if dual { seed.mesh() } else { dual_seed };
            mirror(&mut mesh, size);
            return mesh;
        }
        (dual_seed, Some(size))
    };

    let cut = Cut::classify(t, e, snub);
    let stars = vertex_stars(&input);
    let truncated = truncate(&input, &stars, t, e, cut);
    let size_reference = truncated.vertex_faces.first().cloned().unwrap_or_default();
    let mut mesh = truncated.into_mesh();
    log::trace!(
        "{cut:?} cut gave {} vertices and {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    );

    if dual {
        let stars = vertex_stars(&mesh);
        let mut dual_mesh = reciprocate(&mesh, &stars);
        let last = dual_mesh.vertices().last().map_or(1.0, |v| v.length());
        dual_mesh.scale(first_face_radius(&input) / last);
        return dual_mesh;
    }

    if let Some(size) = supposed_size {
        // Match the first vertex face's mean radius to the dual seed's
        let sum: DVec3 = size_reference.iter().map(|&i| mesh.vertex(i)).sum();
        mirror(&mut mesh, size * size_reference.len() as f64 / sum.length());
    }
    mesh
}

/// Scales by `-factor` (a point reflection) and restores outward windings.
fn mirror(mesh: &mut Mesh, factor: f64) {
    mesh.scale(-factor);
    mesh.flip_normals();
}

// =============================================================================
// TRUNCATION
// =============================================================================

struct Truncated {
    vertices: Vec<DVec3>,
    vertex_faces: Vec<Face>,
    edge_faces: Vec<Face>,
    face_faces: Vec<Face>,
}

impl Truncated {
    fn into_mesh(self) -> Mesh {
        let face_count = self.vertex_faces.len() + self.edge_faces.len() + self.face_faces.len();
        let mut mesh = Mesh::with_capacity(self.vertices.len(), face_count);
        mesh.extend_vertices(self.vertices);
        mesh.extend_faces(self.vertex_faces);
        mesh.extend_faces(self.edge_faces);
        mesh.extend_faces(self.face_faces);
        mesh
    }
}

fn push(vertices: &mut Vec<DVec3>, position: DVec3) -> u32 {
    vertices.push(position);
    (vertices.len() - 1) as u32
}

fn truncate(input: &Mesh, stars: &[VertexStar], t: f64, e: f64, cut: Cut) -> Truncated {
    let mut vertices = Vec::new();
    let mut vertex_faces: Vec<Face> = Vec::with_capacity(input.vertex_count());
    let mut edge_faces = Vec::new();

    for (x, star) in stars.iter().enumerate() {
        let origin = input.vertices()[x];
        let corners: Vec<DVec3> = star
            .neighbours
            .iter()
            .map(|&nb| origin.lerp(input.vertex(nb), t))
            .collect();
        let previous = |j: usize| cyclic(&corners, j as isize - 1);

        let mut face = Face::with_capacity(2 * corners.len());
        match cut {
            Cut::Corners => {
                face.extend(corners.iter().map(|&p| push(&mut vertices, p)));
            }
            Cut::Rectify => {
                for (j, &nb) in star.neighbours.iter().enumerate() {
                    if (x as u32) < nb {
                        face.push(push(&mut vertices, corners[j]));
                    } else if let Some(k) = stars[nb as usize].neighbour_index(x as u32) {
                        face.push(vertex_faces[nb as usize][k]);
                    }
                }
            }
            Cut::Midpoints => {
                for j in 0..corners.len() {
                    face.push(push(&mut vertices, (corners[j] + previous(j)) * 0.5));
                }
                face.rotate_left(1);
            }
            Cut::Bevel => {
                for j in 0..corners.len() {
                    face.push(push(&mut vertices, corners[j] * e + previous(j) * (1.0 - e)));
                    face.push(push(&mut vertices, corners[j] * (1.0 - e) + previous(j) * e));
                }
                face.rotate_left(2);
            }
            Cut::LeftSnub => {
                for j in 0..corners.len() {
                    face.push(push(&mut vertices, corners[j] * (1.0 - e) + previous(j) * e));
                }
                face.rotate_left(1);
            }
            Cut::RightSnub => {
                for j in 0..corners.len() {
                    face.push(push(&mut vertices, corners[j] * e + previous(j) * (1.0 - e)));
                }
                face.rotate_left(1);
            }
        }
        vertex_faces.push(face);

        // Each seed edge is bridged once, from its higher-numbered end
        for (j, &nb) in star.neighbours.iter().enumerate() {
            if x <= nb as usize {
                continue;
            }
            let Some(k) = stars[nb as usize].neighbour_index(x as u32) else {
                continue;
            };
            bridge_edge(
                cut,
                &vertex_faces[x],
                &vertex_faces[nb as usize],
                j as isize,
                k as isize,
                &mut edge_faces,
            );
        }
    }

    let face_faces = input
        .faces()
        .iter()
        .enumerate()
        .map(|(index, face)| face_face(cut, index, face, stars, &vertex_faces))
        .collect();

    Truncated {
        vertices,
        vertex_faces,
        edge_faces,
        face_faces,
    }
}

/// Faces spanning one seed edge, between the vertex faces of its two ends.
///
/// `j` is the edge's position in `own`'s star, `k` its position in
/// `other`'s star.
fn bridge_edge(cut: Cut, own: &[u32], other: &[u32], j: isize, k: isize, out: &mut Vec<Face>) {
    let a = |i: isize| cyclic(own, i);
    let b = |i: isize| cyclic(other, i);
    match cut {
        Cut::Corners | Cut::Rectify => {}
        Cut::Midpoints => out.push(vec![a(j), a(j - 1), b(k), b(k - 1)]),
        Cut::Bevel => out.push(vec![a(2 * j), a(2 * j - 1), b(2 * k), b(2 * k - 1)]),
        Cut::LeftSnub => {
            out.push(vec![a(j), a(j - 1), b(k - 1)]);
            out.push(vec![a(j - 1), b(k), b(k - 1)]);
        }
        Cut::RightSnub => {
            out.push(vec![a(j), a(j - 1), b(k)]);
            out.push(vec![a(j), b(k), b(k - 1)]);
        }
    }
}

/// The shrunken copy of seed face `index`, stitched from its corners'
/// vertex faces.
fn face_face(cut: Cut, index: usize, face: &[u32], stars: &[VertexStar], vertex_faces: &[Face]) -> Face {
    let mut out = Face::with_capacity(2 * face.len());
    for &corner in face {
        let Some(k) = stars[corner as usize].face_index(index) else {
            continue;
        };
        let own = &vertex_faces[corner as usize];
        let k = k as isize;
        match cut {
            Cut::Midpoints | Cut::Rectify | Cut::LeftSnub | Cut::RightSnub => {
                out.push(cyclic(own, k - 1));
            }
            Cut::Bevel => {
                out.push(cyclic(own, 2 * k - 1));
                out.push(cyclic(own, 2 * k - 2));
            }
            Cut::Corners => {
                out.push(cyclic(own, k));
                out.push(cyclic(own, k - 1));
            }
        }
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use config::constants::GEOMETRY_TOLERANCE;

    fn histogram(mesh: &Mesh) -> Vec<(usize, usize)> {
        let mut counts = std::collections::BTreeMap::new();
        for face in mesh.faces() {
            *counts.entry(face.len()).or_insert(0) += 1;
        }
        counts.into_iter().collect()
    }

    #[test]
    fn test_classify() {
        assert_eq!(Cut::classify(0.25, 0.0, Snub::Left), Cut::Corners);
        assert_eq!(Cut::classify(0.5, 0.0, Snub::None), Cut::Rectify);
        assert_eq!(Cut::classify(0.3, 0.5, Snub::Left), Cut::Midpoints);
        assert_eq!(Cut::classify(0.3, 0.2, Snub::None), Cut::Bevel);
        assert_eq!(Cut::classify(0.3, 0.2, Snub::Left), Cut::LeftSnub);
        assert_eq!(Cut::classify(0.3, 0.2, Snub::Right), Cut::RightSnub);
    }

    #[test]
    fn test_zero_truncation_is_seed() {
        for seed in Seed::ALL {
            assert_eq!(build(seed, 0.0, 0.0, Snub::None, false), seed.mesh());
            // Edge truncation alone does nothing
            assert_eq!(build(seed, 0.0, 0.7, Snub::Left, false), seed.mesh());
        }
    }

    #[test]
    fn test_truncated_tetrahedron() {
        let mesh = build(Seed::T4, 2.0 / 3.0, 0.0, Snub::None, false);
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(histogram(&mesh), vec![(3, 4), (6, 4)]);
        assert!(mesh.is_closed_manifold());
    }

    #[test]
    fn test_rectified_cube_is_cuboctahedron() {
        let mesh = build(Seed::C6, 1.0, 0.0, Snub::None, false);
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(histogram(&mesh), vec![(3, 8), (4, 6)]);
        assert!(mesh.is_on_sphere(2.0_f64.sqrt() / 3.0_f64.sqrt(), GEOMETRY_TOLERANCE));
    }

    #[test]
    fn test_bevelled_cube_is_truncated_cuboctahedron() {
        let mesh = build(Seed::C6, 1.0, 0.5, Snub::None, false);
        assert_eq!(mesh.vertex_count(), 48);
        assert_eq!(histogram(&mesh), vec![(4, 12), (6, 8), (8, 6)]);
        assert!(mesh.is_closed_manifold());
    }

    #[test]
    fn test_snub_cube() {
        for snub in [Snub::Left, Snub::Right] {
            let mesh = build(Seed::C6, 1.0, 0.5, snub, false);
            assert_eq!(mesh.vertex_count(), 24);
            assert_eq!(histogram(&mesh), vec![(3, 32), (4, 6)]);
            assert!(mesh.is_closed_manifold());
        }
    }

    #[test]
    fn test_full_vertex_truncation_is_mirrored_dual_seed() {
        let mesh = build(Seed::C6, 2.0, 0.0, Snub::None, false);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_count(), 8);
        // Scaled to the octahedron's first-face radius, 1/sqrt(3)
        assert!(mesh.is_on_sphere(1.0 / 3.0_f64.sqrt(), GEOMETRY_TOLERANCE));
        assert!(mesh.is_closed_manifold());
    }

    #[test]
    fn test_size_continuous_through_rectification() {
        for seed in Seed::ALL {
            let below = build(seed, 1.0 - 1e-6, 0.0, Snub::None, false);
            let above = build(seed, 1.0 + 1e-6, 0.0, Snub::None, false);
            assert_relative_eq!(
                below.vertices()[0].length(),
                above.vertices()[0].length(),
                epsilon = 1e-5
            );
        }
    }

    #[test]
    fn test_clamps_parameters() {
        assert_eq!(
            build(Seed::O8, 5.0, 0.0, Snub::None, false),
            build(Seed::O8, 2.0, 0.0, Snub::None, false)
        );
        assert_eq!(
            build(Seed::O8, f64::NAN, 0.0, Snub::None, false),
            Seed::O8.mesh()
        );
        assert_eq!(
            build(Seed::O8, 1.0, -3.0, Snub::None, false),
            build(Seed::O8, 1.0, 0.0, Snub::None, false)
        );
    }

    #[test]
    fn test_dual_of_rectified_cube_is_rhombic_dodecahedron() {
        let mesh = build(Seed::C6, 1.0, 0.0, Snub::None, true);
        assert_eq!(mesh.vertex_count(), 14);
        assert_eq!(histogram(&mesh), vec![(4, 12)]);
        // The last pole is rescaled onto the cube's first-face radius
        let last = mesh.vertices().last().map(|v| v.length()).unwrap();
        assert_relative_eq!(last, 1.0 / 3.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_mirror_flips_winding() {
        let mut mesh = Seed::T4.mesh();
        mirror(&mut mesh, 2.0);
        assert_eq!(mesh.face(0), &[2, 1, 0]);
        assert_relative_eq!(mesh.vertices()[0].z, -2.0);
    }
}
