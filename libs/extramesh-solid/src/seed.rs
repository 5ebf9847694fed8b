//! # Platonic Seeds
//!
//! The five regular solids every other form is derived from. All seeds are
//! inscribed in the unit sphere and wound counter-clockwise seen from
//! outside.

use std::fmt;
use std::str::FromStr;

use extramesh_mesh::Mesh;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::SolidError;

/// One of the five Platonic solids, named by its face count.
///
/// ## Example
///
/// ```rust
/// use extramesh_solid::Seed;
///
/// let seed: Seed = "12".parse().unwrap();
/// assert_eq!(seed, Seed::D12);
/// assert_eq!(seed.dual(), Seed::I20);
/// assert_eq!(seed.mesh().vertex_count(), 20);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seed {
    /// Tetrahedron
    #[default]
    T4,
    /// Hexahedron (cube)
    C6,
    /// Octahedron
    O8,
    /// Dodecahedron
    D12,
    /// Icosahedron
    I20,
}

impl Seed {
    /// All seeds in face-count order.
    pub const ALL: [Seed; 5] = [Seed::T4, Seed::C6, Seed::O8, Seed::D12, Seed::I20];

    /// Numeric tag (`"4"`, `"6"`, `"8"`, `"12"`, `"20"`).
    pub fn tag(self) -> &'static str {
        match self {
            Seed::T4 => "4",
            Seed::C6 => "6",
            Seed::O8 => "8",
            Seed::D12 => "12",
            Seed::I20 => "20",
        }
    }

    /// Common name of the solid.
    pub fn name(self) -> &'static str {
        match self {
            Seed::T4 => "tetrahedron",
            Seed::C6 => "hexahedron",
            Seed::O8 => "octahedron",
            Seed::D12 => "dodecahedron",
            Seed::I20 => "icosahedron",
        }
    }

    /// The Platonic dual. The tetrahedron is self-dual.
    pub fn dual(self) -> Seed {
        match self {
            Seed::T4 => Seed::T4,
            Seed::C6 => Seed::O8,
            Seed::O8 => Seed::C6,
            Seed::D12 => Seed::I20,
            Seed::I20 => Seed::D12,
        }
    }

    pub fn vertex_count(self) -> usize {
        match self {
            Seed::T4 => 4,
            Seed::C6 => 8,
            Seed::O8 => 6,
            Seed::D12 => 20,
            Seed::I20 => 12,
        }
    }

    pub fn face_count(self) -> usize {
        match self {
            Seed::T4 => 4,
            Seed::C6 => 6,
            Seed::O8 => 8,
            Seed::D12 => 12,
            Seed::I20 => 20,
        }
    }

    pub fn edge_count(self) -> usize {
        // Euler: V - E + F = 2
        self.vertex_count() + self.face_count() - 2
    }

    /// Number of sides of every face.
    pub fn face_sides(self) -> usize {
        match self {
            Seed::C6 => 4,
            Seed::D12 => 5,
            Seed::T4 | Seed::O8 | Seed::I20 => 3,
        }
    }

    /// Builds the seed mesh on the unit sphere.
    pub fn mesh(self) -> Mesh {
        let (vertices, faces): (Vec<DVec3>, &[&[u32]]) = match self {
            Seed::T4 => (tetrahedron_vertices(), TETRAHEDRON_FACES),
            Seed::C6 => (hexahedron_vertices(), HEXAHEDRON_FACES),
            Seed::O8 => (octahedron_vertices(), OCTAHEDRON_FACES),
            Seed::D12 => (dodecahedron_vertices(), DODECAHEDRON_FACES),
            Seed::I20 => (icosahedron_vertices(), ICOSAHEDRON_FACES),
        };

        let mut mesh = Mesh::with_capacity(vertices.len(), faces.len());
        mesh.extend_vertices(vertices);
        mesh.extend_faces(faces.iter().map(|face| face.to_vec()));
        mesh
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Seed {
    type Err = SolidError;

    /// Accepts the numeric tag, the short form (`"C6"`) or the solid's name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Seed::ALL
            .into_iter()
            .find(|seed| {
                tag == seed.tag()
                    || tag.eq_ignore_ascii_case(&format!("{seed:?}"))
                    || tag.eq_ignore_ascii_case(seed.name())
            })
            .ok_or_else(|| SolidError::unknown_seed(s))
    }
}

// =============================================================================
// COORDINATES
// =============================================================================

fn tetrahedron_vertices() -> Vec<DVec3> {
    let s = 2.0_f64.sqrt() / 3.0;
    let t = -1.0 / 3.0;
    let u = 6.0_f64.sqrt() / 3.0;
    vec![
        DVec3::new(0.0, 0.0, 1.0),
        DVec3::new(2.0 * s, 0.0, t),
        DVec3::new(-s, u, t),
        DVec3::new(-s, -u, t),
    ]
}

const TETRAHEDRON_FACES: &[&[u32]] = &[&[0, 1, 2], &[0, 2, 3], &[0, 3, 1], &[1, 3, 2]];

fn hexahedron_vertices() -> Vec<DVec3> {
    let s = 1.0 / 3.0_f64.sqrt();
    vec![
        DVec3::new(-s, -s, -s),
        DVec3::new(s, -s, -s),
        DVec3::new(s, s, -s),
        DVec3::new(-s, s, -s),
        DVec3::new(-s, -s, s),
        DVec3::new(s, -s, s),
        DVec3::new(s, s, s),
        DVec3::new(-s, s, s),
    ]
}

const HEXAHEDRON_FACES: &[&[u32]] = &[
    &[0, 3, 2, 1],
    &[0, 1, 5, 4],
    &[0, 4, 7, 3],
    &[6, 5, 1, 2],
    &[6, 2, 3, 7],
    &[6, 7, 4, 5],
];

fn octahedron_vertices() -> Vec<DVec3> {
    vec![
        DVec3::X,
        DVec3::NEG_X,
        DVec3::Y,
        DVec3::NEG_Y,
        DVec3::Z,
        DVec3::NEG_Z,
    ]
}

const OCTAHEDRON_FACES: &[&[u32]] = &[
    &[4, 0, 2],
    &[4, 2, 1],
    &[4, 1, 3],
    &[4, 3, 0],
    &[5, 2, 0],
    &[5, 1, 2],
    &[5, 3, 1],
    &[5, 0, 3],
];

fn dodecahedron_vertices() -> Vec<DVec3> {
    let sqrt5 = 5.0_f64.sqrt();
    let s = 1.0 / 3.0_f64.sqrt();
    let t = ((3.0 - sqrt5) / 6.0).sqrt();
    let u = ((3.0 + sqrt5) / 6.0).sqrt();
    vec![
        DVec3::new(s, s, s),
        DVec3::new(s, s, -s),
        DVec3::new(s, -s, s),
        DVec3::new(s, -s, -s),
        DVec3::new(-s, s, s),
        DVec3::new(-s, s, -s),
        DVec3::new(-s, -s, s),
        DVec3::new(-s, -s, -s),
        DVec3::new(t, u, 0.0),
        DVec3::new(-t, u, 0.0),
        DVec3::new(t, -u, 0.0),
        DVec3::new(-t, -u, 0.0),
        DVec3::new(u, 0.0, t),
        DVec3::new(u, 0.0, -t),
        DVec3::new(-u, 0.0, t),
        DVec3::new(-u, 0.0, -t),
        DVec3::new(0.0, t, u),
        DVec3::new(0.0, -t, u),
        DVec3::new(0.0, t, -u),
        DVec3::new(0.0, -t, -u),
    ]
}

const DODECAHEDRON_FACES: &[&[u32]] = &[
    &[0, 8, 9, 4, 16],
    &[0, 12, 13, 1, 8],
    &[0, 16, 17, 2, 12],
    &[8, 1, 18, 5, 9],
    &[12, 2, 10, 3, 13],
    &[16, 4, 14, 6, 17],
    &[9, 5, 15, 14, 4],
    &[6, 11, 10, 2, 17],
    &[3, 19, 18, 1, 13],
    &[7, 15, 5, 18, 19],
    &[7, 11, 6, 14, 15],
    &[7, 19, 3, 10, 11],
];

fn icosahedron_vertices() -> Vec<DVec3> {
    // Golden rectangle corners, normalized onto the unit sphere
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let norm = (1.0 + phi * phi).sqrt();
    let s = phi / norm;
    let t = 1.0 / norm;
    vec![
        DVec3::new(s, t, 0.0),
        DVec3::new(-s, t, 0.0),
        DVec3::new(s, -t, 0.0),
        DVec3::new(-s, -t, 0.0),
        DVec3::new(t, 0.0, s),
        DVec3::new(t, 0.0, -s),
        DVec3::new(-t, 0.0, s),
        DVec3::new(-t, 0.0, -s),
        DVec3::new(0.0, s, t),
        DVec3::new(0.0, -s, t),
        DVec3::new(0.0, s, -t),
        DVec3::new(0.0, -s, -t),
    ]
}

const ICOSAHEDRON_FACES: &[&[u32]] = &[
    &[0, 8, 4],
    &[0, 5, 10],
    &[2, 4, 9],
    &[2, 11, 5],
    &[1, 6, 8],
    &[1, 10, 7],
    &[3, 9, 6],
    &[3, 7, 11],
    &[0, 10, 8],
    &[1, 8, 10],
    &[2, 9, 11],
    &[3, 11, 9],
    &[4, 2, 0],
    &[5, 0, 2],
    &[6, 1, 3],
    &[7, 3, 1],
    &[8, 6, 4],
    &[9, 4, 6],
    &[10, 5, 7],
    &[11, 7, 5],
];

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use config::constants::GEOMETRY_TOLERANCE;

    #[test]
    fn test_counts_match_mesh() {
        for seed in Seed::ALL {
            let mesh = seed.mesh();
            assert_eq!(mesh.vertex_count(), seed.vertex_count(), "{seed:?}");
            assert_eq!(mesh.face_count(), seed.face_count(), "{seed:?}");
            assert_eq!(mesh.edge_count(), seed.edge_count(), "{seed:?}");
            assert!(mesh.faces().iter().all(|f| f.len() == seed.face_sides()));
        }
    }

    #[test]
    fn test_seeds_on_unit_sphere() {
        for seed in Seed::ALL {
            assert!(seed.mesh().is_on_sphere(1.0, GEOMETRY_TOLERANCE), "{seed:?}");
        }
    }

    #[test]
    fn test_seeds_closed_and_outward() {
        for seed in Seed::ALL {
            let mesh = seed.mesh();
            assert!(mesh.validate().is_ok());
            assert!(mesh.is_closed_manifold(), "{seed:?}");
            for index in 0..mesh.face_count() {
                let outward = mesh.face_normal(index).dot(mesh.face_centroid(index));
                assert!(outward > 0.0, "{seed:?} face {index} points inward");
            }
        }
    }

    #[test]
    fn test_dual_is_involution() {
        for seed in Seed::ALL {
            assert_eq!(seed.dual().dual(), seed);
            assert_eq!(seed.dual().face_count(), seed.vertex_count());
        }
    }

    #[test]
    fn test_parse_tags_and_names() {
        assert_eq!("4".parse::<Seed>(), Ok(Seed::T4));
        assert_eq!("c6".parse::<Seed>(), Ok(Seed::C6));
        assert_eq!("Octahedron".parse::<Seed>(), Ok(Seed::O8));
        assert_eq!(" 20 ".parse::<Seed>(), Ok(Seed::I20));
        assert_eq!(Seed::D12.to_string(), "12");
    }

    #[test]
    fn test_parse_unknown() {
        for tag in ["", "5", "cube", "T5"] {
            assert_eq!(tag.parse::<Seed>(), Err(SolidError::unknown_seed(tag)));
        }
    }
}
