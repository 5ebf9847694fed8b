//! # Solid Presets
//!
//! Named Platonic, Archimedean and Catalan solids with closed-form
//! parameters.
//!
//! A regular truncation of a solid with `p`-gon faces cuts each edge at
//! `1 / (2 + 2cos(π/p))` from both ends, which makes every edge of the
//! result the same length. The Catalan forms are the duals of the
//! truncations and rectifications.

use std::f64::consts::PI;

use serde::Serialize;

use crate::params::SolidParams;
use crate::seed::Seed;

/// A named parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolidPreset {
    pub name: &'static str,
    pub params: SolidParams,
}

/// Vertex truncation that turns the `p`-gon faces of a seed into regular
/// `2p`-gons.
pub fn regular_truncation(seed: Seed) -> f64 {
    let p = seed.face_sides() as f64;
    2.0 / (2.0 + 2.0 * (PI / p).cos())
}

const TRUNCATED: [(&str, &str, Seed); 5] = [
    ("truncated_tetrahedron", "triakis_tetrahedron", Seed::T4),
    ("truncated_cube", "triakis_octahedron", Seed::C6),
    ("truncated_octahedron", "tetrakis_hexahedron", Seed::O8),
    ("truncated_dodecahedron", "triakis_icosahedron", Seed::D12),
    ("truncated_icosahedron", "pentakis_dodecahedron", Seed::I20),
];

const RECTIFIED: [(&str, &str, Seed); 2] = [
    ("cuboctahedron", "rhombic_dodecahedron", Seed::C6),
    ("icosidodecahedron", "rhombic_triacontahedron", Seed::D12),
];

/// Every preset: the Platonic seeds, then the truncations, the
/// rectifications and the Catalan duals.
pub fn presets() -> Vec<SolidPreset> {
    let mut presets: Vec<SolidPreset> = Seed::ALL
        .into_iter()
        .map(|seed| SolidPreset {
            name: seed.name(),
            params: SolidParams::new(seed),
        })
        .collect();

    let truncations = TRUNCATED
        .iter()
        .map(|&(name, dual, seed)| (name, dual, seed, regular_truncation(seed)));
    let rectifications = RECTIFIED
        .iter()
        .map(|&(name, dual, seed)| (name, dual, seed, 1.0));
    let archimedean: Vec<_> = truncations.chain(rectifications).collect();

    for &(name, _, seed, vertex_truncation) in &archimedean {
        presets.push(SolidPreset {
            name,
            params: SolidParams::new(seed).with_truncation(vertex_truncation, 0.0),
        });
    }
    for &(_, dual, seed, vertex_truncation) in &archimedean {
        presets.push(SolidPreset {
            name: dual,
            params: SolidParams::new(seed)
                .with_truncation(vertex_truncation, 0.0)
                .with_dual(true),
        });
    }
    presets
}

/// Looks up a preset by name.
///
/// ```rust
/// use extramesh_solid::{generate, preset};
///
/// let params = preset("truncated_icosahedron").unwrap();
/// let mesh = generate(&params).unwrap();
/// assert_eq!(mesh.vertex_count(), 60);
/// ```
pub fn preset(name: &str) -> Option<SolidParams> {
    presets()
        .into_iter()
        .find(|preset| preset.name == name)
        .map(|preset| preset.params)
}

// =============================================================================
// TESTS
// =============================================================================
