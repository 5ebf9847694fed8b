//! # Surface Presets
//!
//! The classic parametric examples: a unit sphere, a snail shell and the
//! default twisted horn.

use std::f64::consts::PI;

use serde::Serialize;

use crate::params::{UvRange, XyzSurfaceParams};

/// A named XYZ surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfacePreset {
    pub name: &'static str,
    pub params: XyzSurfaceParams,
}

fn sphere() -> XyzSurfaceParams {
    XyzSurfaceParams::new(
        "sin(2*pi*u)*sin(pi*v)",
        "cos(2*pi*u)*sin(pi*v)",
        "cos(pi*v)",
    )
    .with_u(UvRange::new(0.0, 1.0, 32, true))
    .with_v(UvRange::new(0.0, 1.0, 16, false))
}

fn snail_shell() -> XyzSurfaceParams {
    XyzSurfaceParams::new(
        "1.2**v*(sin(u)**2*sin(v))",
        "1.2**v*(sin(u)*cos(u))",
        "1.2**v*(sin(u)**2*cos(v))",
    )
    .with_u(UvRange::new(0.0, PI, 32, false))
    .with_v(UvRange::new(-PI / 4.0, 5.0 * PI / 2.0, 64, false))
}

/// Every surface preset.
pub fn presets() -> Vec<SurfacePreset> {
    vec![
        SurfacePreset {
            name: "sphere",
            params: sphere(),
        },
        SurfacePreset {
            name: "snail_shell",
            params: snail_shell(),
        },
        SurfacePreset {
            name: "twisted_horn",
            params: XyzSurfaceParams::default(),
        },
    ]
}

/// Looks up a preset by name.
pub fn preset(name: &str) -> Option<XyzSurfaceParams> {
    presets()
        .into_iter()
        .find(|preset| preset.name == name)
        .map(|preset| preset.params)
}

// =============================================================================
// TESTS
// =============================================================================
