//! Grid counts, topology and failure behaviour of both surface builders.

use std::f64::consts::{PI, TAU};

use approx::assert_relative_eq;
use extramesh_surface::{build_xyz, build_z, Sample, SurfaceError, UvRange, XyzSurfaceParams};

fn uv_surface(x: &str, y: &str, z: &str, u: UvRange, v: UvRange) -> XyzSurfaceParams {
    XyzSurfaceParams::new(x, y, z).with_u(u).with_v(v)
}

#[test]
fn test_z_grid_counts() {
    for (div_x, div_y) in [(3, 3), (3, 7), (16, 16), (40, 5)] {
        let mesh = build_z("sin(x)*cos(y)", div_x, div_y, 4.0, 3.0).unwrap();
        assert_eq!(mesh.vertex_count(), (div_x * div_y) as usize);
        assert_eq!(mesh.face_count(), ((div_x - 1) * (div_y - 1)) as usize);
        assert!(mesh.faces().iter().all(|f| f.len() == 4));
        assert!(mesh.validate().is_ok());
    }
}

#[test]
fn test_flat_z_surface_is_centered_rectangle() {
    let mesh = build_z("0", 5, 9, 3.0, 7.0).unwrap();
    let (min, max) = mesh.bounding_box();
    assert_relative_eq!(min.x, -1.5);
    assert_relative_eq!(max.x, 1.5);
    assert_relative_eq!(min.y, -3.5);
    assert_relative_eq!(max.y, 3.5);
    assert_eq!((min.z, max.z), (0.0, 0.0));
}

#[test]
fn test_scenario_paraboloid() {
    let mesh = build_z("x**2 + y**2", 3, 3, 2.0, 2.0).unwrap();
    assert_eq!(mesh.vertex_count(), 9);
    assert_eq!(mesh.face_count(), 4);
    for p in mesh.vertices() {
        assert_eq!(p.x, p.x.round());
        assert_eq!(p.y, p.y.round());
        assert_relative_eq!(p.z, p.x * p.x + p.y * p.y);
    }
}

#[test]
fn test_division_by_zero_returns_no_mesh() {
    let result = build_z("1/0", 3, 3, 1.0, 1.0);
    assert!(matches!(result, Err(SurfaceError::ExpressionEval { .. })));

    let params = uv_surface(
        "u",
        "v",
        "1/0",
        UvRange::new(0.0, 1.0, 2, false),
        UvRange::new(0.0, 1.0, 2, false),
    );
    assert!(matches!(
        build_xyz(&params),
        Err(SurfaceError::ExpressionEval { .. })
    ));
}

#[test]
fn test_names_outside_whitelist_fail_to_compile() {
    for equation in ["__import__('os')", "open(x)", "x.real", "y; x"] {
        let result = build_z(equation, 3, 3, 1.0, 1.0);
        assert!(
            matches!(result, Err(SurfaceError::ExpressionCompile { .. })),
            "{equation}: {result:?}"
        );
    }
}

#[test]
fn test_wrapped_u_vertex_count() {
    for (u_steps, v_steps) in [(3, 1), (8, 4), (32, 10)] {
        let params = uv_surface(
            "cos(u)",
            "sin(u)",
            "v",
            UvRange::new(0.0, TAU, u_steps, true),
            UvRange::new(0.0, 2.0, v_steps, false),
        );
        let mesh = &build_xyz(&params).unwrap()[0];
        assert_eq!(mesh.vertex_count(), (u_steps * (v_steps + 1)) as usize);
        assert_eq!(mesh.face_count(), (u_steps * v_steps) as usize);
    }
}

#[test]
fn test_torus_is_closed() {
    let params = uv_surface(
        "(2 + cos(v))*cos(u)",
        "(2 + cos(v))*sin(u)",
        "sin(v)",
        UvRange::new(0.0, TAU, 12, true),
        UvRange::new(0.0, TAU, 8, true),
    );
    let mesh = &build_xyz(&params).unwrap()[0];
    assert_eq!(mesh.vertex_count(), 96);
    assert_eq!(mesh.face_count(), 96);
    assert!(mesh.faces().iter().all(|f| f.len() == 4));
    assert!(mesh.is_closed_manifold());
}

#[test]
fn test_scenario_tube() {
    let params = uv_surface(
        "cos(u)",
        "sin(u)",
        "v",
        UvRange::new(0.0, TAU, 8, true),
        UvRange::new(0.0, 1.0, 1, false),
    );
    let meshes = build_xyz(&params).unwrap();
    assert_eq!(meshes.len(), 1);
    assert_eq!(meshes[0].vertex_count(), 16);
    assert_eq!(meshes[0].face_count(), 8);
}

#[test]
fn test_scenario_closed_sphere() {
    let params = uv_surface(
        "sin(2*pi*u)*sin(pi*v)",
        "cos(2*pi*u)*sin(pi*v)",
        "cos(pi*v)",
        UvRange::new(0.0, 1.0, 16, true),
        UvRange::new(0.0, 1.0, 16, true),
    );
    let mesh = &build_xyz(&params).unwrap()[0];
    assert_eq!(mesh.vertex_count(), 256);
    assert_eq!(mesh.face_count(), 256);
    assert!(mesh.faces().iter().all(|f| f.len() == 4));
    assert!(mesh.is_on_sphere(1.0, 1e-9));
}

#[test]
fn test_capped_cylinder_is_closed() {
    let params = uv_surface(
        "cos(u)",
        "sin(u)",
        "v",
        UvRange::new(0.0, TAU, 16, true),
        UvRange::new(0.0, 3.0, 5, false),
    )
    .with_close_v(true);
    let mesh = &build_xyz(&params).unwrap()[0];
    assert_eq!(mesh.face_count(), 16 * 5 + 2 * 14);
    assert!(mesh.is_closed_manifold());

    let center = glam::DVec3::new(0.0, 0.0, 1.5);
    for index in 0..mesh.face_count() {
        let outward = mesh.face_normal(index).dot(mesh.face_centroid(index) - center);
        assert!(outward > 0.0, "face {index}");
    }
}

#[test]
fn test_snail_shell_range_accepted() {
    let params = uv_surface(
        "1.2**v*(sin(u)**2*sin(v))",
        "1.2**v*(sin(u)*cos(u))",
        "1.2**v*(sin(u)**2*cos(v))",
        UvRange::new(0.0, PI, 16, false),
        UvRange::new(-PI / 4.0, 5.0 * PI / 2.0, 32, false),
    );
    let mesh = &build_xyz(&params).unwrap()[0];
    assert_eq!(mesh.vertex_count(), 17 * 33);
}

#[test]
fn test_n_sequence_offsets_objects() {
    let params = uv_surface(
        "cos(u) + 3*n",
        "sin(u)",
        "v",
        UvRange::new(0.0, TAU, 6, true),
        UvRange::new(0.0, 1.0, 2, false),
    )
    .with_n_count(4);
    let meshes = build_xyz(&params).unwrap();
    assert_eq!(meshes.len(), 4);
    for (n, mesh) in meshes.iter().enumerate() {
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!((min.x + max.x) / 2.0, 3.0 * n as f64, epsilon = 1e-9);
    }
}

#[test]
fn test_eval_error_names_sample() {
    let params = uv_surface(
        "sqrt(v - 0.5)",
        "u",
        "0",
        UvRange::new(0.0, 1.0, 1, false),
        UvRange::new(0.0, 1.0, 2, false),
    );
    match build_xyz(&params) {
        Err(SurfaceError::ExpressionEval { label, sample, .. }) => {
            assert_eq!(label, "x");
            assert_eq!(sample, Sample::Uv { u: 0.0, v: 0.0, n: 0 });
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_invalid_xyz_grids() {
    let base = uv_surface(
        "u",
        "v",
        "0",
        UvRange::new(0.0, 1.0, 4, false),
        UvRange::new(0.0, 1.0, 4, false),
    );
    let bad = [
        base.clone().with_u(UvRange::new(0.0, 1.0, 0, false)),
        base.clone().with_v(UvRange::new(0.0, 1.0, 1, true)),
        base.clone().with_v(UvRange::new(1.0, 2.0, 4, false)),
        base.clone().with_n_count(0),
    ];
    for params in bad {
        assert!(matches!(
            build_xyz(&params),
            Err(SurfaceError::InvalidGrid { .. })
        ));
    }
    assert_eq!(
        build_xyz(&XyzSurfaceParams::new("u", "", "0")),
        Err(SurfaceError::EmptyEquation { label: "y" })
    );
}
