//! End-to-end tests of the finite-volume solver: conservation and
//! symmetry properties a correct scheme must satisfy, plus the shape
//! contracts of the reconstruction views.

use ndarray::{s, Array2, Array3};

use runoff2d::{
    interface_views_2d, interface_views_3d, interface_views_dyn, rain_rate, run_finite_volume,
    FiniteVolumeSolver, SolverConfig, SolverError,
};

#[test]
fn flat_dry_domain_stays_at_rest() {
    let mut solver = FiniteVolumeSolver::new(
        Array2::zeros((8, 8)),
        1.0,
        0.01,
        0.0,
        SolverConfig::default(),
    )
    .unwrap();
    solver.run(20);

    // No terrain gradient, no rain, no initial water: the raw depth
    // must be exactly zero everywhere, not merely small.
    let h = solver.depth_field();
    assert!(h.iter().all(|&x| x == 0.0));

    let state = solver.state();
    assert!(state.iter().all(|s| s.hu == 0.0 && s.hv == 0.0));
}

#[test]
fn lake_at_rest_is_preserved() {
    // Uniform depth over uniform terrain: slope gradients vanish, all
    // interfaces see identical neighbors, so nothing moves.
    let depth = 0.7;
    let terrain = Array2::from_elem((7, 9), 3.0);
    let h0 = Array2::from_elem((7, 9), depth);
    let zeros = Array2::zeros((7, 9));

    let mut solver =
        FiniteVolumeSolver::new(terrain, 0.5, 0.01, 0.0, SolverConfig::default())
            .unwrap()
            .with_initial_conditions(&h0, &zeros, &zeros)
            .unwrap();

    let mass_before = solver.total_mass();
    solver.run(50);

    let (h, u, v) = solver.primitive_fields();
    assert!(h.iter().all(|&x| (x - depth).abs() < 1e-12));
    assert!(u.iter().all(|&x| x.abs() < 1e-12));
    assert!(v.iter().all(|&x| x.abs() < 1e-12));
    assert!((solver.total_mass() - mass_before).abs() < 1e-12);
}

#[test]
fn rain_accumulates_at_the_forcing_rate() {
    let dt = 0.1;
    let steps = 25;
    let rain_mm_per_h = 36.0;
    let mut solver = FiniteVolumeSolver::new(
        Array2::zeros((10, 10)),
        1.0,
        dt,
        rain_mm_per_h,
        SolverConfig::default(),
    )
    .unwrap();
    solver.run(steps);

    let expected = steps as f64 * dt * rain_rate(rain_mm_per_h);
    let h = solver.depth_field();
    let interior = h.slice(s![1..-1, 1..-1]);
    let mean = interior.sum() / interior.len() as f64;
    assert!(
        (mean - expected).abs() < 0.01 * expected,
        "mean interior depth {mean:.3e}, expected {expected:.3e}"
    );
}

#[test]
fn transposed_terrain_transposes_the_flow() {
    // A terrain symmetric under transposition must give a transposed
    // flow field: h symmetric, u and v swapped.
    let n = 9;
    let center = (n - 1) as f64 / 2.0;
    let bowl = Array2::from_shape_fn((n, n), |(i, j)| {
        let (di, dj) = (i as f64 - center, j as f64 - center);
        0.01 * (di * di + dj * dj)
    });

    let mut solver =
        FiniteVolumeSolver::new(bowl, 1.0, 0.005, 20.0, SolverConfig::default()).unwrap();
    solver.run(40);

    let (h, u, v) = solver.primitive_fields();
    for i in 0..n {
        for j in 0..n {
            assert!(
                (h[[i, j]] - h[[j, i]]).abs() < 1e-12,
                "depth asymmetry at ({i}, {j})"
            );
            assert!(
                (u[[i, j]] - v[[j, i]]).abs() < 1e-12,
                "velocity asymmetry at ({i}, {j})"
            );
        }
    }
}

#[test]
fn sloped_rainfall_stays_finite_and_wet() {
    let terrain = Array2::from_shape_fn((12, 12), |(_, j)| 0.05 * j as f64);
    let (h, u, v) = run_finite_volume(0.005, 1.0, terrain, 200, 10.0).unwrap();

    assert!(h.iter().all(|&x| x >= 0.0 && x.is_finite()));
    assert!(u.iter().all(|&x| x.is_finite()));
    assert!(v.iter().all(|&x| x.is_finite()));

    // Rain has fallen on the interior, so some depth must be present.
    let interior = h.slice(s![1..-1, 1..-1]);
    assert!(interior.iter().any(|&x| x > 1e-7));
}

#[test]
fn convenience_runner_matches_quiescent_expectations() {
    let (h, u, v) = run_finite_volume(0.01, 1.0, Array2::zeros((3, 3)), 5, 0.0).unwrap();
    assert_eq!(h.dim(), (3, 3));
    // Reported primitives are floored, so "dry" reads as the floor.
    assert!(h.iter().all(|&x| x < 1e-7));
    assert!(u.iter().all(|&x| x.abs() < 1e-12));
    assert!(v.iter().all(|&x| x.abs() < 1e-12));
}

#[test]
fn rejects_degenerate_inputs() {
    let err = run_finite_volume(0.01, 1.0, Array2::zeros((2, 2)), 1, 0.0).unwrap_err();
    assert!(matches!(err, SolverError::GridTooSmall { .. }));

    let err = run_finite_volume(-0.01, 1.0, Array2::zeros((4, 4)), 1, 0.0).unwrap_err();
    assert!(matches!(err, SolverError::InvalidTimeStep(_)));
}

#[test]
fn interface_view_shape_contracts() {
    let field = Array2::<f64>::zeros((5, 7));
    let views = interface_views_2d(field.view());
    assert_eq!(views.x_left.dim(), (4, 6));
    assert_eq!(views.y_right.dim(), (4, 6));

    let field3 = Array3::<f64>::zeros((3, 5, 7));
    let views3 = interface_views_3d(field3.view());
    assert_eq!(views3.x_right.dim(), (3, 4, 6));

    let dynamic = interface_views_dyn(field.view().into_dyn()).unwrap();
    assert_eq!(dynamic.x_left.shape(), &[4, 6]);

    let bad = ndarray::Array1::<f64>::zeros(5);
    assert!(matches!(
        interface_views_dyn(bad.view().into_dyn()),
        Err(SolverError::UnsupportedRank(1))
    ));
}
