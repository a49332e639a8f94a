//! Benchmarks for the finite-volume hot path.
//!
//! Run with: `cargo bench --bench step_bench`
//!
//! Measures the HLL interface-flux sweep on its own and the full
//! explicit step (fluxes + sources + interior update) at a few grid
//! sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use runoff2d::riemann::{interface_fluxes, SolverConfig};
use runoff2d::state::conserved_from_primitives;
use runoff2d::FiniteVolumeSolver;

/// Mildly varying wet state so the solver does real work everywhere.
fn wavy_fields(n: usize) -> (Array2<f64>, Array2<f64>, Array2<f64>, Array2<f64>) {
    let terrain = Array2::from_shape_fn((n, n), |(i, j)| {
        0.02 * (i as f64 * 0.3).sin() + 0.01 * j as f64
    });
    let h = Array2::from_shape_fn((n, n), |(i, j)| {
        1.0 + 0.2 * (i as f64 * 0.2).sin() * (j as f64 * 0.2).cos()
    });
    let u = Array2::from_shape_fn((n, n), |(i, _)| 0.3 * (i as f64 * 0.1).cos());
    let v = Array2::from_shape_fn((n, n), |(_, j)| 0.1 * (j as f64 * 0.1).sin());
    (terrain, h, u, v)
}

fn bench_interface_fluxes(c: &mut Criterion) {
    let mut group = c.benchmark_group("interface_fluxes");
    let config = SolverConfig::default();

    for n in [64usize, 128] {
        let (terrain, h, u, v) = wavy_fields(n);
        let state = conserved_from_primitives(&h, &u, &v);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let (fx, fy) =
                    interface_fluxes(black_box(&state), black_box(&terrain), &config);
                black_box((fx, fy))
            })
        });
    }

    group.finish();
}

fn bench_full_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver_step");

    for n in [64usize, 128] {
        let (terrain, h, u, v) = wavy_fields(n);
        let mut solver =
            FiniteVolumeSolver::new(terrain, 1.0, 1e-4, 10.0, SolverConfig::default())
                .and_then(|s| s.with_initial_conditions(&h, &u, &v))
                .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                solver.step();
                black_box(solver.steps_taken())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_interface_fluxes, bench_full_step);
criterion_main!(benches);
