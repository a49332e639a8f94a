//! Explicit finite-volume time integration.
//!
//! One step: interface fluxes from the current state, cell-centered
//! sources from the current depth, then a single interior update
//!
//!   U[int] += -dt/dx·Δx(Fx) - dt/dx·Δy(Fy) + dt·S
//!
//! The one-cell perimeter is never written; it stays at rest and acts
//! as the boundary. All reads of the old state complete before any
//! write, so the step has whole-grid semantics.
//!
//! There is no CFL check: the caller supplies dt and is responsible
//! for stability. The depth floor and the HLL regularizer absorb
//! numerical degeneracy silently.

use ndarray::{s, Array2, Zip};

use crate::error::SolverError;
use crate::riemann::{interface_fluxes, SolverConfig};
use crate::source::{cell_source, rain_rate};
use crate::state::{self, FlowState};

/// Explicit finite-volume solver for rainfall-runoff over terrain.
///
/// Owns the conserved state between steps; derived fields (primitives,
/// interface states, fluxes, sources) are recomputed fresh each step
/// and discarded.
#[derive(Debug)]
pub struct FiniteVolumeSolver {
    terrain: Array2<f64>,
    dx: f64,
    dt: f64,
    rain_m_s: f64,
    config: SolverConfig,
    state: Array2<FlowState>,
    steps_taken: usize,
}

impl FiniteVolumeSolver {
    /// Create a solver with the water initially at rest.
    ///
    /// # Errors
    ///
    /// Fails if the terrain has fewer than 3 rows or columns (the
    /// interior update needs a one-cell perimeter), or if `dx` or `dt`
    /// is not positive.
    pub fn new(
        terrain: Array2<f64>,
        dx: f64,
        dt: f64,
        rain_mm_per_h: f64,
        config: SolverConfig,
    ) -> Result<Self, SolverError> {
        let (rows, cols) = terrain.dim();
        if rows < 3 || cols < 3 {
            return Err(SolverError::GridTooSmall { rows, cols });
        }
        if dx <= 0.0 {
            return Err(SolverError::InvalidSpacing(dx));
        }
        if dt <= 0.0 {
            return Err(SolverError::InvalidTimeStep(dt));
        }

        let state = state::rest((rows, cols));
        Ok(Self {
            terrain,
            dx,
            dt,
            rain_m_s: rain_rate(rain_mm_per_h),
            config,
            state,
            steps_taken: 0,
        })
    }

    /// Replace the initial fields (same shape as the terrain).
    ///
    /// # Errors
    ///
    /// Fails if any field shape differs from the terrain shape.
    pub fn with_initial_conditions(
        mut self,
        h: &Array2<f64>,
        u: &Array2<f64>,
        v: &Array2<f64>,
    ) -> Result<Self, SolverError> {
        let expected = self.terrain.dim();
        for got in [h.dim(), u.dim(), v.dim()] {
            if got != expected {
                return Err(SolverError::FieldShapeMismatch { expected, got });
            }
        }
        self.state = state::conserved_from_primitives(h, u, v);
        Ok(self)
    }

    /// Advance one time step.
    pub fn step(&mut self) {
        let (fx, fy) = interface_fluxes(&self.state, &self.terrain, &self.config);
        let h = self.state.mapv(|s| s.primitives(self.config.h_floor).0);
        let src = cell_source(
            self.dx,
            self.terrain.view(),
            h.view(),
            self.rain_m_s,
            self.config.g,
        );

        let r = self.dt / self.dx;
        let dt = self.dt;

        // Interior cells only; the perimeter keeps its previous value.
        let mut interior = self.state.slice_mut(s![1..-1, 1..-1]);
        Zip::from(&mut interior)
            .and(fx.slice(s![..-1, 1..]))
            .and(fx.slice(s![..-1, ..-1]))
            .and(fy.slice(s![1.., ..-1]))
            .and(fy.slice(s![..-1, ..-1]))
            .and(&src)
            .for_each(|u, &fx_e, &fx_w, &fy_n, &fy_s, &s| {
                *u = *u + (fx_e - fx_w) * (-r) + (fy_n - fy_s) * (-r) + s * dt;
            });

        self.steps_taken += 1;
        log::debug!(
            "step {}: total mass = {:.6e}",
            self.steps_taken,
            self.total_mass()
        );
    }

    /// Run a fixed number of steps. No convergence check and no
    /// adaptive step-size control.
    pub fn run(&mut self, iterations: usize) {
        for _ in 0..iterations {
            self.step();
        }
    }

    /// Total water mass: the sum of the floored depth over all cells.
    pub fn total_mass(&self) -> f64 {
        self.state
            .iter()
            .map(|s| s.h.max(self.config.h_floor))
            .sum()
    }

    /// The terrain elevation grid.
    pub fn terrain(&self) -> &Array2<f64> {
        &self.terrain
    }

    /// The conserved state field.
    pub fn state(&self) -> &Array2<FlowState> {
        &self.state
    }

    /// Raw (un-floored) depth field. Stays exactly zero in the
    /// no-forcing scenarios, unlike the floored primitive depth.
    pub fn depth_field(&self) -> Array2<f64> {
        state::depth_field(&self.state)
    }

    /// Final primitive fields (h, u, v), floored depth.
    pub fn primitive_fields(&self) -> (Array2<f64>, Array2<f64>, Array2<f64>) {
        state::primitive_fields(&self.state, self.config.h_floor)
    }

    /// Number of steps taken so far.
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }
}

/// Run a full finite-volume simulation from rest.
///
/// Advances `iterations` explicit steps of size `dt` on a uniform grid
/// with spacing `dx`, applying a uniform rainfall of `rain_mm_per_h`,
/// and returns the final (h, u, v) fields with the same shape as
/// `terrain`. Perimeter cells start at rest and are never updated.
///
/// # Errors
///
/// Fails on a terrain smaller than 3x3 or non-positive `dx`/`dt`.
pub fn run_finite_volume(
    dt: f64,
    dx: f64,
    terrain: Array2<f64>,
    iterations: usize,
    rain_mm_per_h: f64,
) -> Result<(Array2<f64>, Array2<f64>, Array2<f64>), SolverError> {
    let mut solver =
        FiniteVolumeSolver::new(terrain, dx, dt, rain_mm_per_h, SolverConfig::default())?;
    solver.run(iterations);
    Ok(solver.primitive_fields())
}
