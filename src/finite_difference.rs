//! Centered-difference baseline with periodic boundaries.
//!
//! A naive scheme kept for comparison against the finite-volume solver:
//! primitive fields (h, u, v) updated directly with centered differences
//! and wrap-around neighbor access. No Riemann solver, no flux limiting,
//! no conserved-variable formulation. It shares no update logic with
//! [`crate::FiniteVolumeSolver`].

use ndarray::{Array2, Axis, Slice};

use crate::error::SolverError;
use crate::source::rain_rate;

/// Cyclic shift of a field along an axis.
///
/// `roll(f, 1, axis)` moves every element one slot toward higher
/// indices, wrapping the last slot around to the first.
pub fn roll(field: &Array2<f64>, shift: isize, axis: Axis) -> Array2<f64> {
    let len = field.len_of(axis);
    let shift = shift.rem_euclid(len as isize) as usize;
    if shift == 0 {
        return field.clone();
    }

    let mut out = Array2::zeros(field.dim());
    out.slice_axis_mut(axis, Slice::from(shift..))
        .assign(&field.slice_axis(axis, Slice::from(..len - shift)));
    out.slice_axis_mut(axis, Slice::from(..shift))
        .assign(&field.slice_axis(axis, Slice::from(len - shift..)));
    out
}

/// Periodic centered-difference solver over primitive fields.
#[derive(Debug)]
pub struct FiniteDifferenceSolver {
    terrain: Array2<f64>,
    dx: f64,
    dy: f64,
    dt: f64,
    rain_m_s: f64,
    g: f64,
    h: Array2<f64>,
    u: Array2<f64>,
    v: Array2<f64>,
}

impl FiniteDifferenceSolver {
    /// Create a solver with the water initially at rest.
    ///
    /// # Errors
    ///
    /// Fails on a terrain smaller than 3x3 (the centered stencil is
    /// degenerate below that) or non-positive `dx`/`dy`/`dt`.
    pub fn new(
        terrain: Array2<f64>,
        dx: f64,
        dy: f64,
        dt: f64,
        rain_mm_per_h: f64,
        g: f64,
    ) -> Result<Self, SolverError> {
        let (rows, cols) = terrain.dim();
        if rows < 3 || cols < 3 {
            return Err(SolverError::GridTooSmall { rows, cols });
        }
        if dx <= 0.0 {
            return Err(SolverError::InvalidSpacing(dx));
        }
        if dy <= 0.0 {
            return Err(SolverError::InvalidSpacing(dy));
        }
        if dt <= 0.0 {
            return Err(SolverError::InvalidTimeStep(dt));
        }

        let shape = terrain.dim();
        Ok(Self {
            terrain,
            dx,
            dy,
            dt,
            rain_m_s: rain_rate(rain_mm_per_h),
            g,
            h: Array2::zeros(shape),
            u: Array2::zeros(shape),
            v: Array2::zeros(shape),
        })
    }

    /// Advance one periodic-boundary time step.
    pub fn step(&mut self) {
        let dt = self.dt;
        let (dx, dy) = (self.dx, self.dy);
        let g = self.g;

        // Terrain slope, centered with wrap-around.
        let zx = (roll(&self.terrain, -1, Axis(1)) - roll(&self.terrain, 1, Axis(1)))
            / (2.0 * dx);
        let zy = (roll(&self.terrain, -1, Axis(0)) - roll(&self.terrain, 1, Axis(0)))
            / (2.0 * dy);

        let uh = &self.u * &self.h;
        let vh = &self.v * &self.h;
        let uuh = &self.u * &uh;
        let uvh = &self.u * &vh;
        let vvh = &self.v * &vh;

        // Continuity with the rain contribution.
        let mut h_new = self.h.clone();
        h_new.scaled_add(-dt / dx, &(roll(&uh, -1, Axis(1)) - roll(&uh, 1, Axis(1))));
        h_new.scaled_add(-dt / dy, &(roll(&vh, -1, Axis(0)) - roll(&vh, 1, Axis(0))));
        h_new += self.rain_m_s * dt;

        // x-momentum with the slope effect.
        let mut u_new = self.u.clone();
        u_new.scaled_add(-dt / dx, &(roll(&uuh, -1, Axis(1)) - roll(&uuh, 1, Axis(1))));
        u_new.scaled_add(-dt / dy, &(roll(&uvh, -1, Axis(0)) - roll(&uvh, 1, Axis(0))));
        u_new.scaled_add(-g * dt, &zx);

        // y-momentum with the slope effect.
        let mut v_new = self.v.clone();
        v_new.scaled_add(-dt / dx, &(roll(&uvh, -1, Axis(1)) - roll(&uvh, 1, Axis(1))));
        v_new.scaled_add(-dt / dy, &(roll(&vvh, -1, Axis(0)) - roll(&vvh, 1, Axis(0))));
        v_new.scaled_add(-g * dt, &zy);

        self.h = h_new;
        self.u = u_new;
        self.v = v_new;
    }

    /// Run a fixed number of steps.
    pub fn run(&mut self, iterations: usize) {
        for _ in 0..iterations {
            self.step();
        }
        let (h_min, h_max) = self
            .h
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        log::debug!("finite difference: depth range [{h_min:.3e}, {h_max:.3e}]");
    }

    /// The current primitive fields (h, u, v).
    pub fn fields(&self) -> (&Array2<f64>, &Array2<f64>, &Array2<f64>) {
        (&self.h, &self.u, &self.v)
    }
}
