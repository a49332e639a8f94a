//! Conserved flow state and primitive recovery.
//!
//! The conserved variables of the 2D shallow water equations are
//! (h, hu, hv): water depth and the two depth-weighted momentum
//! components. Velocities are derived quantities, recovered by division
//! with a small floor on the depth so that dry cells never divide by
//! zero and the reported depth is never negative.

use std::ops::{Add, Mul, Sub};

use ndarray::{Array2, Zip};

/// Per-cell conserved state (h, hu, hv).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlowState {
    /// Water depth
    pub h: f64,
    /// x-momentum hu = h * u
    pub hu: f64,
    /// y-momentum hv = h * v
    pub hv: f64,
}

impl FlowState {
    /// Create a new conserved state.
    #[inline(always)]
    pub fn new(h: f64, hu: f64, hv: f64) -> Self {
        Self { h, hu, hv }
    }

    /// Create a state from primitive variables (h, u, v).
    #[inline(always)]
    pub fn from_primitives(h: f64, u: f64, v: f64) -> Self {
        Self {
            h,
            hu: h * u,
            hv: h * v,
        }
    }

    /// The zero state (dry, at rest).
    #[inline(always)]
    pub fn zero() -> Self {
        Self {
            h: 0.0,
            hu: 0.0,
            hv: 0.0,
        }
    }

    /// Recover primitive variables (h, u, v).
    ///
    /// The depth is floored at `h_floor` before dividing, so the
    /// division is always defined and the reported depth is never
    /// below the floor.
    #[inline(always)]
    pub fn primitives(&self, h_floor: f64) -> (f64, f64, f64) {
        let h = self.h.max(h_floor);
        (h, self.hu / h, self.hv / h)
    }
}

impl Add for FlowState {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.h + rhs.h, self.hu + rhs.hu, self.hv + rhs.hv)
    }
}

impl Sub for FlowState {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.h - rhs.h, self.hu - rhs.hu, self.hv - rhs.hv)
    }
}

impl Mul<f64> for FlowState {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.h * rhs, self.hu * rhs, self.hv * rhs)
    }
}

/// Conserved field at rest: h = u = v = 0 everywhere.
pub fn rest(shape: (usize, usize)) -> Array2<FlowState> {
    Array2::from_elem(shape, FlowState::zero())
}

/// Build a conserved field from primitive fields of equal shape.
pub fn conserved_from_primitives(
    h: &Array2<f64>,
    u: &Array2<f64>,
    v: &Array2<f64>,
) -> Array2<FlowState> {
    Zip::from(h)
        .and(u)
        .and(v)
        .map_collect(|&h, &u, &v| FlowState::from_primitives(h, u, v))
}

/// Recover the three primitive fields from a conserved field.
pub fn primitive_fields(
    state: &Array2<FlowState>,
    h_floor: f64,
) -> (Array2<f64>, Array2<f64>, Array2<f64>) {
    let dim = state.dim();
    let mut h = Array2::zeros(dim);
    let mut u = Array2::zeros(dim);
    let mut v = Array2::zeros(dim);
    Zip::from(state)
        .and(&mut h)
        .and(&mut u)
        .and(&mut v)
        .for_each(|s, h, u, v| {
            let (hs, us, vs) = s.primitives(h_floor);
            *h = hs;
            *u = us;
            *v = vs;
        });
    (h, u, v)
}

/// Raw (un-floored) depth component of a conserved field.
pub fn depth_field(state: &Array2<FlowState>) -> Array2<f64> {
    state.mapv(|s| s.h)
}
