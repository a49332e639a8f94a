//! Rainfall and bed-slope source terms.
//!
//! Two variants of the topography forcing are provided:
//!
//! - a cell-centered term for the bulk update, using a 2-cell centered
//!   difference of the bed elevation and of the depth over the grid
//!   interior, plus the rainfall input;
//! - an interface term using a one-sided forward difference across each
//!   interface, without rain (rain enters exactly once, at the cell
//!   update).
//!
//! The slope term must be discretized with the same stencil it is
//! balanced against, otherwise a flat wet surface develops spurious
//! currents. The one-sided difference at the interface mirrors the flux
//! stencil used there.

use ndarray::{s, Array2, ArrayView2, Zip};

use crate::state::FlowState;

/// Convert a rainfall rate from mm/h to m/s.
#[inline]
pub fn rain_rate(rain_mm_per_h: f64) -> f64 {
    rain_mm_per_h * 0.001 / 3600.0
}

/// Centered-difference gradients over the grid interior.
///
/// Input shape (R, C), output shapes (R-2, C-2).
pub fn centered_gradients(dx: f64, field: ArrayView2<f64>) -> (Array2<f64>, Array2<f64>) {
    let gx = (&field.slice(s![1..-1, 2..]) - &field.slice(s![1..-1, ..-2])) / (2.0 * dx);
    let gy = (&field.slice(s![2.., 1..-1]) - &field.slice(s![..-2, 1..-1])) / (2.0 * dx);
    (gx, gy)
}

/// Forward-difference gradients across each cell interface.
///
/// Input shape (R, C), output shapes (R-1, C-1).
pub fn forward_gradients(dx: f64, field: ArrayView2<f64>) -> (Array2<f64>, Array2<f64>) {
    let gx = (&field.slice(s![1.., 1..]) - &field.slice(s![1.., ..-1])) / dx;
    let gy = (&field.slice(s![1.., 1..]) - &field.slice(s![..-1, 1..])) / dx;
    (gx, gy)
}

/// Cell-centered source term over the interior cells.
///
/// Components: (rain, -g·(∂h/∂x)·(∂z/∂x), -g·(∂h/∂y)·(∂z/∂y)), with
/// centered differences for both gradients. `rain_m_s` is the rainfall
/// rate in m/s, broadcast uniformly. Output shape (R-2, C-2).
pub fn cell_source(
    dx: f64,
    z: ArrayView2<f64>,
    h: ArrayView2<f64>,
    rain_m_s: f64,
    g: f64,
) -> Array2<FlowState> {
    let (zx, zy) = centered_gradients(dx, z);
    let (hx, hy) = centered_gradients(dx, h);
    Zip::from(&zx)
        .and(&zy)
        .and(&hx)
        .and(&hy)
        .map_collect(|&zx, &zy, &hx, &hy| FlowState::new(rain_m_s, -g * hx * zx, -g * hy * zy))
}

/// Interface source term: the bed-slope forcing with the one-sided
/// stencil used at interfaces, and no rain component.
///
/// Output shape (R-1, C-1).
pub fn interface_source(
    dx: f64,
    z: ArrayView2<f64>,
    h: ArrayView2<f64>,
    g: f64,
) -> Array2<FlowState> {
    let (zx, zy) = forward_gradients(dx, z);
    let (hx, hy) = forward_gradients(dx, h);
    Zip::from(&zx)
        .and(&zy)
        .and(&hx)
        .and(&hy)
        .map_collect(|&zx, &zy, &hx, &hy| FlowState::new(0.0, -g * hx * zx, -g * hy * zy))
}
