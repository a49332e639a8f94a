//! # runoff2d
//!
//! A 2D shallow-water rainfall-runoff solver on structured grids.
//!
//! The core is an explicit finite-volume scheme: piecewise-constant
//! interface reconstruction, an HLL approximate Riemann solver for the
//! interface fluxes, and cell-centered rain and slope source terms,
//! advanced with forward-Euler steps over the grid interior. A periodic
//! centered-difference solver is included as a baseline for comparison,
//! and a small terrain module ingests XYZ point-cloud elevation data.
//!
//! ## Quick start
//!
//! ```
//! use ndarray::Array2;
//! use runoff2d::run_finite_volume;
//!
//! // Gentle slope in x, light rain, 100 steps.
//! let terrain = Array2::from_shape_fn((16, 16), |(_, j)| 0.01 * j as f64);
//! let (h, u, v) = run_finite_volume(0.01, 1.0, terrain, 100, 5.0).unwrap();
//! assert_eq!(h.dim(), (16, 16));
//! assert!(u.iter().all(|x| x.is_finite()));
//! assert!(v.iter().all(|x| x.is_finite()));
//! ```
//!
//! ## Module layout
//!
//! - [`state`]: conserved state per cell and field-level conversions
//! - [`flux`]: physical shallow-water flux vectors
//! - [`reconstruction`]: shifted interface views of a field
//! - [`riemann`]: Davis wave speeds and the HLL interface flux
//! - [`source`]: rain and terrain-slope source terms
//! - [`finite_volume`]: the explicit time integrator
//! - [`finite_difference`]: periodic centered-difference baseline
//! - [`terrain`]: XYZ terrain ingestion and spacing validation

pub mod error;
pub mod finite_difference;
pub mod finite_volume;
pub mod flux;
pub mod reconstruction;
pub mod riemann;
pub mod source;
pub mod state;
pub mod terrain;

pub use error::SolverError;
pub use finite_difference::FiniteDifferenceSolver;
pub use finite_volume::{run_finite_volume, FiniteVolumeSolver};
pub use flux::{flux_along, flux_x, flux_y, FluxAxis};
pub use reconstruction::{
    interface_views_2d, interface_views_3d, interface_views_dyn, InterfaceViews,
};
pub use riemann::{davis_speeds, hll_flux, interface_fluxes, SolverConfig};
pub use source::{cell_source, interface_source, rain_rate};
pub use state::{conserved_from_primitives, primitive_fields, FlowState};
pub use terrain::{
    check_same_len, grid_spacing, read_xyz, terrain_from_points, TerrainError, XyzTerrain,
};
