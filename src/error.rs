//! Error types for solver construction and field handling.
//!
//! Structural errors are fatal: they indicate misconfiguration and are
//! returned before any time stepping starts. Numerical edge cases
//! (near-dry cells, near-equal wave speeds) are absorbed locally by the
//! depth floor and the flux regularizer and never surface here.

use thiserror::Error;

/// Error type for solver setup and field operations.
#[derive(Debug, Error)]
pub enum SolverError {
    /// Terrain grid too small for an interior update
    #[error("terrain grid must be at least 3x3, got {rows}x{cols}")]
    GridTooSmall {
        /// Rows in the offending grid
        rows: usize,
        /// Columns in the offending grid
        cols: usize,
    },

    /// Non-positive grid spacing
    #[error("grid spacing must be positive, got {0}")]
    InvalidSpacing(f64),

    /// Non-positive time step
    #[error("time step must be positive, got {0}")]
    InvalidTimeStep(f64),

    /// Initial condition fields do not match the terrain shape
    #[error("field shape {got:?} does not match terrain shape {expected:?}")]
    FieldShapeMismatch {
        /// Shape of the terrain grid
        expected: (usize, usize),
        /// Shape of the offending field
        got: (usize, usize),
    },

    /// Field rank not supported by interface reconstruction
    #[error("interface reconstruction requires a rank-2 or rank-3 field, got rank {0}")]
    UnsupportedRank(usize),
}
