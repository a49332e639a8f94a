//! Terrain ingestion: XYZ point clouds and grid-spacing validation.
//!
//! Terrain arrives as a whitespace-separated XYZ point cloud sampling a
//! regular grid. The grid size is inferred from the number of unique x
//! and y coordinates; points are bucketed by their coordinates rather
//! than reshaped in file order, so any row/column ordering is accepted
//! as long as the grid is complete.
//!
//! # File format
//!
//! ```text
//! # terrain sample
//! 0.0 0.0 1.25
//! 1.0 0.0 1.10
//! 0.0 1.0 1.32
//! 1.0 1.0 1.18
//! ```
//!
//! Empty lines and `#` comments are skipped; lines that do not parse as
//! three floats are skipped with a warning.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ndarray::Array2;
use thiserror::Error;

/// Error type for terrain input.
#[derive(Debug, Error)]
pub enum TerrainError {
    /// IO error reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Coordinate vectors differ in length
    #[error("coordinate vectors differ in length: x={x_len}, y={y_len}, z={z_len}")]
    LengthMismatch {
        /// Number of x values
        x_len: usize,
        /// Number of y values
        y_len: usize,
        /// Number of z values
        z_len: usize,
    },

    /// Point count does not fill the inferred grid
    #[error("{points} points cannot fill a {rows}x{cols} grid")]
    IncompleteGrid {
        /// Parsed point count
        points: usize,
        /// Inferred row count
        rows: usize,
        /// Inferred column count
        cols: usize,
    },

    /// Grid spacing is not uniform along an axis
    #[error("non-uniform grid spacing along {axis}: found {found}, expected {expected}")]
    NonUniformSpacing {
        /// Axis label ('x' or 'y')
        axis: char,
        /// Spacing inferred from the first cell pair
        expected: f64,
        /// Offending spacing
        found: f64,
    },

    /// An axis has a single coordinate value, so spacing is undefined
    #[error("cannot infer grid spacing along {axis} from a single value")]
    DegenerateAxis {
        /// Axis label ('x' or 'y')
        axis: char,
    },

    /// No parseable points in the input
    #[error("no parseable points in XYZ input")]
    Empty,
}

/// Terrain parsed from an XYZ point cloud.
#[derive(Clone, Debug)]
pub struct XyzTerrain {
    /// X coordinate of each cell
    pub x: Array2<f64>,
    /// Y coordinate of each cell
    pub y: Array2<f64>,
    /// Elevation of each cell
    pub z: Array2<f64>,
}

impl XyzTerrain {
    /// Grid shape (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        self.z.dim()
    }
}

/// Read an XYZ terrain file and infer its grid layout.
///
/// # Errors
///
/// Fails on IO errors, an empty point set, or a point set that does not
/// fill the inferred grid.
pub fn read_xyz(path: impl AsRef<Path>) -> Result<XyzTerrain, TerrainError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut points = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        let parsed = if fields.len() == 3 {
            match (
                fields[0].parse::<f64>(),
                fields[1].parse::<f64>(),
                fields[2].parse::<f64>(),
            ) {
                (Ok(x), Ok(y), Ok(z)) => Some((x, y, z)),
                _ => None,
            }
        } else {
            None
        };
        match parsed {
            Some(point) => points.push(point),
            None => log::warn!("skipping unparseable XYZ line: {trimmed}"),
        }
    }

    terrain_from_points(&points)
}

/// Build coordinate and elevation grids from scattered (x, y, z) points.
///
/// Rows follow the sorted unique y values, columns the sorted unique x
/// values.
///
/// # Errors
///
/// Fails if the point set is empty or does not fill the inferred grid.
pub fn terrain_from_points(points: &[(f64, f64, f64)]) -> Result<XyzTerrain, TerrainError> {
    if points.is_empty() {
        return Err(TerrainError::Empty);
    }

    let xs = sorted_unique(points.iter().map(|p| p.0));
    let ys = sorted_unique(points.iter().map(|p| p.1));
    let (rows, cols) = (ys.len(), xs.len());
    if points.len() != rows * cols {
        return Err(TerrainError::IncompleteGrid {
            points: points.len(),
            rows,
            cols,
        });
    }

    let mut x = Array2::zeros((rows, cols));
    let mut y = Array2::zeros((rows, cols));
    let mut z = Array2::zeros((rows, cols));
    for &(px, py, pz) in points {
        let i = index_of(&ys, py);
        let j = index_of(&xs, px);
        x[[i, j]] = px;
        y[[i, j]] = py;
        z[[i, j]] = pz;
    }

    Ok(XyzTerrain { x, y, z })
}

/// Validate uniform spacing and return (dx, dy).
///
/// Every consecutive difference along the respective axis is checked
/// against the first one, with an absolute-plus-relative tolerance.
///
/// # Errors
///
/// Fails if either axis is degenerate (a single value) or the spacing
/// varies beyond tolerance.
pub fn grid_spacing(x: &Array2<f64>, y: &Array2<f64>) -> Result<(f64, f64), TerrainError> {
    const ATOL: f64 = 1e-8;
    const RTOL: f64 = 1e-5;

    let (rows, cols) = x.dim();
    if cols < 2 {
        return Err(TerrainError::DegenerateAxis { axis: 'x' });
    }
    if y.dim().0 < 2 {
        return Err(TerrainError::DegenerateAxis { axis: 'y' });
    }

    let dx = x[[0, 1]] - x[[0, 0]];
    for i in 0..rows {
        for j in 1..cols {
            let d = x[[i, j]] - x[[i, j - 1]];
            if (d - dx).abs() > ATOL + RTOL * dx.abs() {
                return Err(TerrainError::NonUniformSpacing {
                    axis: 'x',
                    expected: dx,
                    found: d,
                });
            }
        }
    }

    let (y_rows, y_cols) = y.dim();
    let dy = y[[1, 0]] - y[[0, 0]];
    for i in 1..y_rows {
        for j in 0..y_cols {
            let d = y[[i, j]] - y[[i - 1, j]];
            if (d - dy).abs() > ATOL + RTOL * dy.abs() {
                return Err(TerrainError::NonUniformSpacing {
                    axis: 'y',
                    expected: dy,
                    found: d,
                });
            }
        }
    }

    Ok((dx, dy))
}

/// Ensure three coordinate vectors have the same length.
///
/// # Errors
///
/// Fails with the three lengths on any mismatch.
pub fn check_same_len(x: &[f64], y: &[f64], z: &[f64]) -> Result<(), TerrainError> {
    if x.len() != y.len() || y.len() != z.len() {
        return Err(TerrainError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
            z_len: z.len(),
        });
    }
    Ok(())
}

fn sorted_unique(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut v: Vec<f64> = values.collect();
    v.sort_by(f64::total_cmp);
    v.dedup();
    v
}

fn index_of(sorted: &[f64], value: f64) -> usize {
    sorted.partition_point(|c| c.total_cmp(&value) == std::cmp::Ordering::Less)
}
