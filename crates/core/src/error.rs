//! Construction errors for the spread simulator
//!
//! The propagation itself cannot fail once its inputs are valid, so every variant
//! here describes a bad input caught before the first ignition.

use std::fmt;

/// Errors raised while building terrain, wind, or a scheduler
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Grid has zero rows or zero columns
    EmptyGrid {
        /// Requested row count
        rows: usize,
        /// Requested column count
        cols: usize,
    },
    /// A raster does not hold `rows * cols` values
    RasterShapeMismatch {
        /// Which raster was malformed (`"elevation"` or `"fuel"`)
        raster: &'static str,
        /// Expected number of cells
        expected: usize,
        /// Number of cells supplied
        actual: usize,
    },
    /// Cell size must be finite and strictly positive
    InvalidCellSize(f64),
    /// Configured cell size disagrees with the terrain grid
    CellSizeMismatch {
        /// Cell size in the run configuration
        configured: f64,
        /// Cell size of the grid
        grid: f64,
    },
    /// Wind speed must be finite and non-negative
    InvalidWindSpeed(f64),
    /// Wind bearing must be finite
    InvalidWindDirection(f64),
    /// Elevation sample is NaN or infinite
    NonFiniteElevation {
        /// Row of the offending sample
        row: usize,
        /// Column of the offending sample
        col: usize,
    },
    /// Fuel raster code outside 0..=3
    UnknownFuelCode(u8),
    /// Ember spotting parameters are inconsistent
    InvalidSpottingConfig(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::EmptyGrid { rows, cols } => {
                write!(f, "Grid must have at least one cell, got {rows}x{cols}")
            }
            SimulationError::RasterShapeMismatch {
                raster,
                expected,
                actual,
            } => write!(
                f,
                "Raster '{raster}' has {actual} cells, expected {expected}"
            ),
            SimulationError::InvalidCellSize(v) => {
                write!(f, "Cell size must be finite and positive, got {v}")
            }
            SimulationError::CellSizeMismatch { configured, grid } => write!(
                f,
                "Configured cell size {configured}m does not match the grid's {grid}m"
            ),
            SimulationError::InvalidWindSpeed(v) => {
                write!(f, "Wind speed must be finite and non-negative, got {v}")
            }
            SimulationError::InvalidWindDirection(v) => {
                write!(f, "Wind direction must be finite, got {v}")
            }
            SimulationError::NonFiniteElevation { row, col } => {
                write!(f, "Elevation at ({row}, {col}) is not finite")
            }
            SimulationError::UnknownFuelCode(code) => {
                write!(f, "Unknown fuel code {code} (expected 0-3)")
            }
            SimulationError::InvalidSpottingConfig(msg) => {
                write!(f, "Invalid ember spotting config: {msg}")
            }
        }
    }
}

impl std::error::Error for SimulationError {}
