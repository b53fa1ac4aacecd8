//! Terrain raster consumed by the spread solver
//!
//! Holds elevation (meters) and fuel class per cell on a square metric grid.
//! Storage is row-major: `[row * cols + col]`. Row 0 is the northern edge.

use crate::core_types::FuelType;
use crate::error::SimulationError;
use serde::{Deserialize, Serialize};

/// Elevation and fuel rasters with a uniform cell size
///
/// Deserialization goes through [`TerrainGrid::new`], so a document with a bad
/// shape, cell size, or elevation is rejected rather than loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TerrainGridDocument")]
pub struct TerrainGrid {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    /// Edge length of a cell in meters
    pub(crate) cell_size: f64,
    /// Elevation in meters (row-major)
    pub(crate) elevation: Vec<f64>,
    /// Fuel class (row-major)
    pub(crate) fuel: Vec<FuelType>,
}

/// Unchecked serialized form of [`TerrainGrid`]
#[derive(Deserialize)]
struct TerrainGridDocument {
    rows: usize,
    cols: usize,
    cell_size: f64,
    elevation: Vec<f64>,
    fuel: Vec<FuelType>,
}

impl TryFrom<TerrainGridDocument> for TerrainGrid {
    type Error = SimulationError;

    fn try_from(doc: TerrainGridDocument) -> Result<Self, Self::Error> {
        TerrainGrid::new(doc.rows, doc.cols, doc.cell_size, doc.elevation, doc.fuel)
    }
}

impl TerrainGrid {
    /// Build a grid from row-major elevation and fuel rasters
    ///
    /// # Errors
    /// - [`SimulationError::EmptyGrid`] if either dimension is zero
    /// - [`SimulationError::InvalidCellSize`] if `cell_size` is not finite and positive
    /// - [`SimulationError::RasterShapeMismatch`] if a raster is not `rows * cols` long
    /// - [`SimulationError::NonFiniteElevation`] for NaN or infinite elevations
    pub fn new(
        rows: usize,
        cols: usize,
        cell_size: f64,
        elevation: Vec<f64>,
        fuel: Vec<FuelType>,
    ) -> Result<Self, SimulationError> {
        let expected = validate_shape(rows, cols, cell_size)?;

        if elevation.len() != expected {
            return Err(SimulationError::RasterShapeMismatch {
                raster: "elevation",
                expected,
                actual: elevation.len(),
            });
        }
        if fuel.len() != expected {
            return Err(SimulationError::RasterShapeMismatch {
                raster: "fuel",
                expected,
                actual: fuel.len(),
            });
        }
        if let Some(idx) = elevation.iter().position(|e| !e.is_finite()) {
            return Err(SimulationError::NonFiniteElevation {
                row: idx / cols,
                col: idx % cols,
            });
        }

        Ok(Self {
            rows,
            cols,
            cell_size,
            elevation,
            fuel,
        })
    }

    /// Build a grid from a raster of integer fuel codes (0=Urban, 1=Grass, 2=Forest, 3=Water)
    ///
    /// # Errors
    /// Same as [`TerrainGrid::new`], plus [`SimulationError::UnknownFuelCode`].
    pub fn from_fuel_codes(
        rows: usize,
        cols: usize,
        cell_size: f64,
        elevation: Vec<f64>,
        fuel_codes: &[u8],
    ) -> Result<Self, SimulationError> {
        let fuel = fuel_codes
            .iter()
            .map(|&code| FuelType::from_code(code))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rows, cols, cell_size, elevation, fuel)
    }

    /// Flat grid of a single fuel class
    ///
    /// # Errors
    /// See [`TerrainGrid::new`].
    pub fn uniform(
        rows: usize,
        cols: usize,
        cell_size: f64,
        elevation: f64,
        fuel: FuelType,
    ) -> Result<Self, SimulationError> {
        let len = validate_shape(rows, cols, cell_size)?;
        Self::new(rows, cols, cell_size, vec![elevation; len], vec![fuel; len])
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell edge length in meters
    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Always false for a constructed grid
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major index of `(row, col)`
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    /// Elevation at `(row, col)` in meters
    #[inline]
    pub fn elevation(&self, row: usize, col: usize) -> f64 {
        self.elevation[self.index(row, col)]
    }

    /// Fuel class at `(row, col)`
    #[inline]
    pub fn fuel(&self, row: usize, col: usize) -> FuelType {
        self.fuel[self.index(row, col)]
    }

    /// Convert signed coordinates to a valid cell, or `None` if off-grid
    #[inline]
    pub fn cell_at(&self, row: i64, col: i64) -> Option<(usize, usize)> {
        let r = usize::try_from(row).ok()?;
        let c = usize::try_from(col).ok()?;
        (r < self.rows && c < self.cols).then_some((r, c))
    }

    /// Replace the fuel class of one cell
    ///
    /// Out-of-range coordinates are ignored.
    pub fn set_fuel(&mut self, row: usize, col: usize, fuel: FuelType) {
        if row < self.rows && col < self.cols {
            let idx = self.index(row, col);
            self.fuel[idx] = fuel;
        }
    }

    /// Replace the elevation of one cell
    ///
    /// Out-of-range coordinates are ignored.
    ///
    /// # Errors
    /// Returns [`SimulationError::NonFiniteElevation`] if `elevation` is NaN or infinite.
    pub fn set_elevation(
        &mut self,
        row: usize,
        col: usize,
        elevation: f64,
    ) -> Result<(), SimulationError> {
        if !elevation.is_finite() {
            return Err(SimulationError::NonFiniteElevation { row, col });
        }
        if row < self.rows && col < self.cols {
            let idx = self.index(row, col);
            self.elevation[idx] = elevation;
        }
        Ok(())
    }

    /// Number of cells of a given fuel class
    pub fn count_fuel(&self, fuel: FuelType) -> usize {
        self.fuel.iter().filter(|&&f| f == fuel).count()
    }

    /// Row-major fuel raster
    pub fn fuel_raster(&self) -> &[FuelType] {
        &self.fuel
    }

    /// Row-major elevation raster
    pub fn elevation_raster(&self) -> &[f64] {
        &self.elevation
    }
}

/// Check dimensions and cell size, returning the cell count
fn validate_shape(rows: usize, cols: usize, cell_size: f64) -> Result<usize, SimulationError> {
    if rows == 0 || cols == 0 {
        return Err(SimulationError::EmptyGrid { rows, cols });
    }
    if !cell_size.is_finite() || cell_size <= 0.0 {
        return Err(SimulationError::InvalidCellSize(cell_size));
    }
    rows.checked_mul(cols)
        .ok_or(SimulationError::EmptyGrid { rows, cols })
}
