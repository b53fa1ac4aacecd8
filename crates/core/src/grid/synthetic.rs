//! Procedural test terrain
//!
//! Rolling hills with forested ridges, grassy valleys, and a central town block.
//! The surface bottoms out near 100 m, so water only appears on extreme noise
//! draws. Used by the demo and by tests that need a non-trivial landscape
//! without loading rasters.

use crate::core_types::noise::gaussian;
use crate::core_types::FuelType;
use crate::error::SimulationError;
use crate::grid::TerrainGrid;
use rand::Rng;

/// Valleys below this elevation (m) are grassland
const GRASS_BELOW_ELEVATION: f64 = 300.0;

/// Surface noise standard deviation (m)
const ELEVATION_NOISE: f64 = 10.0;

/// Map an index to the `[0, 10]` domain the hill profile is defined on
fn domain_coordinate(i: usize, n: usize) -> f64 {
    if n <= 1 {
        0.0
    } else {
        10.0 * i as f64 / (n - 1) as f64
    }
}

impl TerrainGrid {
    /// Generate rolling synthetic terrain
    ///
    /// Elevation is `300 * (sin(x/3) + cos(y/2)) + 400` plus N(0, 10) noise, floored at 0.
    /// Fuel is Forest, Grass below 300 m, Urban in the central block spanning 40%-60%
    /// of each axis, and Water where the elevation is 0. The noiseless surface never
    /// drops below about 100 m, so Water needs a noise draw near -10 sigma and does
    /// not occur in practice.
    ///
    /// # Errors
    /// Returns an error for an empty grid or invalid cell size.
    pub fn synthetic<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        cell_size: f64,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        let mut grid = TerrainGrid::uniform(rows, cols, cell_size, 0.0, FuelType::Forest)?;

        let town_rows = (rows * 2 / 5)..(rows * 3 / 5);
        let town_cols = (cols * 2 / 5)..(cols * 3 / 5);

        for row in 0..rows {
            let y = domain_coordinate(row, rows);
            for col in 0..cols {
                let x = domain_coordinate(col, cols);
                let surface = 300.0 * ((x / 3.0).sin() + (y / 2.0).cos()) + 400.0;
                let elevation = gaussian(rng, surface, ELEVATION_NOISE).max(0.0);

                let fuel = if elevation <= 0.0 {
                    FuelType::Water
                } else if town_rows.contains(&row) && town_cols.contains(&col) {
                    FuelType::Urban
                } else if elevation < GRASS_BELOW_ELEVATION {
                    FuelType::Grass
                } else {
                    FuelType::Forest
                };

                let idx = grid.index(row, col);
                grid.elevation[idx] = elevation;
                grid.fuel[idx] = fuel;
            }
        }

        Ok(grid)
    }

    /// Pick a Grass or Forest ignition cell in the upper-central part of the map
    ///
    /// Samples rows in `[rows/4, rows/2)` and columns in `[cols/3, 2*cols/3)` up to
    /// `attempts` times. Falls back to the grid centre when nothing burnable is hit.
    pub fn find_ignition_point<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        attempts: usize,
    ) -> (usize, usize) {
        let row_range = (self.rows / 4)..(self.rows / 2).max(self.rows / 4 + 1);
        let col_range = (self.cols / 3)..(2 * self.cols / 3).max(self.cols / 3 + 1);

        for _ in 0..attempts {
            let row = rng.random_range(row_range.clone()).min(self.rows - 1);
            let col = rng.random_range(col_range.clone()).min(self.cols - 1);
            if self.fuel(row, col).accepts_embers() {
                return (row, col);
            }
        }

        (self.rows / 2, self.cols / 2)
    }
}
