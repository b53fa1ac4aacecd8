//! Directional rate of spread across one grid edge
//!
//! `R(A→B) = base(fuel_B) × slope(A→B) × wind(A→B)` in m/min. The model is
//! asymmetric: slope and wind alignment flip sign when the edge is reversed, so
//! every edge must be evaluated in the direction fire actually travels.
//!
//! # References
//!
//! - Noble, I.R., Gill, A.M., Bary, G.A.V. (1980). "`McArthur`'s fire-danger meters
//!   expressed as equations." Australian Journal of Ecology, 5, 201-203.
//!   Slope effect `R = R0 × exp(0.069 × θ°)`.
//! - `McArthur` (1967), Cheney et al. (1998) for the per-fuel wind response.

use crate::core_types::{FuelType, Wind};
use crate::grid::TerrainGrid;
use nalgebra::Vector2;

/// Slope sensitivity per radian (0.0693 per degree, Noble et al. 1980)
pub const K_SLOPE: f64 = 0.0693 / (std::f64::consts::PI / 180.0);

/// Slope factor bounds, keeping rates finite and strictly positive
pub const SLOPE_FACTOR_MIN: f64 = 0.1;
/// Upper slope factor bound
pub const SLOPE_FACTOR_MAX: f64 = 8.0;

/// Floor on the wind factor for spread directly into the wind
pub const WIND_FACTOR_MIN: f64 = 0.1;

/// One of the 8 Chebyshev-adjacent steps on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Row step (+1 = south)
    pub dr: i8,
    /// Column step (+1 = east)
    pub dc: i8,
}

impl Neighbor {
    /// Whether the step moves along both axes
    #[inline]
    pub fn is_diagonal(self) -> bool {
        self.dr != 0 && self.dc != 0
    }

    /// Length of the step in cell units (1 or √2)
    #[inline]
    pub fn length_cells(self) -> f64 {
        if self.is_diagonal() {
            std::f64::consts::SQRT_2
        } else {
            1.0
        }
    }

    /// Unit vector of the step in `(row, col)` form
    #[inline]
    pub fn unit(self) -> Vector2<f64> {
        Vector2::new(f64::from(self.dr), f64::from(self.dc)) / self.length_cells()
    }

    /// Target cell of this step from `(row, col)`, or `None` if it leaves the grid
    #[inline]
    pub fn step_from(self, grid: &TerrainGrid, row: usize, col: usize) -> Option<(usize, usize)> {
        let r = row.checked_add_signed(isize::from(self.dr))?;
        let c = col.checked_add_signed(isize::from(self.dc))?;
        (r < grid.rows() && c < grid.cols()).then_some((r, c))
    }
}

/// Orthogonal steps first, then diagonals
pub const NEIGHBORS: [Neighbor; 8] = [
    Neighbor { dr: -1, dc: 0 },
    Neighbor { dr: 1, dc: 0 },
    Neighbor { dr: 0, dc: -1 },
    Neighbor { dr: 0, dc: 1 },
    Neighbor { dr: -1, dc: -1 },
    Neighbor { dr: -1, dc: 1 },
    Neighbor { dr: 1, dc: -1 },
    Neighbor { dr: 1, dc: 1 },
];

/// Spread across a single directed edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSpread {
    /// Edge length in meters
    pub distance: f64,
    /// Rate of spread in m/min
    pub rate: f64,
    /// Time to cross the edge in minutes
    pub travel_time: f64,
}

/// Slope multiplier for a rise of `rise` meters over `run` meters
///
/// `clamp(exp(K_SLOPE × atan2(rise, run)), 0.1, 8.0)`: faster uphill, slower downhill.
#[inline]
pub fn slope_factor(rise: f64, run: f64) -> f64 {
    let slope_angle = rise.atan2(run);
    (K_SLOPE * slope_angle)
        .exp()
        .clamp(SLOPE_FACTOR_MIN, SLOPE_FACTOR_MAX)
}

/// Wind multiplier for spreading along `direction` into `fuel`
///
/// `max(0.1, 1 + sensitivity × speed × (downwind · direction))`
#[inline]
pub fn wind_factor(
    fuel: FuelType,
    wind_speed: f64,
    downwind: &Vector2<f64>,
    direction: &Vector2<f64>,
) -> f64 {
    let alignment = downwind.dot(direction);
    (1.0 + fuel.wind_sensitivity() * wind_speed * alignment).max(WIND_FACTOR_MIN)
}

/// Stateless spread-rate service with the wind vector resolved once per run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadRateModel {
    wind_speed: f64,
    downwind: Vector2<f64>,
}

impl SpreadRateModel {
    /// Resolve the wind into a downwind unit vector
    pub fn new(wind: &Wind) -> Self {
        Self {
            wind_speed: wind.speed(),
            downwind: wind.downwind_unit(),
        }
    }

    /// Rate and travel time from `(row, col)` to its `neighbor`
    ///
    /// The caller guarantees the target is on-grid and burnable, so the returned
    /// rate is strictly positive.
    pub fn edge(
        &self,
        grid: &TerrainGrid,
        (row, col): (usize, usize),
        (target_row, target_col): (usize, usize),
        neighbor: Neighbor,
    ) -> EdgeSpread {
        let fuel = grid.fuel(target_row, target_col);
        debug_assert!(fuel.is_burnable(), "spread into {fuel} at ({target_row}, {target_col})");

        let distance = grid.cell_size() * neighbor.length_cells();
        let rise = grid.elevation(target_row, target_col) - grid.elevation(row, col);

        let rate = fuel.base_rate()
            * slope_factor(rise, distance)
            * wind_factor(fuel, self.wind_speed, &self.downwind, &neighbor.unit());

        EdgeSpread {
            distance,
            rate,
            travel_time: distance / rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SOUTH: Neighbor = Neighbor { dr: 1, dc: 0 };
    const NORTH: Neighbor = Neighbor { dr: -1, dc: 0 };
    const SOUTH_EAST: Neighbor = Neighbor { dr: 1, dc: 1 };

    fn flat_forest() -> TerrainGrid {
        TerrainGrid::uniform(5, 5, 30.0, 100.0, FuelType::Forest).unwrap()
    }

    #[test]
    fn test_flat_calm_travel_times() {
        let grid = flat_forest();
        let model = SpreadRateModel::new(&Wind::calm());

        let ortho = model.edge(&grid, (2, 2), (3, 2), SOUTH);
        assert_relative_eq!(ortho.rate, 0.5);
        assert_relative_eq!(ortho.travel_time, 60.0);

        let diag = model.edge(&grid, (2, 2), (3, 3), SOUTH_EAST);
        assert_relative_eq!(diag.distance, 30.0 * std::f64::consts::SQRT_2);
        assert_relative_eq!(diag.travel_time, 84.852_813_742_385_7, epsilon = 1e-9);
    }

    #[test]
    fn test_wind_is_directional() {
        let grid = flat_forest();
        let model = SpreadRateModel::new(&Wind::new(10.0, 0.0).unwrap());

        let downwind = model.edge(&grid, (2, 2), (3, 2), SOUTH);
        let upwind = model.edge(&grid, (2, 2), (1, 2), NORTH);

        // 0.5 × (1 + 0.1 × 10)
        assert_relative_eq!(downwind.rate, 1.0, epsilon = 1e-12);
        // 0.5 × max(0.1, 1 - 1)
        assert_relative_eq!(upwind.rate, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_crosswind_has_no_effect() {
        let grid = flat_forest();
        let model = SpreadRateModel::new(&Wind::new(10.0, 0.0).unwrap());
        let east = model.edge(&grid, (2, 2), (2, 3), Neighbor { dr: 0, dc: 1 });
        assert_relative_eq!(east.rate, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_slope_factor_bounds_and_asymmetry() {
        assert_relative_eq!(slope_factor(0.0, 30.0), 1.0);
        assert_relative_eq!(slope_factor(1000.0, 30.0), SLOPE_FACTOR_MAX);
        assert_relative_eq!(slope_factor(-1000.0, 30.0), SLOPE_FACTOR_MIN);

        let up = slope_factor(1.0, 30.0);
        let down = slope_factor(-1.0, 30.0);
        assert!(up > 1.0 && down < 1.0);
        assert_relative_eq!(up * down, 1.0, epsilon = 1e-12);
        assert_relative_eq!(up, (K_SLOPE * (1.0_f64 / 30.0).atan()).exp());
    }

    #[test]
    fn test_edge_rate_is_asymmetric_on_slope() {
        let mut grid = flat_forest();
        grid.set_elevation(3, 2, 103.0).unwrap();
        let model = SpreadRateModel::new(&Wind::calm());

        let up = model.edge(&grid, (2, 2), (3, 2), SOUTH);
        let down = model.edge(&grid, (3, 2), (2, 2), NORTH);
        assert!(up.travel_time < down.travel_time);
    }

    #[test]
    fn test_wind_factor_floor() {
        let downwind = Vector2::new(1.0, 0.0);
        let into_wind = Vector2::new(-1.0, 0.0);
        assert_relative_eq!(
            wind_factor(FuelType::Grass, 30.0, &downwind, &into_wind),
            WIND_FACTOR_MIN
        );
    }

    #[test]
    fn test_neighbor_steps() {
        let grid = flat_forest();
        assert_eq!(NORTH.step_from(&grid, 0, 0), None);
        assert_eq!(SOUTH_EAST.step_from(&grid, 4, 3), None);
        assert_eq!(SOUTH_EAST.step_from(&grid, 3, 3), Some((4, 4)));
        assert_eq!(NEIGHBORS.iter().filter(|n| n.is_diagonal()).count(), 4);
        assert_relative_eq!(SOUTH_EAST.unit().norm(), 1.0, epsilon = 1e-12);
    }
}
