//! Long-range ember spotting
//!
//! Burning forest lofts bark and debris that the wind carries ahead of the front,
//! starting spot fires beyond the reach of cell-to-cell spread. Each time a forest
//! cell is settled under strong wind there is a small chance one ember lands a few
//! cells downwind after a short flight.
//!
//! # Sampling sequence
//!
//! For a triggering cell settled at `t`:
//! 1. Bernoulli draw with probability `p`
//! 2. Distance in cells, uniform integer in `[2, floor(speed × 0.5) + 1]`
//! 3. Heading `bearing + N(0, 0.3)` radians
//! 4. Target `(row + round(cos θ × d), col − round(sin θ × d))`
//! 5. Flight time uniform in `[10, 30]` minutes
//!
//! The draws happen in this order on every trigger so that a seed fixes the whole run.
//! A spot fire that lands earlier than the target's best time is an ordinary
//! candidate for the scheduler; it is not constrained by the static neighbor graph.
//!
//! # References
//!
//! - Ellis, P.F. (2011). "Fuelbed ignition potential and bark morphology explain the
//!   notoriety of the eucalypt messmate 'stringybark' for intense spotting."
//!   International Journal of Wildland Fire, 20(7), 897-907.

use crate::core_types::noise::{gaussian, uniform_between};
use crate::core_types::{FuelType, Wind};
use crate::error::SimulationError;
use crate::grid::{IgnitionTimeField, TerrainGrid};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tunables for the spotting process
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpottingConfig {
    /// Turn spotting off entirely
    pub enabled: bool,
    /// Chance that a triggering settlement throws an ember
    pub probability: f64,
    /// Wind speed (m/s) that must be exceeded before embers are thrown
    pub min_wind_speed: f64,
    /// Shortest throw in cells
    pub min_distance_cells: u32,
    /// Extra cells of reach per m/s of wind
    pub distance_per_wind: f64,
    /// Standard deviation of the heading scatter (radians)
    pub angular_spread: f64,
    /// Shortest flight time (minutes)
    pub flight_time_min: f64,
    /// Longest flight time (minutes)
    pub flight_time_max: f64,
}

impl Default for SpottingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            probability: 0.02,
            min_wind_speed: 5.0,
            min_distance_cells: 2,
            distance_per_wind: 0.5,
            angular_spread: 0.3,
            flight_time_min: 10.0,
            flight_time_max: 30.0,
        }
    }
}

impl SpottingConfig {
    /// Spotting switched off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Check parameter ranges
    ///
    /// # Errors
    /// Returns [`SimulationError::InvalidSpottingConfig`] describing the first bad field.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let bad = |msg: String| Err(SimulationError::InvalidSpottingConfig(msg));

        if !(0.0..=1.0).contains(&self.probability) {
            return bad(format!("probability must be in [0, 1], got {}", self.probability));
        }
        if !self.min_wind_speed.is_finite() || self.min_wind_speed < 0.0 {
            return bad(format!(
                "min_wind_speed must be finite and non-negative, got {}",
                self.min_wind_speed
            ));
        }
        if self.min_distance_cells == 0 {
            return bad("min_distance_cells must be at least 1".to_string());
        }
        if !self.distance_per_wind.is_finite() || self.distance_per_wind < 0.0 {
            return bad(format!(
                "distance_per_wind must be finite and non-negative, got {}",
                self.distance_per_wind
            ));
        }
        if !self.angular_spread.is_finite() || self.angular_spread < 0.0 {
            return bad(format!(
                "angular_spread must be finite and non-negative, got {}",
                self.angular_spread
            ));
        }
        if !self.flight_time_min.is_finite()
            || !self.flight_time_max.is_finite()
            || self.flight_time_min <= 0.0
            || self.flight_time_min > self.flight_time_max
        {
            return bad(format!(
                "flight time window must satisfy 0 < min <= max, got [{}, {}]",
                self.flight_time_min, self.flight_time_max
            ));
        }
        Ok(())
    }
}

/// A candidate spot fire produced by one ember
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotFire {
    /// Landing time in minutes
    pub time: f64,
    /// Landing row
    pub row: usize,
    /// Landing column
    pub col: usize,
    /// Throw distance in cells
    pub distance_cells: u32,
    /// Time in the air (minutes)
    pub flight_time: f64,
}

/// Stateless ember generator; randomness comes from the caller's generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmberSpotting {
    config: SpottingConfig,
}

impl EmberSpotting {
    /// Validate and wrap a configuration
    ///
    /// # Errors
    /// See [`SpottingConfig::validate`].
    pub fn new(config: SpottingConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &SpottingConfig {
        &self.config
    }

    /// Whether settling a cell of `fuel` under `wind_speed` may throw an ember
    #[inline]
    pub fn is_triggered(&self, fuel: FuelType, wind_speed: f64) -> bool {
        self.config.enabled && fuel.throws_embers() && wind_speed > self.config.min_wind_speed
    }

    /// Longest throw in cells for a given wind speed, saturating at `u32::MAX`
    #[inline]
    pub fn max_distance_cells(&self, wind_speed: f64) -> u32 {
        let reach = ((wind_speed * self.config.distance_per_wind).floor() as u32)
            .saturating_add(1);
        reach.max(self.config.min_distance_cells)
    }

    /// Possibly throw an ember from the cell settled at `(time, row, col)`
    ///
    /// Returns a spot fire only if the ember lands on-grid, on Grass or Forest, and
    /// earlier than the target's current best time in `field`. No random numbers are
    /// drawn unless the cell triggers.
    pub fn try_spot<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        grid: &TerrainGrid,
        wind: &Wind,
        field: &IgnitionTimeField,
        (time, row, col): (f64, usize, usize),
    ) -> Option<SpotFire> {
        if !self.is_triggered(grid.fuel(row, col), wind.speed()) {
            return None;
        }
        if rng.random::<f64>() >= self.config.probability {
            return None;
        }

        let distance_cells = rng.random_range(
            self.config.min_distance_cells..=self.max_distance_cells(wind.speed()),
        );
        let heading = gaussian(rng, wind.bearing_radians(), self.config.angular_spread);
        let flight_time =
            uniform_between(rng, self.config.flight_time_min, self.config.flight_time_max);

        let distance = f64::from(distance_cells);
        let target_row = row as i64 + (heading.cos() * distance).round() as i64;
        let target_col = col as i64 - (heading.sin() * distance).round() as i64;

        let (target_row, target_col) = grid.cell_at(target_row, target_col)?;
        if !grid.fuel(target_row, target_col).accepts_embers() {
            return None;
        }

        let landing = time + flight_time;
        (landing < field.time(target_row, target_col)).then_some(SpotFire {
            time: landing,
            row: target_row,
            col: target_col,
            distance_cells,
            flight_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn always_spot() -> EmberSpotting {
        EmberSpotting::new(SpottingConfig {
            probability: 1.0,
            ..SpottingConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(SpottingConfig::default().validate().is_ok());
        assert!(SpottingConfig::disabled().validate().is_ok());
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let cases = [
            SpottingConfig {
                probability: 1.5,
                ..SpottingConfig::default()
            },
            SpottingConfig {
                min_distance_cells: 0,
                ..SpottingConfig::default()
            },
            SpottingConfig {
                flight_time_min: 40.0,
                ..SpottingConfig::default()
            },
            SpottingConfig {
                angular_spread: f64::NAN,
                ..SpottingConfig::default()
            },
        ];
        for config in cases {
            assert!(matches!(
                EmberSpotting::new(config),
                Err(SimulationError::InvalidSpottingConfig(_))
            ));
        }
    }

    #[test]
    fn test_trigger_requires_forest_and_strong_wind() {
        let spotting = EmberSpotting::new(SpottingConfig::default()).unwrap();
        assert!(spotting.is_triggered(FuelType::Forest, 5.1));
        assert!(!spotting.is_triggered(FuelType::Forest, 5.0));
        assert!(!spotting.is_triggered(FuelType::Grass, 20.0));

        let off = EmberSpotting::new(SpottingConfig::disabled()).unwrap();
        assert!(!off.is_triggered(FuelType::Forest, 20.0));
    }

    #[test]
    fn test_max_distance_scales_with_wind() {
        let spotting = EmberSpotting::new(SpottingConfig::default()).unwrap();
        assert_eq!(spotting.max_distance_cells(5.5), 3);
        assert_eq!(spotting.max_distance_cells(10.0), 6);
        assert_eq!(spotting.max_distance_cells(20.0), 11);
        assert_eq!(spotting.max_distance_cells(0.0), 2);
    }

    #[test]
    fn test_max_distance_saturates_for_extreme_wind() {
        let spotting = EmberSpotting::new(SpottingConfig::default()).unwrap();
        assert_eq!(spotting.max_distance_cells(1.0e10), u32::MAX);
        assert_eq!(spotting.max_distance_cells(f64::MAX), u32::MAX);
    }

    #[test]
    fn test_extreme_wind_throws_off_grid() {
        let spotting = always_spot();
        let grid = TerrainGrid::uniform(5, 5, 30.0, 0.0, FuelType::Forest).unwrap();
        let wind = Wind::new(1.0e10, 0.0).unwrap();
        let field = IgnitionTimeField::never(5, 5);
        let mut rng = StdRng::seed_from_u64(21);

        for _ in 0..200 {
            if let Some(spot) = spotting.try_spot(&mut rng, &grid, &wind, &field, (0.0, 2, 2)) {
                assert!(spot.row < 5 && spot.col < 5);
            }
        }
    }

    #[test]
    fn test_no_draws_without_trigger() {
        let spotting = always_spot();
        let grid = TerrainGrid::uniform(5, 5, 30.0, 0.0, FuelType::Grass).unwrap();
        let wind = Wind::new(20.0, 0.0).unwrap();
        let field = IgnitionTimeField::never(5, 5);

        let mut rng = StdRng::seed_from_u64(1);
        let mut untouched = StdRng::seed_from_u64(1);
        assert_eq!(spotting.try_spot(&mut rng, &grid, &wind, &field, (0.0, 2, 2)), None);
        assert_eq!(rng.random::<u64>(), untouched.random::<u64>());
    }

    #[test]
    fn test_spots_land_downwind_within_window() {
        let spotting = always_spot();
        let grid = TerrainGrid::uniform(60, 60, 30.0, 0.0, FuelType::Forest).unwrap();
        // North wind: embers travel south (increasing row)
        let wind = Wind::new(20.0, 0.0).unwrap();
        let field = IgnitionTimeField::never(60, 60);
        let mut rng = StdRng::seed_from_u64(99);

        let mut landed = 0;
        for _ in 0..500 {
            if let Some(spot) = spotting.try_spot(&mut rng, &grid, &wind, &field, (100.0, 20, 30)) {
                landed += 1;
                assert!((110.0..=130.0).contains(&spot.time));
                assert!((2..=11).contains(&spot.distance_cells));
                assert!(spot.row >= 20, "ember flew upwind to row {}", spot.row);
                assert!(spot.row <= 31);
            }
        }
        assert_eq!(landed, 500);
    }

    #[test]
    fn test_spot_rejected_on_unreceptive_or_earlier_target() {
        let spotting = always_spot();
        let wind = Wind::new(20.0, 0.0).unwrap();

        // Forest source row, urban everywhere south of it
        let mut grid = TerrainGrid::uniform(30, 30, 30.0, 0.0, FuelType::Urban).unwrap();
        grid.set_fuel(5, 15, FuelType::Forest);
        let field = IgnitionTimeField::never(30, 30);
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..100 {
            assert_eq!(spotting.try_spot(&mut rng, &grid, &wind, &field, (0.0, 5, 15)), None);
        }

        // Every target already reached earlier than any possible landing
        let grid = TerrainGrid::uniform(30, 30, 30.0, 0.0, FuelType::Forest).unwrap();
        let mut field = IgnitionTimeField::never(30, 30);
        field.times.fill(5.0);
        for _ in 0..100 {
            assert_eq!(spotting.try_spot(&mut rng, &grid, &wind, &field, (0.0, 5, 15)), None);
        }
    }
}
