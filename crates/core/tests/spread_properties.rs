//! Propagation invariants of the wavefront scheduler
//!
//! Exercises the behaviour a renderer or analyst relies on: settlement order,
//! monotone relaxation, water barriers, wind anisotropy, the calm-air baseline,
//! and horizon truncation.

use approx::assert_relative_eq;
use ctor::ctor;
use fire_spread_core::{
    FuelType, RecordingObserver, SpottingConfig, TerrainGrid, WavefrontScheduler, Wind,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

#[ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn scheduler(grid: TerrainGrid, wind: Wind) -> WavefrontScheduler {
    WavefrontScheduler::with_seed(grid, wind, 2024).unwrap()
}

/// Seeds of the busy scenario as `(row, col, time)`
const BUSY_SEEDS: [(usize, usize, f64); 2] = [(10, 10, 0.0), (40, 5, 45.0)];

/// Windy synthetic landscape with frequent spotting
fn busy_run() -> RecordingObserver {
    let grid = TerrainGrid::synthetic(50, 50, 30.0, &mut StdRng::seed_from_u64(77)).unwrap();
    let wind = Wind::new(18.0, 225.0).unwrap();
    let spotting = SpottingConfig {
        probability: 0.5,
        ..SpottingConfig::default()
    };
    let mut sched =
        WavefrontScheduler::new(grid, wind, spotting, StdRng::seed_from_u64(5)).unwrap();
    for (row, col, time) in BUSY_SEEDS {
        assert!(sched.ignite(row as i64, col as i64, time));
    }

    let mut observer = RecordingObserver::default();
    sched.run_observed(f64::INFINITY, &mut observer);
    observer
}

#[test]
fn test_settlement_times_never_decrease() {
    let observer = busy_run();
    assert!(observer.settled.len() > 100);
    assert!(!observer.spot_fires.is_empty(), "scenario should exercise spotting");

    for pair in observer.settled.windows(2) {
        assert!(
            pair[0].time <= pair[1].time,
            "settled ({}, {}) at {} before ({}, {}) at {}",
            pair[0].row,
            pair[0].col,
            pair[0].time,
            pair[1].row,
            pair[1].col,
            pair[1].time
        );
    }
}

#[test]
fn test_best_times_only_decrease() {
    let observer = busy_run();
    let mut latest: HashMap<(usize, usize), f64> = BUSY_SEEDS
        .iter()
        .map(|&(row, col, time)| ((row, col), time))
        .collect();

    for (event, previous) in &observer.relaxations {
        assert!(event.time < *previous);
        if let Some(&last) = latest.get(&(event.row, event.col)) {
            assert_eq!(*previous, last, "relaxation skipped a recorded value");
        } else {
            assert!(previous.is_infinite());
        }
        latest.insert((event.row, event.col), event.time);
    }

    // every settled time is the last value the cell was relaxed to
    for event in &observer.settled {
        assert_eq!(latest[&(event.row, event.col)], event.time);
    }
}

#[test]
fn test_water_line_blocks_spread() {
    let mut grid = TerrainGrid::uniform(5, 5, 30.0, 0.0, FuelType::Grass).unwrap();
    for row in 0..5 {
        grid.set_fuel(row, 2, FuelType::Water);
    }
    let mut sched = scheduler(grid, Wind::calm());
    sched.ignite(2, 0, 0.0);
    let field = sched.run(f64::INFINITY);

    assert_eq!(field.arrival(2, 4), None);
    for row in 0..5 {
        assert_eq!(field.arrival(row, 2), None);
        assert!(field.arrival(row, 1).is_some());
        assert_eq!(field.arrival(row, 3), None);
    }
}

#[test]
fn test_single_water_cell_is_bypassed_diagonally() {
    let mut grid = TerrainGrid::uniform(5, 5, 30.0, 0.0, FuelType::Grass).unwrap();
    grid.set_fuel(2, 2, FuelType::Water);
    let mut sched = scheduler(grid, Wind::calm());
    sched.ignite(2, 0, 0.0);
    let field = sched.run(f64::INFINITY);

    assert_eq!(field.arrival(2, 2), None);
    let target = field.arrival(2, 4).expect("detour around the water cell");

    // (2,0)->(2,1) ortho, (2,1)->(1,2) diag, (1,2)->(2,3) diag, (2,3)->(2,4) ortho
    let ortho = 30.0 / 1.5;
    let diag = 30.0 * std::f64::consts::SQRT_2 / 1.5;
    assert_relative_eq!(target, 2.0 * ortho + 2.0 * diag, epsilon = 1e-9);
}

#[test]
fn test_fire_runs_downwind_faster() {
    let grid = TerrainGrid::uniform(5, 5, 30.0, 0.0, FuelType::Forest).unwrap();
    let mut sched = scheduler(grid, Wind::new(10.0, 0.0).unwrap());
    sched.ignite(2, 2, 0.0);
    let field = sched.run(f64::INFINITY);

    let south = field.time(3, 2);
    let north = field.time(1, 2);
    assert!(south < north, "south {south} should beat north {north}");
    assert_relative_eq!(south, 30.0, epsilon = 1e-9);
}

#[test]
fn test_calm_flat_forest_baseline() {
    let grid = TerrainGrid::uniform(5, 5, 30.0, 0.0, FuelType::Forest).unwrap();
    let mut sched = scheduler(grid, Wind::calm());
    sched.ignite(2, 2, 0.0);
    let field = sched.run(f64::INFINITY);

    assert_eq!(field.time(2, 2), 0.0);
    for (row, col) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
        assert_relative_eq!(field.time(row, col), 60.0, epsilon = 1e-9);
    }
    for (row, col) in [(1, 1), (1, 3), (3, 1), (3, 3)] {
        assert_relative_eq!(field.time(row, col), 84.852_813_742_385_7, epsilon = 1e-6);
    }
    assert_eq!(field.reached_cells(), 25);
}

#[test]
fn test_zero_horizon_settles_only_seeds() {
    let grid = TerrainGrid::uniform(6, 6, 30.0, 0.0, FuelType::Grass).unwrap();
    let mut sched = scheduler(grid, Wind::new(8.0, 90.0).unwrap());
    sched.ignite(1, 1, 0.0);
    sched.ignite(4, 4, 0.0);
    let field = sched.run(0.0);

    assert_eq!(field.reached_cells(), 2);
    assert_eq!(field.time(1, 1), 0.0);
    assert_eq!(field.time(4, 4), 0.0);
}

#[test]
fn test_horizon_keeps_only_committed_times() {
    let grid = TerrainGrid::uniform(1, 10, 30.0, 0.0, FuelType::Grass).unwrap();
    let mut sched = scheduler(grid, Wind::calm());
    sched.ignite(0, 0, 0.0);
    let field = sched.run(50.0);

    // 20 minutes per cell
    assert_eq!(field.reached_cells(), 3);
    assert_relative_eq!(field.time(0, 2), 40.0, epsilon = 1e-9);
    assert_eq!(field.arrival(0, 3), None);
}

#[test]
fn test_uphill_runs_faster_than_downhill() {
    let mut grid = TerrainGrid::uniform(1, 5, 30.0, 0.0, FuelType::Grass).unwrap();
    for col in 0..5 {
        grid.set_elevation(0, col, 5.0 * col as f64).unwrap();
    }
    let uphill = {
        let mut sched = scheduler(grid.clone(), Wind::calm());
        sched.ignite(0, 0, 0.0);
        sched.run(f64::INFINITY).time(0, 4)
    };
    let downhill = {
        let mut sched = scheduler(grid, Wind::calm());
        sched.ignite(0, 4, 0.0);
        sched.run(f64::INFINITY).time(0, 0)
    };
    assert!(uphill < downhill);
}
