use clap::Parser;
use fire_spread_core::{
    frame_times, FuelType, RecordingObserver, SimulationConfig, SpottingConfig, TerrainGrid,
    WavefrontScheduler,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Wavefront fire spread demo over synthetic terrain
#[derive(Parser, Debug)]
#[command(name = "fire-spread-demo")]
#[command(about = "Earliest-arrival wildfire spread over a synthetic landscape", long_about = None)]
struct Args {
    /// Grid rows
    #[arg(long, default_value_t = 100)]
    rows: usize,

    /// Grid columns
    #[arg(long, default_value_t = 100)]
    cols: usize,

    /// Cell edge length in meters
    #[arg(long, default_value_t = 30.0)]
    cell_size: f64,

    /// Wind speed in m/s
    #[arg(short, long, default_value_t = 8.0)]
    wind_speed: f64,

    /// Wind direction in degrees, the bearing it blows FROM (0=North, 90=East)
    #[arg(long, default_value_t = 270.0)]
    wind_direction: f64,

    /// Seed for terrain noise, ignition search, and ember spotting
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Simulation horizon in hours
    #[arg(long, default_value_t = 24.0)]
    max_hours: f64,

    /// Reporting interval in hours
    #[arg(long, default_value_t = 1.0)]
    frame_hours: f64,

    /// How long a cell keeps burning after ignition, in hours
    #[arg(long, default_value_t = 3.0)]
    burn_hours: f64,

    /// Ignition row (random burnable cell if omitted)
    #[arg(long, requires = "ignite_col")]
    ignite_row: Option<i64>,

    /// Ignition column (random burnable cell if omitted)
    #[arg(long, requires = "ignite_row")]
    ignite_col: Option<i64>,

    /// Disable ember spotting
    #[arg(long)]
    no_spotting: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    println!("=== Fire Spread Demo ===\n");

    let mut rng = StdRng::seed_from_u64(args.seed);
    let grid = TerrainGrid::synthetic(args.rows, args.cols, args.cell_size, &mut rng)?;

    println!(
        "Terrain: {}x{} cells @ {:.0}m ({:.1} x {:.1} km)",
        grid.rows(),
        grid.cols(),
        grid.cell_size(),
        grid.cols() as f64 * grid.cell_size() / 1000.0,
        grid.rows() as f64 * grid.cell_size() / 1000.0
    );
    for fuel in FuelType::ALL {
        let count = grid.count_fuel(fuel);
        println!(
            "  {:<7} {:>7} cells ({:.1}%)",
            fuel,
            count,
            100.0 * count as f64 / grid.len() as f64
        );
    }

    let (row, col) = match (args.ignite_row, args.ignite_col) {
        (Some(row), Some(col)) => (row, col),
        _ => {
            let (row, col) = grid.find_ignition_point(&mut rng, 100);
            (row as i64, col as i64)
        }
    };

    let spotting = if args.no_spotting {
        SpottingConfig::disabled()
    } else {
        SpottingConfig::default()
    };
    let config = SimulationConfig::with_wind(args.wind_speed, args.wind_direction)?
        .cell_size(args.cell_size)
        .seed(args.seed)
        .spotting(spotting);

    println!(
        "Wind: {:.1} m/s from {:.0}°, spotting {}",
        config.wind.speed(),
        config.wind.direction(),
        if config.spotting.enabled { "on" } else { "off" }
    );

    let cell_size = grid.cell_size();
    let mut scheduler = WavefrontScheduler::from_config(grid, &config)?;
    if !scheduler.ignite(row, col, 0.0) {
        warn!("Ignition at ({}, {}) was rejected, nothing will burn", row, col);
    }
    println!("Ignition: ({row}, {col})\n");

    let max_time = args.max_hours * 60.0;
    let mut observer = RecordingObserver::default();
    let outcome = scheduler.run_observed(max_time, &mut observer);
    info!(
        "Run finished: {} cells settled, {} spot fires, {} cells on the frontier",
        outcome.stats.settled_cells,
        outcome.stats.spot_fires,
        outcome.frontier.len()
    );

    println!(
        "{:>7} {:>9} {:>9} {:>11} {:>11} {:>10}",
        "hour", "ignited", "burning", "burnt ha", "active ha", "perim km"
    );
    let frames = frame_times(args.frame_hours * 60.0, max_time);
    let burn_duration = args.burn_hours * 60.0;
    for stats in outcome.field.frame_series(&frames, burn_duration, cell_size) {
        println!(
            "{:>7.1} {:>9} {:>9} {:>11.1} {:>11.1} {:>10.2}",
            stats.time / 60.0,
            stats.ignited_cells,
            stats.active_cells,
            stats.burnt_hectares,
            stats.active_hectares,
            stats.perimeter_km
        );
    }

    println!("\n=== Summary ===");
    println!("Cells reached: {}", outcome.field.reached_cells());
    if let Some(latest) = outcome.field.max_finite_time() {
        println!("Latest arrival: {:.1} h", latest / 60.0);
    }
    println!("Spot fires: {}", observer.spot_fires.len());
    if let Some((source, spot)) = observer
        .spot_fires
        .iter()
        .max_by_key(|(_, spot)| spot.distance_cells)
    {
        println!(
            "Longest spot: {} cells from ({}, {}) to ({}, {}) at {:.1} h",
            spot.distance_cells,
            source.0,
            source.1,
            spot.row,
            spot.col,
            spot.time / 60.0
        );
    }
    if outcome.stats.truncated {
        println!(
            "Horizon of {:.1} h reached with {} cells still pending",
            args.max_hours,
            outcome.frontier.len()
        );
    }

    Ok(())
}
