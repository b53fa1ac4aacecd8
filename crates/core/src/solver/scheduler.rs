//! Wavefront scheduler: earliest-arrival relaxation over the terrain graph
//!
//! A Dijkstra-style label-setting run over the 8-connected grid with directed,
//! anisotropic edge weights from [`SpreadRateModel`]. Because every edge travel time
//! is strictly positive, a cell popped from the queue with the smallest time can be
//! finalized immediately.
//!
//! # Run loop
//!
//! 1. Pop the earliest [`PendingEvent`] (ties: row, then column)
//! 2. Stop if it lies beyond the horizon; skip it if the cell already settled
//! 3. Settle the cell
//! 4. Relax each unsettled, burnable neighbor with `t + travel_time`
//! 5. Let [`EmberSpotting`] propose at most one spot fire, relaxed the same way
//!
//! Water is never queued: it cannot be seeded, spread into, or spotted on.
//!
//! # Horizon
//!
//! Events later than `max_time` are never settled. Cells that hold a tentative
//! time when the run stops are reported in [`RunOutcome::frontier`] and left
//! unreached in the returned field, so every finite time in the field is a
//! committed arrival.

use crate::config::SimulationConfig;
use crate::core_types::Wind;
use crate::error::SimulationError;
use crate::grid::{IgnitionTimeField, TerrainGrid};
use crate::physics::{EmberSpotting, SpottingConfig, SpreadRateModel, NEIGHBORS};
use crate::solver::{NoopObserver, PendingEvent, RunObserver, RunStats};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BinaryHeap;
use tracing::{debug, info, trace, warn};

/// Lifecycle of a cell within one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    /// No candidate time yet
    #[default]
    Unseen,
    /// Holds a candidate time that may still decrease
    Pending,
    /// Arrival time committed
    Settled,
}

/// Everything a finished run produces
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Committed arrival times; unsettled cells are `INFINITY`
    pub field: IgnitionTimeField,
    /// Cells left with a tentative time at the horizon, row-major
    pub frontier: Vec<PendingEvent>,
    /// Run counters
    pub stats: RunStats,
}

/// Single-use spread solver owning its terrain, queue, and random source
pub struct WavefrontScheduler<R: Rng = StdRng> {
    grid: TerrainGrid,
    wind: Wind,
    rates: SpreadRateModel,
    spotting: EmberSpotting,
    rng: R,
    field: IgnitionTimeField,
    state: Vec<CellState>,
    queue: BinaryHeap<PendingEvent>,
}

impl WavefrontScheduler<StdRng> {
    /// Build a scheduler from a configuration, seeding a [`StdRng`] from `config.seed`
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid, or
    /// [`SimulationError::CellSizeMismatch`] if `config.cell_size` differs from the grid's.
    pub fn from_config(grid: TerrainGrid, config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        if config.cell_size != grid.cell_size() {
            return Err(SimulationError::CellSizeMismatch {
                configured: config.cell_size,
                grid: grid.cell_size(),
            });
        }
        Self::new(
            grid,
            config.wind,
            config.spotting,
            StdRng::seed_from_u64(config.seed),
        )
    }

    /// Build a scheduler with default spotting and a seeded [`StdRng`]
    ///
    /// # Errors
    /// Returns an error if the wind is invalid.
    pub fn with_seed(grid: TerrainGrid, wind: Wind, seed: u64) -> Result<Self, SimulationError> {
        Self::new(
            grid,
            wind,
            SpottingConfig::default(),
            StdRng::seed_from_u64(seed),
        )
    }
}

impl<R: Rng> WavefrontScheduler<R> {
    /// Build a scheduler with an explicit random source
    ///
    /// # Errors
    /// - [`SimulationError::InvalidWindSpeed`] / [`SimulationError::InvalidWindDirection`]
    ///   for a wind that bypassed [`Wind::new`]
    /// - [`SimulationError::InvalidSpottingConfig`] for bad spotting parameters
    pub fn new(
        grid: TerrainGrid,
        wind: Wind,
        spotting: SpottingConfig,
        rng: R,
    ) -> Result<Self, SimulationError> {
        let wind = Wind::new(wind.speed(), wind.direction())?;
        let spotting = EmberSpotting::new(spotting)?;

        info!(
            "Creating wavefront scheduler: {}x{} grid, cell_size={:.2}m, wind={:.1}m/s from {:.0}°, spotting={}",
            grid.rows(),
            grid.cols(),
            grid.cell_size(),
            wind.speed(),
            wind.direction(),
            spotting.config().enabled
        );

        let len = grid.len();
        Ok(Self {
            rates: SpreadRateModel::new(&wind),
            field: IgnitionTimeField::never(grid.rows(), grid.cols()),
            state: vec![CellState::Unseen; len],
            queue: BinaryHeap::new(),
            grid,
            wind,
            spotting,
            rng,
        })
    }

    /// Terrain being burned
    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    /// Wind for the run
    pub fn wind(&self) -> &Wind {
        &self.wind
    }

    /// Current best-known times, including tentative ones
    pub fn field(&self) -> &IgnitionTimeField {
        &self.field
    }

    /// State of `(row, col)`
    pub fn cell_state(&self, row: usize, col: usize) -> CellState {
        self.state[self.grid.index(row, col)]
    }

    /// Number of queued entries, stale ones included
    pub fn queued_events(&self) -> usize {
        self.queue.len()
    }

    /// Seed a fire at `(row, col)` starting at `start_time` minutes
    ///
    /// Off-grid cells, Water cells, and NaN or infinite start times are ignored.
    /// Negative start times are accepted. Returns whether the seed was accepted.
    /// Seeding an already-seeded cell keeps the earlier of the two times.
    pub fn ignite(&mut self, row: i64, col: i64, start_time: f64) -> bool {
        if !start_time.is_finite() {
            debug!("Ignoring ignition at ({}, {}): start time {}", row, col, start_time);
            return false;
        }
        let Some((r, c)) = self.grid.cell_at(row, col) else {
            debug!("Ignoring ignition at ({}, {}): outside grid", row, col);
            return false;
        };
        if !self.grid.fuel(r, c).is_burnable() {
            debug!("Ignoring ignition at ({}, {}): water", row, col);
            return false;
        }

        let idx = self.grid.index(r, c);
        if self.field.lower(idx, start_time).is_some() {
            self.state[idx] = CellState::Pending;
            self.queue.push(PendingEvent::new(start_time, r, c));
        }
        debug!("Ignition seeded at ({}, {}) t={:.2}min", r, c, start_time);
        true
    }

    /// Run to completion or until `max_time` minutes, returning the committed field
    pub fn run(self, max_time: f64) -> IgnitionTimeField {
        self.run_observed(max_time, &mut NoopObserver).field
    }

    /// Run with an observer, returning field, frontier, and counters
    ///
    /// A NaN horizon is treated as unbounded.
    pub fn run_observed<O: RunObserver + ?Sized>(
        mut self,
        max_time: f64,
        observer: &mut O,
    ) -> RunOutcome {
        let horizon = if max_time.is_nan() {
            warn!("NaN time horizon, running to completion");
            f64::INFINITY
        } else {
            max_time
        };

        let mut stats = RunStats::default();

        while let Some(event) = self.queue.pop() {
            if event.time > horizon {
                stats.truncated = true;
                debug!(
                    "Horizon {:.2}min reached, discarding {} queued events",
                    horizon,
                    self.queue.len() + 1
                );
                break;
            }

            let idx = self.grid.index(event.row, event.col);
            if self.state[idx] == CellState::Settled {
                stats.stale_pops += 1;
                continue;
            }

            self.state[idx] = CellState::Settled;
            stats.settled_cells += 1;
            stats.last_settled_time = Some(event.time);
            trace!("Settled ({}, {}) at {:.3}min", event.row, event.col, event.time);
            observer.on_settle(&event);

            self.relax_neighbors(&event, &mut stats, observer);

            let spot = self.spotting.try_spot(
                &mut self.rng,
                &self.grid,
                &self.wind,
                &self.field,
                (event.time, event.row, event.col),
            );
            if let Some(spot) = spot {
                if self.relax(PendingEvent::new(spot.time, spot.row, spot.col), &mut stats, observer) {
                    stats.spot_fires += 1;
                    debug!(
                        "Spot fire from ({}, {}) lands at ({}, {}) t={:.2}min after {:.1}min flight",
                        event.row, event.col, spot.row, spot.col, spot.time, spot.flight_time
                    );
                    observer.on_spot_fire((event.row, event.col), &spot);
                }
            }
        }

        let outcome = self.finish(stats);
        info!(
            "Run complete: {} settled, {} stale, {} relaxations, {} spot fires, truncated={}",
            outcome.stats.settled_cells,
            outcome.stats.stale_pops,
            outcome.stats.relaxations,
            outcome.stats.spot_fires,
            outcome.stats.truncated
        );
        observer.on_finish(&outcome.stats);
        outcome
    }

    /// Offer `t + travel_time` to every unsettled, burnable neighbor
    fn relax_neighbors<O: RunObserver + ?Sized>(
        &mut self,
        event: &PendingEvent,
        stats: &mut RunStats,
        observer: &mut O,
    ) {
        let from = (event.row, event.col);
        for neighbor in NEIGHBORS {
            let Some(to) = neighbor.step_from(&self.grid, event.row, event.col) else {
                continue;
            };
            let idx = self.grid.index(to.0, to.1);
            if self.state[idx] == CellState::Settled || !self.grid.fuel(to.0, to.1).is_burnable() {
                continue;
            }

            let edge = self.rates.edge(&self.grid, from, to, neighbor);
            self.relax(
                PendingEvent::new(event.time + edge.travel_time, to.0, to.1),
                stats,
                observer,
            );
        }
    }

    /// Decrease-key: lower the cell's time and enqueue if `candidate` improves it
    fn relax<O: RunObserver + ?Sized>(
        &mut self,
        candidate: PendingEvent,
        stats: &mut RunStats,
        observer: &mut O,
    ) -> bool {
        let idx = self.grid.index(candidate.row, candidate.col);
        let Some(previous) = self.field.lower(idx, candidate.time) else {
            return false;
        };

        if self.state[idx] == CellState::Unseen {
            self.state[idx] = CellState::Pending;
        }
        self.queue.push(candidate);
        stats.relaxations += 1;
        observer.on_relax(&candidate, previous);
        true
    }

    /// Split committed times from tentative ones
    fn finish(self, stats: RunStats) -> RunOutcome {
        let mut field = self.field;
        let mut frontier = Vec::new();

        for (idx, state) in self.state.iter().enumerate() {
            if *state != CellState::Settled && field.times[idx].is_finite() {
                frontier.push(PendingEvent::new(
                    field.times[idx],
                    idx / self.grid.cols(),
                    idx % self.grid.cols(),
                ));
                field.times[idx] = f64::INFINITY;
            }
        }

        if !frontier.is_empty() {
            debug!("{} cells left tentative at the horizon", frontier.len());
        }

        RunOutcome {
            field,
            frontier,
            stats,
        }
    }
}
