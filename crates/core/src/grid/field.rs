//! Ignition-time field produced by a spread run
//!
//! One arrival time per cell in minutes, `f64::INFINITY` for cells the fire never
//! reached. Downstream renderers slice the field into frames: a cell is burning at
//! `frame_time` when `ignition <= frame_time < ignition + burn_duration`, and burnt
//! once `ignition <= frame_time`.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Square meters per hectare
const M2_PER_HECTARE: f64 = 10_000.0;

/// Earliest arrival time per cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgnitionTimeField {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    /// Arrival time in minutes (row-major), `INFINITY` = never ignited
    pub(crate) times: Vec<f64>,
}

/// Area and perimeter summary for one animation frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    /// Frame time in minutes
    pub time: f64,
    /// Cells ignited at or before `time`
    pub ignited_cells: usize,
    /// Cells ignited within the last `burn_duration`
    pub active_cells: usize,
    /// Total burnt area in hectares
    pub burnt_hectares: f64,
    /// Actively burning area in hectares
    pub active_hectares: f64,
    /// Length of the ignited-region boundary in kilometers
    pub perimeter_km: f64,
}

impl IgnitionTimeField {
    /// Field with every cell unreached
    pub fn never(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            times: vec![f64::INFINITY; rows * cols],
        }
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

    /// Arrival time at `(row, col)`, `INFINITY` if never reached
    #[inline]
    pub fn time(&self, row: usize, col: usize) -> f64 {
        self.times[row * self.cols + col]
    }

    /// Arrival time at `(row, col)`, or `None` if never reached
    #[inline]
    pub fn arrival(&self, row: usize, col: usize) -> Option<f64> {
        let t = self.time(row, col);
        t.is_finite().then_some(t)
    }

    /// Row-major arrival times
    pub fn as_slice(&self) -> &[f64] {
        &self.times
    }

    /// Lower a cell's time, returning the previous value if it decreased
    #[inline]
    pub(crate) fn lower(&mut self, idx: usize, time: f64) -> Option<f64> {
        let previous = self.times[idx];
        (time < previous).then(|| {
            self.times[idx] = time;
            previous
        })
    }

    /// Number of cells with a finite arrival time
    pub fn reached_cells(&self) -> usize {
        self.times.iter().filter(|t| t.is_finite()).count()
    }

    /// Latest finite arrival time, or `None` if nothing ignited
    pub fn max_finite_time(&self) -> Option<f64> {
        self.times
            .iter()
            .copied()
            .filter(|t| t.is_finite())
            .max_by(f64::total_cmp)
    }

    /// Whether `(row, col)` is burning at `frame_time`
    #[inline]
    pub fn is_burning(&self, row: usize, col: usize, frame_time: f64, burn_duration: f64) -> bool {
        is_active(self.time(row, col), frame_time, burn_duration)
    }

    /// Row-major mask of cells ignited at or before `frame_time`
    pub fn ignited_mask(&self, frame_time: f64) -> Vec<bool> {
        self.times.iter().map(|&t| t <= frame_time).collect()
    }

    /// Row-major mask of cells burning at `frame_time`
    pub fn active_mask(&self, frame_time: f64, burn_duration: f64) -> Vec<bool> {
        self.times
            .iter()
            .map(|&t| is_active(t, frame_time, burn_duration))
            .collect()
    }

    /// Burnt area, active area, and perimeter at one frame
    ///
    /// The perimeter counts every edge between an ignited and an unignited cell,
    /// treating everything beyond the grid border as unignited.
    pub fn frame_stats(&self, frame_time: f64, burn_duration: f64, cell_size: f64) -> FrameStats {
        let ignited = self.ignited_mask(frame_time);
        let ignited_cells = ignited.iter().filter(|&&b| b).count();
        let active_cells = self
            .times
            .iter()
            .filter(|&&t| is_active(t, frame_time, burn_duration))
            .count();

        let cell_hectares = cell_size * cell_size / M2_PER_HECTARE;
        let segments = self.boundary_segments(&ignited);

        FrameStats {
            time: frame_time,
            ignited_cells,
            active_cells,
            burnt_hectares: ignited_cells as f64 * cell_hectares,
            active_hectares: active_cells as f64 * cell_hectares,
            perimeter_km: segments as f64 * cell_size / 1000.0,
        }
    }

    /// Frame statistics for many frame times, computed in parallel
    pub fn frame_series(
        &self,
        frame_times: &[f64],
        burn_duration: f64,
        cell_size: f64,
    ) -> Vec<FrameStats> {
        frame_times
            .par_iter()
            .map(|&t| self.frame_stats(t, burn_duration, cell_size))
            .collect()
    }

    /// Count ignited/unignited cell edges, including the grid border
    fn boundary_segments(&self, ignited: &[bool]) -> usize {
        let at = |row: usize, col: usize| ignited[row * self.cols + col];
        let mut segments = 0;

        for row in 0..self.rows {
            for col in 0..self.cols {
                let here = at(row, col);
                // north and west edges, border included
                let north = row > 0 && at(row - 1, col);
                let west = col > 0 && at(row, col - 1);
                segments += usize::from(here != north) + usize::from(here != west);
            }
            // east border
            segments += usize::from(at(row, self.cols - 1));
        }
        // south border
        segments += (0..self.cols).filter(|&c| at(self.rows - 1, c)).count();

        segments
    }
}

/// Fixed-step frame schedule `0, step, 2*step, ...` not exceeding `max_time`
///
/// Returns an empty schedule for a non-positive or non-finite step.
pub fn frame_times(step: f64, max_time: f64) -> Vec<f64> {
    if !step.is_finite() || step <= 0.0 || !max_time.is_finite() || max_time < 0.0 {
        return Vec::new();
    }
    let count = (max_time / step).floor() as usize + 1;
    (0..count).map(|i| i as f64 * step).collect()
}

#[inline]
fn is_active(ignition: f64, frame_time: f64, burn_duration: f64) -> bool {
    ignition <= frame_time && frame_time < ignition + burn_duration
}
