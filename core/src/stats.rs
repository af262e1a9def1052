//! Population tallies and the derived reproduction estimate.

use serde::{Deserialize, Serialize};

use crate::{
    cell::HealthState,
    config::SimParams,
    grid::Grid,
    types::Tick,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub healthy:   usize,
    pub infected:  usize,
    pub recovered: usize,
    pub dead:      usize,
    /// Sum of the four state counts (all occupied sites).
    pub total:     usize,
    /// Completed ticks since the last reset.
    pub frame:     Tick,
    /// Heuristic effective reproduction estimate.
    pub r_value:   f64,
}

impl Statistics {
    /// One scan of `grid`, stamped with `frame` as given.
    pub fn tally(grid: &Grid, params: &SimParams, frame: Tick) -> Self {
        let mut stats = Statistics { frame, ..Statistics::default() };
        for (_, _, cell) in grid.occupied() {
            match cell.state {
                HealthState::Healthy   => stats.healthy += 1,
                HealthState::Infected  => stats.infected += 1,
                HealthState::Recovered => stats.recovered += 1,
                HealthState::Dead      => stats.dead += 1,
            }
        }
        stats.total = stats.healthy + stats.infected + stats.recovered + stats.dead;
        stats.r_value = reproduction_estimate(stats.infected, stats.total, params);
        stats
    }

    /// Share of the population currently infected, in [0, 1].
    pub fn prevalence(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.infected as f64 / self.total as f64
        }
    }
}

/// Statistics after a completed tick: the frame advances by one.
pub fn compute_statistics(grid: &Grid, params: &SimParams, previous_frame: Tick) -> Statistics {
    Statistics::tally(grid, params, previous_frame + 1)
}

/// `(infected / total) × transmission_rate`, or 0 with no infections.
pub fn reproduction_estimate(infected: usize, total: usize, params: &SimParams) -> f64 {
    if infected == 0 || total == 0 {
        return 0.0;
    }
    infected as f64 / total as f64 * f64::from(params.transmission_rate)
}
