//! The per-cell state machine.
//!
//! A pure function of (cell, neighbourhood, params, random source).
//! It never reads the grid itself and never touches the
//! `intervention` tag: interventions only change the inputs
//! (threshold scaling, recovery bonus) the rule sees.

use crate::{
    cell::{Cell, HealthState},
    config::SimParams,
    neighborhood::Neighborhood,
    rng::RandomSource,
};

/// Multiplier on the infection threshold inside a quarantine zone.
pub const QUARANTINE_THRESHOLD_FACTOR: f64 = 1.5;

/// Recovery chance added near a hospital.
pub const HOSPITAL_RECOVERY_BONUS: f64 = 0.2;

/// The hospital bonus never lifts recovery above this.
pub const HOSPITAL_RECOVERY_CAP: f64 = 0.95;

/// Infected neighbours a healthy cell can tolerate before infection.
pub fn infection_threshold(params: &SimParams, in_quarantine: bool) -> u32 {
    if in_quarantine {
        (f64::from(params.transmission_rate) * QUARANTINE_THRESHOLD_FACTOR).ceil() as u32
    } else {
        params.transmission_rate
    }
}

/// Chance an infected cell recovers when its infection resolves.
pub fn recovery_chance(params: &SimParams, near_hospital: bool) -> f64 {
    if near_hospital {
        (params.recovery_rate + HOSPITAL_RECOVERY_BONUS).min(HOSPITAL_RECOVERY_CAP)
    } else {
        params.recovery_rate
    }
}

/// Advance one cell by one tick.
pub fn next_cell<R: RandomSource + ?Sized>(
    cell: &Cell,
    hood: &Neighborhood,
    params: &SimParams,
    rng: &mut R,
) -> Cell {
    let mut next = cell.clone();

    match cell.state {
        HealthState::Healthy => {
            let threshold = infection_threshold(params, hood.in_quarantine);
            if u32::from(hood.infected_neighbors) >= threshold {
                next.infect();
            }
        }

        HealthState::Infected => {
            next.infection_time += 1;
            if next.infection_time >= params.infection_duration {
                // Exactly one draw per resolution.
                if rng.next_f64() < recovery_chance(params, hood.near_hospital) {
                    next.recover();
                } else {
                    next.state = HealthState::Dead;
                }
            }
        }

        HealthState::Recovered => {
            next.immunity_time += 1;
            if next.immunity_time >= params.immunity_duration {
                next.state = HealthState::Healthy;
                next.immunity_time = 0;
            }
        }

        HealthState::Dead => {}
    }

    next
}

/// `next_cell` lifted over a possibly empty site. Empty stays empty.
pub fn transition<R: RandomSource + ?Sized>(
    site: Option<&Cell>,
    hood: &Neighborhood,
    params: &SimParams,
    rng: &mut R,
) -> Option<Cell> {
    site.map(|cell| next_cell(cell, hood, params, rng))
}
