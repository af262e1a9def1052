//! Local queries the transition rule needs about a site's surroundings.
//!
//! All queries read a single immutable grid and skip off-grid offsets.
//! There is no wraparound at the edges.

use crate::{
    cell::{HealthState, Intervention},
    grid::Grid,
    types::Coord,
};

/// Radius of the Moore neighbourhood (3 × 3 block).
pub const MOORE_RADIUS: Coord = 1;

/// Radius within which a hospital helps recovery (5 × 5 block).
pub const HOSPITAL_RADIUS: Coord = 2;

/// Infected cells among the 8 Moore neighbours of `(x, y)`.
pub fn count_infected_neighbors(grid: &Grid, x: Coord, y: Coord) -> u8 {
    grid.block(x, y, MOORE_RADIUS)
        .filter(|&(nx, ny)| (nx, ny) != (x, y))
        .filter(|&(nx, ny)| grid.cell(nx, ny).is_some_and(|c| c.is(HealthState::Infected)))
        .count() as u8
}

/// True when any cell in the 5 × 5 block around `(x, y)` is a hospital.
pub fn is_near_hospital(grid: &Grid, x: Coord, y: Coord) -> bool {
    grid.block(x, y, HOSPITAL_RADIUS)
        .any(|(nx, ny)| grid.cell(nx, ny).is_some_and(|c| c.has(Intervention::Hospital)))
}

/// True iff the cell at `(x, y)` itself is quarantined.
pub fn is_in_quarantine(grid: &Grid, x: Coord, y: Coord) -> bool {
    grid.cell(x, y).is_some_and(|c| c.has(Intervention::Quarantine))
}

/// Everything the transition rule knows about a site's surroundings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighborhood {
    pub infected_neighbors: u8,
    pub near_hospital:      bool,
    pub in_quarantine:      bool,
}

impl Neighborhood {
    pub fn observe(grid: &Grid, x: Coord, y: Coord) -> Self {
        Self {
            infected_neighbors: count_infected_neighbors(grid, x, y),
            near_hospital:      is_near_hospital(grid, x, y),
            in_quarantine:      is_in_quarantine(grid, x, y),
        }
    }
}
