//! Player interventions: localized, out-of-band grid mutations.
//!
//! Each operation returns a new grid and leaves the input alone.
//! Targets and block cells off the grid are clipped, empty sites are
//! skipped, and occupancy never changes.

use serde::{Deserialize, Serialize};

use crate::{
    cell::{HealthState, Intervention},
    grid::Grid,
    types::Coord,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InterventionKind {
    /// 3 × 3: healthy cells become immune.
    Vaccination,
    /// 5 × 5: raises the infection threshold of every cell in the zone.
    Quarantine,
    /// Single cell: boosts recovery in its 5 × 5 surroundings.
    Hospital,
}

impl InterventionKind {
    pub fn tag(self) -> Intervention {
        match self {
            Self::Vaccination => Intervention::Vaccinated,
            Self::Quarantine  => Intervention::Quarantine,
            Self::Hospital    => Intervention::Hospital,
        }
    }

    /// Half-width of the affected square block.
    pub fn radius(self) -> Coord {
        match self {
            Self::Vaccination => 1,
            Self::Quarantine  => 2,
            Self::Hospital    => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Vaccination => "vaccination",
            Self::Quarantine  => "quarantine",
            Self::Hospital    => "hospital",
        }
    }
}

/// Apply `kind` centred on `(x, y)`.
///
/// A cell carries at most one tag; the newest intervention wins.
pub fn apply_intervention(grid: &Grid, kind: InterventionKind, x: Coord, y: Coord) -> Grid {
    let mut next = grid.clone();
    for (nx, ny) in grid.block(x, y, kind.radius()) {
        let Some(cell) = next.cell_mut(nx, ny) else { continue };
        match kind {
            InterventionKind::Vaccination => {
                // Only susceptible cells are immunised.
                if cell.is(HealthState::Healthy) {
                    cell.state = HealthState::Recovered;
                    cell.immunity_time = 0;
                    cell.intervention = Some(Intervention::Vaccinated);
                }
            }
            InterventionKind::Quarantine | InterventionKind::Hospital => {
                cell.intervention = Some(kind.tag());
            }
        }
    }

    next
}

/// Manually place an infection. Only a healthy occupant is affected.
pub fn infect_cell(grid: &Grid, x: Coord, y: Coord) -> Grid {
    let mut next = grid.clone();
    if let Some(cell) = next.cell_mut(x, y) {
        if cell.is(HealthState::Healthy) {
            cell.infect();
        }
    }
    next
}
