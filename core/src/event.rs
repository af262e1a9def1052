//! Events the engine reports back to its host.
//!
//! RULE: hosts learn what happened ONLY through events and read-only
//! snapshots. Nothing outside the engine mutates the grid.

use crate::{
    config::SimParams,
    intervention::InterventionKind,
    types::{Coord, RunId, Tick},
};
use serde::{Deserialize, Serialize};

/// Every event emitted during simulation.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Engine events ──────────────────────────────
    RunInitialized {
        run_id:   RunId,
        seed:     u64,
        occupied: usize,
        infected: usize,
    },
    TickCompleted {
        tick:     Tick,
        infected: usize,
        dead:     usize,
        r_value:  f64,
    },
    SimulationReset {
        epoch:    u64,
        occupied: usize,
    },

    // ── Clock events ───────────────────────────────
    Paused  { tick: Tick },
    Resumed { tick: Tick },
    SpeedChanged { tick: Tick, speed: f64 },

    // ── Player edits ───────────────────────────────
    InterventionApplied {
        tick: Tick,
        kind: InterventionKind,
        x:    Coord,
        y:    Coord,
        remaining: Option<u32>,
    },
    InterventionRejected {
        tick:   Tick,
        kind:   InterventionKind,
        reason: String,
    },
    CellInfected {
        tick: Tick,
        x:    Coord,
        y:    Coord,
    },
    InfectionsSeeded {
        tick:      Tick,
        requested: usize,
        infected:  usize,
    },
    SupplyRefilled {
        tick: Tick,
    },

    // ── Parameter events ───────────────────────────
    ParamsUpdated {
        tick:   Tick,
        params: SimParams,
    },
    ParamsRejected {
        tick:   Tick,
        reason: String,
    },
    PopulationReseeded {
        tick:     Tick,
        density:  f64,
        occupied: usize,
    },
}
