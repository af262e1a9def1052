use serde::{Deserialize, Serialize};

use crate::{config::ParamUpdate, intervention::InterventionKind, types::Coord};

/// All player-issued commands.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Clock control ─────────────────────────────
    Pause,
    Resume,
    SetSpeed { speed: f64 },

    // ── Parameters ────────────────────────────────
    UpdateParams { update: ParamUpdate },

    // ── Grid edits (allowed while paused) ─────────
    Intervene { kind: InterventionKind, x: Coord, y: Coord },
    InfectCell { x: Coord, y: Coord },
    SeedInfections { count: usize },

    // ── Run control ───────────────────────────────
    RefillSupply,
    Reset,
}

impl PlayerCommand {
    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pause               => "pause",
            Self::Resume              => "resume",
            Self::SetSpeed { .. }     => "set_speed",
            Self::UpdateParams { .. } => "update_params",
            Self::Intervene { .. }    => "intervene",
            Self::InfectCell { .. }   => "infect_cell",
            Self::SeedInfections { .. } => "seed_infections",
            Self::RefillSupply        => "refill_supply",
            Self::Reset               => "reset",
        }
    }
}
