//! The per-site record of the population lattice.
//!
//! A site is either empty (`None` in the grid) or holds one `Cell`.
//! `state` drives the epidemic state machine; `intervention` is an
//! independent tag laid on top by the player and is only ever
//! replaced by another intervention.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Healthy,
    Infected,
    Recovered,
    /// Absorbing: no rule ever leaves this state.
    Dead,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intervention {
    Vaccinated,
    Quarantine,
    Hospital,
}

/// Infecting strain. Only one strain circulates today.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Alpha,
}

pub const DEFAULT_VARIANT: Variant = Variant::Alpha;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub state:          HealthState,
    /// Ticks spent infected. Meaningful only while Infected.
    pub infection_time: u32,
    /// Ticks spent recovered. Meaningful only while Recovered.
    pub immunity_time:  u32,
    pub variant:        Option<Variant>,
    pub intervention:   Option<Intervention>,
}

impl Cell {
    /// A fresh, untagged healthy individual.
    pub fn healthy() -> Self {
        Self {
            state:          HealthState::Healthy,
            infection_time: 0,
            immunity_time:  0,
            variant:        None,
            intervention:   None,
        }
    }

    pub fn infected() -> Self {
        let mut cell = Self::healthy();
        cell.infect();
        cell
    }

    pub fn with_state(state: HealthState) -> Self {
        Self { state, ..Self::healthy() }
    }

    pub fn with_intervention(mut self, intervention: Intervention) -> Self {
        self.intervention = Some(intervention);
        self
    }

    pub fn is(&self, state: HealthState) -> bool {
        self.state == state
    }

    pub fn has(&self, intervention: Intervention) -> bool {
        self.intervention == Some(intervention)
    }

    /// Enter Infected with a fresh timer. The intervention tag is kept.
    pub fn infect(&mut self) {
        self.state = HealthState::Infected;
        self.infection_time = 0;
        self.variant = Some(DEFAULT_VARIANT);
    }

    /// Enter Recovered with a fresh immunity timer.
    pub fn recover(&mut self) {
        self.state = HealthState::Recovered;
        self.immunity_time = 0;
        self.infection_time = 0;
        self.variant = None;
    }
}

impl Default for Cell {
    fn default() -> Self { Self::healthy() }
}
