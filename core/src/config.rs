use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// The epidemic parameters consumed by the stepper. Immutable for the
/// duration of a tick; replaced wholesale between ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Infected neighbours required to infect a healthy cell.
    pub transmission_rate:  u32,
    /// Ticks until an infected cell resolves.
    pub infection_duration: u32,
    /// Chance of recovery (vs. death) at resolution.
    pub recovery_rate:      f64,
    /// Ticks before a recovered cell is susceptible again.
    pub immunity_duration:  u32,
    /// Informational only. The rule uses `1 - recovery_rate`.
    pub mortality_rate:     f64,
    /// Fraction of sites occupied at seed time.
    pub population_density: f64,
    /// Pacing multiplier for the scheduler. Not read by the rule.
    pub simulation_speed:   f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            transmission_rate:  2,
            infection_duration: 50,
            recovery_rate:      0.8,
            immunity_duration:  100,
            mortality_rate:     0.2,
            population_density: 0.5,
            simulation_speed:   1.0,
        }
    }
}

impl SimParams {
    /// Reject parameter sets the rules cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> SimResult<()> {
            Err(SimError::InvalidConfig { field, reason: reason.into() })
        }

        if self.transmission_rate == 0 {
            return invalid("transmission_rate", "must be at least 1");
        }
        if self.infection_duration == 0 {
            return invalid("infection_duration", "must be at least 1 tick");
        }
        if self.immunity_duration == 0 {
            return invalid("immunity_duration", "must be at least 1 tick");
        }
        if !(0.0..=1.0).contains(&self.recovery_rate) {
            return invalid("recovery_rate", format!("{} is not in [0, 1]", self.recovery_rate));
        }
        if !(0.0..=1.0).contains(&self.mortality_rate) {
            return invalid("mortality_rate", format!("{} is not in [0, 1]", self.mortality_rate));
        }
        if !(self.population_density > 0.0 && self.population_density <= 1.0) {
            return invalid(
                "population_density",
                format!("{} is not in (0, 1]", self.population_density),
            );
        }
        if !(self.simulation_speed.is_finite() && self.simulation_speed > 0.0) {
            return invalid("simulation_speed", format!("{} is not positive", self.simulation_speed));
        }
        Ok(())
    }

    /// Apply a partial update and validate the result.
    /// `self` is left untouched when the merged set is invalid.
    pub fn merged(&self, update: &ParamUpdate) -> SimResult<SimParams> {
        let merged = SimParams {
            transmission_rate:  update.transmission_rate.unwrap_or(self.transmission_rate),
            infection_duration: update.infection_duration.unwrap_or(self.infection_duration),
            recovery_rate:      update.recovery_rate.unwrap_or(self.recovery_rate),
            immunity_duration:  update.immunity_duration.unwrap_or(self.immunity_duration),
            mortality_rate:     update.mortality_rate.unwrap_or(self.mortality_rate),
            population_density: update.population_density.unwrap_or(self.population_density),
            simulation_speed:   update.simulation_speed.unwrap_or(self.simulation_speed),
        };
        merged.validate()?;
        Ok(merged)
    }
}

/// A partial parameter change, e.g. one slider moved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission_rate:  Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infection_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_rate:      Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immunity_duration:  Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mortality_rate:     Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population_density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_speed:   Option<f64>,
}

impl ParamUpdate {
    /// Density changes require a fresh population.
    pub fn changes_density(&self, current: &SimParams) -> bool {
        self.population_density
            .is_some_and(|d| d != current.population_density)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows:               usize,
    pub cols:               usize,
    /// Random infections placed after every (re)seed.
    pub initial_infections: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: 150, cols: 200, initial_infections: 10 }
    }
}

/// Stock of the finite intervention tools. Quarantine is unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyConfig {
    pub vaccines:  u32,
    pub hospitals: u32,
}

impl Default for SupplyConfig {
    fn default() -> Self {
        Self { vaccines: 100, hospitals: 50 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub params: SimParams,
    pub grid:   GridConfig,
    pub supply: SupplyConfig,
}

impl SimConfig {
    /// Load from a JSON file. Missing sections fall back to defaults.
    /// In tests, use SimConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SimConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(SimError::InvalidGrid { rows: self.grid.rows, cols: self.grid.cols });
        }
        self.params.validate()
    }

    /// Small, fully populated world with hardcoded defaults for tests.
    pub fn default_test() -> Self {
        Self {
            params: SimParams {
                population_density: 1.0,
                ..SimParams::default()
            },
            grid: GridConfig { rows: 20, cols: 30, initial_infections: 5 },
            supply: SupplyConfig { vaccines: 3, hospitals: 2 },
        }
    }
}
