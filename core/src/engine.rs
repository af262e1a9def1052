//! The simulation engine: the one place that owns a running outbreak.
//!
//! PER-TICK ORDER (fixed):
//!   1. Advance the clock.
//!   2. Step every site against the previous snapshot (stepper).
//!   3. Recompute statistics from the new snapshot (frame + 1).
//!
//! RULES:
//!   - The current grid is an `Arc<Grid>` that is replaced, never
//!     mutated. Readers holding an old snapshot keep a consistent view.
//!   - Player edits (interventions, manual infections, parameter
//!     changes) happen between ticks and work while paused.
//!   - All randomness flows through the RngBank.

use std::sync::Arc;

use crate::{
    cell::HealthState,
    clock::{SimClock, MAX_SPEED, MIN_SPEED},
    command::PlayerCommand,
    config::{ParamUpdate, SimConfig, SimParams},
    error::{SimError, SimResult},
    event::SimEvent,
    grid::Grid,
    intervention::{apply_intervention, infect_cell, InterventionKind},
    rng::{RngBank, RngSlot, SimRng},
    seeder::{seed_grid, seed_random_infections},
    stats::{compute_statistics, Statistics},
    stepper::step,
    supply::InterventionSupply,
    types::{Coord, RunId, Tick},
};

/// Dump the active parameters to the trace log this often.
pub const PARAM_LOG_INTERVAL: Tick = 60;

pub struct SimEngine {
    pub run_id:   RunId,
    pub clock:    SimClock,
    pub rng_bank: RngBank,
    seed:         u64,
    /// Bumped by every reset so a new run never replays the old one.
    epoch:        u64,
    config:       SimConfig,
    grid:         Arc<Grid>,
    stats:        Statistics,
    supply:       InterventionSupply,
    infection_rng: SimRng,
    announced:    bool,
}

impl SimEngine {
    /// Validate `config`, seed the population and place the initial
    /// infections. The engine starts paused at frame 0.
    pub fn new(run_id: RunId, seed: u64, mut config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        config.params.simulation_speed = effective_speed(config.params.simulation_speed);

        let rng_bank = RngBank::new(seed);
        let infection_rng = rng_bank.for_slot(RngSlot::Infection, 0, 0);
        let mut engine = Self {
            clock: SimClock::new(config.params.simulation_speed),
            supply: InterventionSupply::new(config.supply.clone()),
            grid: Arc::new(Grid::empty(config.grid.rows, config.grid.cols)),
            stats: Statistics::default(),
            epoch: 0,
            announced: false,
            run_id,
            rng_bank,
            seed,
            config,
            infection_rng,
        };
        engine.populate();
        engine.stats = Statistics::tally(&engine.grid, &engine.config.params, 0);
        Ok(engine)
    }

    /// The current snapshot. Cheap to clone and safe to keep.
    pub fn grid(&self) -> Arc<Grid> {
        Arc::clone(&self.grid)
    }

    pub fn statistics(&self) -> &Statistics { &self.stats }
    pub fn params(&self) -> &SimParams { &self.config.params }
    pub fn config(&self) -> &SimConfig { &self.config }
    pub fn supply(&self) -> &InterventionSupply { &self.supply }
    pub fn seed(&self) -> u64 { self.seed }
    pub fn epoch(&self) -> u64 { self.epoch }

    /// Advance one tick. This is the core simulation step.
    pub fn tick(&mut self) -> SimResult<Vec<SimEvent>> {
        if self.clock.paused {
            return Err(SimError::EnginePaused { tick: self.clock.current_tick });
        }

        let tick = self.clock.advance();
        let params = &self.config.params;

        let mut rng = self.rng_bank.for_slot(RngSlot::Transition, self.epoch, tick);
        self.grid = Arc::new(step(&self.grid, params, &mut rng));
        self.stats = compute_statistics(&self.grid, params, self.stats.frame);

        log::debug!(
            "tick={tick} healthy={} infected={} recovered={} dead={} r={:.2}",
            self.stats.healthy,
            self.stats.infected,
            self.stats.recovered,
            self.stats.dead,
            self.stats.r_value
        );
        if tick % PARAM_LOG_INTERVAL == 0 {
            log::trace!("tick={tick} params: {params:?}");
        }

        Ok(vec![SimEvent::TickCompleted {
            tick,
            infected: self.stats.infected,
            dead:     self.stats.dead,
            r_value:  self.stats.r_value,
        }])
    }

    /// Run n ticks in a loop. Used for testing and fast-forward.
    /// Steps even when paused; the pause state is restored afterwards.
    pub fn run_ticks(&mut self, n: u64) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();
        if !self.announced {
            events.push(SimEvent::RunInitialized {
                run_id:   self.run_id.clone(),
                seed:     self.seed,
                occupied: self.stats.total,
                infected: self.stats.infected,
            });
            self.announced = true;
        }

        let was_paused = self.clock.paused;
        self.clock.resume();
        for _ in 0..n {
            match self.tick() {
                Ok(tick_events) => events.extend(tick_events),
                Err(e) => {
                    self.clock.paused = was_paused;
                    return Err(e);
                }
            }
        }
        self.clock.paused = was_paused;
        Ok(events)
    }

    /// Apply one player command between ticks.
    pub fn apply_command(&mut self, command: PlayerCommand) -> Vec<SimEvent> {
        let tick = self.clock.current_tick;
        log::debug!("tick={tick} command: {}", command.name());

        match command {
            PlayerCommand::Pause => {
                self.clock.pause();
                vec![SimEvent::Paused { tick }]
            }
            PlayerCommand::Resume => {
                self.clock.resume();
                vec![SimEvent::Resumed { tick }]
            }
            PlayerCommand::SetSpeed { speed } => {
                self.update_params(&ParamUpdate {
                    simulation_speed: Some(speed),
                    ..ParamUpdate::default()
                })
            }
            PlayerCommand::UpdateParams { update } => self.update_params(&update),
            PlayerCommand::Intervene { kind, x, y } => vec![self.intervene(kind, x, y)],
            PlayerCommand::InfectCell { x, y } => self.infect_cell(x, y),
            PlayerCommand::SeedInfections { count } => vec![self.seed_infections(count)],
            PlayerCommand::RefillSupply => {
                self.supply.refill();
                vec![SimEvent::SupplyRefilled { tick }]
            }
            PlayerCommand::Reset => vec![self.reset()],
        }
    }

    /// Place an intervention if the tool still has stock.
    pub fn intervene(&mut self, kind: InterventionKind, x: Coord, y: Coord) -> SimEvent {
        let tick = self.clock.current_tick;
        if !self.supply.try_consume(kind) {
            log::warn!("tick={tick} {} rejected: supply exhausted", kind.name());
            return SimEvent::InterventionRejected {
                tick,
                kind,
                reason: "supply exhausted".into(),
            };
        }

        self.replace_grid(apply_intervention(&self.grid, kind, x, y));
        SimEvent::InterventionApplied {
            tick,
            kind,
            x,
            y,
            remaining: self.supply.remaining(kind),
        }
    }

    /// Manually infect the healthy occupant of `(x, y)`, if any.
    pub fn infect_cell(&mut self, x: Coord, y: Coord) -> Vec<SimEvent> {
        let tick = self.clock.current_tick;
        if !self.grid.cell(x, y).is_some_and(|c| c.is(HealthState::Healthy)) {
            return vec![];
        }
        self.replace_grid(infect_cell(&self.grid, x, y));
        vec![SimEvent::CellInfected { tick, x, y }]
    }

    /// Infect up to `count` random healthy cells.
    pub fn seed_infections(&mut self, count: usize) -> SimEvent {
        let (next, infected) = seed_random_infections(&self.grid, count, &mut self.infection_rng);
        self.replace_grid(next);
        SimEvent::InfectionsSeeded {
            tick: self.clock.current_tick,
            requested: count,
            infected,
        }
    }

    /// Discard the grid and statistics and start over at frame 0.
    pub fn reset(&mut self) -> SimEvent {
        self.epoch += 1;
        self.clock.reset();
        self.supply.refill();
        self.infection_rng = self.rng_bank.for_slot(RngSlot::Infection, self.epoch, 0);
        self.populate();
        self.stats = Statistics::tally(&self.grid, &self.config.params, 0);

        log::info!(
            "run {} reset: epoch={} occupied={}",
            self.run_id,
            self.epoch,
            self.stats.total
        );
        SimEvent::SimulationReset { epoch: self.epoch, occupied: self.stats.total }
    }

    fn update_params(&mut self, update: &ParamUpdate) -> Vec<SimEvent> {
        let tick = self.clock.current_tick;
        let mut params = match self.config.params.merged(update) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("tick={tick} parameter update rejected: {e}");
                return vec![SimEvent::ParamsRejected { tick, reason: e.to_string() }];
            }
        };

        // The params report the speed the clock actually runs at.
        params.simulation_speed = effective_speed(params.simulation_speed);
        let reseed = update.changes_density(&self.config.params);
        let speed_changed = params.simulation_speed != self.config.params.simulation_speed;
        self.config.params = params;

        let mut events = Vec::new();
        if speed_changed {
            self.clock.set_speed(self.config.params.simulation_speed);
            events.push(SimEvent::SpeedChanged { tick, speed: self.clock.speed });
        }
        events.push(SimEvent::ParamsUpdated { tick, params: self.config.params.clone() });

        if reseed {
            self.populate();
            log::info!(
                "tick={tick} population reseeded at density {:.2}",
                self.config.params.population_density
            );
            events.push(SimEvent::PopulationReseeded {
                tick,
                density:  self.config.params.population_density,
                occupied: self.grid.occupied_count(),
            });
        }
        // Counts and r_value depend on params; the frame does not move.
        self.stats = Statistics::tally(&self.grid, &self.config.params, self.stats.frame);
        events
    }

    /// Fresh population plus the configured initial infections.
    fn populate(&mut self) {
        let grid_cfg = &self.config.grid;
        let mut rng =
            self.rng_bank.for_slot(RngSlot::Seeder, self.epoch, self.clock.current_tick);
        let population = seed_grid(
            grid_cfg.rows,
            grid_cfg.cols,
            self.config.params.population_density,
            &mut rng,
        );
        let (grid, _) = seed_random_infections(
            &population,
            grid_cfg.initial_infections,
            &mut self.infection_rng,
        );
        self.grid = Arc::new(grid);
    }

    /// Swap in an edited grid and refresh counts without a new frame.
    fn replace_grid(&mut self, grid: Grid) {
        debug_assert!(grid.same_occupancy(&self.grid), "edits never change occupancy");
        self.grid = Arc::new(grid);
        self.stats = Statistics::tally(&self.grid, &self.config.params, self.stats.frame);
    }
}

fn effective_speed(requested: f64) -> f64 {
    requested.clamp(MIN_SPEED, MAX_SPEED)
}
