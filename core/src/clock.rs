//! Simulation clock: owns tick state, speed control, and pause.
//!
//! The clock does not sleep. A host scheduler asks it how long a tick
//! should take and drives `SimEngine::tick` at that cadence.

use crate::types::Tick;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ticks per second at 1.0x speed.
pub const BASE_TICK_RATE: f64 = 60.0;

pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 5.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimClock {
    pub current_tick: Tick,
    pub speed:        f64,
    pub paused:       bool,
}

impl SimClock {
    pub fn new(speed: f64) -> Self {
        Self {
            current_tick: 0,
            speed: speed.clamp(MIN_SPEED, MAX_SPEED),
            paused: true,
        }
    }

    /// Advance one tick. Returns the new tick number.
    /// Panics if called while paused; callers must check.
    pub fn advance(&mut self) -> Tick {
        assert!(!self.paused, "advance() called on paused clock");
        self.current_tick += 1;
        self.current_tick
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }

    /// Back to tick 0, paused. Speed is kept.
    pub fn reset(&mut self) {
        self.current_tick = 0;
        self.paused = true;
    }

    /// Set the speed multiplier, clamped to [MIN_SPEED, MAX_SPEED].
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    pub fn ticks_per_second(&self) -> f64 {
        BASE_TICK_RATE * self.speed
    }

    /// Wall-clock time one tick should take at the current speed.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.ticks_per_second())
    }
}
