//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through SimRng instances derived from the
//! single master seed of the run.
//!
//! Each slot gets its own stream per (epoch, tick), seeded from the
//! master seed. This means:
//!   - Seeding, infection placement and stepping never share a stream.
//!   - A tick's draws are reproducible in isolation.
//!   - A reset (new epoch) never replays the previous population.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::types::Tick;

/// The capability the pure rules need from a random source.
/// Tests substitute a fixed roll; the engine passes a SimRng.
pub trait RandomSource {
    /// Roll a float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64;

    /// Roll a u64 in [0, n). `n` must be > 0.
    fn next_u64_below(&mut self, n: u64) -> u64;

    /// Bernoulli trial: returns true with probability p.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// A named, deterministic RNG for a single slot.
pub struct SimRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SimRng {
    pub fn seed_from(seed: u64) -> Self {
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl RandomSource for SimRng {
    fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }
}

/// All RNG streams for a single run, derived from the master seed.
#[derive(Debug, Clone)]
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_slot(&self, slot: RngSlot, epoch: u64, tick: Tick) -> SimRng {
        let mut seed = self.master_seed ^ (slot as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        seed = seed.wrapping_add(epoch.wrapping_mul(0xbf58_476d_1ce4_e5b9));
        seed ^= tick.wrapping_mul(0x94d0_49bb_1331_11eb);
        SimRng::seed_from(seed).with_name(slot.name())
    }
}

/// Stable slot assignments.
/// NEVER reorder or remove entries. Only append.
/// Reordering changes every slot's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngSlot {
    Seeder = 0,
    Infection = 1,
    Transition = 2,
}

impl RngSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Seeder => "seeder",
            Self::Infection => "infection",
            Self::Transition => "transition",
        }
    }
}
