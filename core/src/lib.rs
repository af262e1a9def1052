//! Outbreak Automata: a cellular-automaton epidemic engine.
//!
//! A 2-D lattice of individuals moves between healthy, infected,
//! recovered and dead according to Moore-neighbourhood rules, seeded
//! random outcomes, and player interventions (vaccination, quarantine,
//! hospitals). Rendering, input and UI live in the host.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`cell`] | Cell record: health state, timers, strain, intervention tag |
//! | [`grid`] | Fixed-size row-major lattice of optional cells |
//! | [`neighborhood`] | Infected-neighbour count, hospital proximity, quarantine |
//! | [`transition`] | Per-cell state machine for one tick |
//! | [`stepper`] | Synchronous whole-grid tick |
//! | [`intervention`] | Vaccination / quarantine / hospital placement, manual infection |
//! | [`seeder`] | Random population and random infection seeding |
//! | [`stats`] | Per-state tallies and the reproduction estimate |
//! | [`engine`] | Owns a running outbreak: clock, snapshot, commands |

pub mod cell;
pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod grid;
pub mod intervention;
pub mod neighborhood;
pub mod rng;
pub mod seeder;
pub mod stats;
pub mod stepper;
pub mod supply;
pub mod transition;
pub mod types;
