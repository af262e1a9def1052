//! Shared primitive types used across the entire simulation.

/// A simulation tick. One tick = one generation of the automaton.
pub type Tick = u64;

/// The canonical run identifier.
pub type RunId = String;

/// A signed grid coordinate as supplied by a host (may be off-grid).
pub type Coord = i64;
