//! Initial population placement and random infection seeding.

use crate::{
    cell::{Cell, HealthState},
    grid::Grid,
    rng::RandomSource,
    types::Coord,
};

/// Build a fresh population: each site is occupied by a healthy
/// individual with probability `density`, independently.
pub fn seed_grid<R: RandomSource + ?Sized>(
    rows: usize,
    cols: usize,
    density: f64,
    rng: &mut R,
) -> Grid {
    Grid::from_fn(rows, cols, |_, _| rng.chance(density).then(Cell::healthy))
}

/// Infect up to `count` distinct healthy cells chosen uniformly.
/// With fewer eligible cells than requested, all of them are infected.
///
/// Returns the new grid and the number of cells actually infected.
pub fn seed_random_infections<R: RandomSource + ?Sized>(
    grid: &Grid,
    count: usize,
    rng: &mut R,
) -> (Grid, usize) {
    let mut eligible: Vec<(Coord, Coord)> = grid
        .occupied()
        .filter(|(_, _, c)| c.is(HealthState::Healthy))
        .map(|(x, y, _)| (x as Coord, y as Coord))
        .collect();

    let picks = count.min(eligible.len());
    let mut next = grid.clone();

    // Partial Fisher-Yates: the first `picks` slots end up a uniform
    // sample without replacement.
    for i in 0..picks {
        let remaining = (eligible.len() - i) as u64;
        let j = i + rng.next_u64_below(remaining) as usize;
        eligible.swap(i, j);
        let (x, y) = eligible[i];
        if let Some(cell) = next.cell_mut(x, y) {
            cell.infect();
        }
    }

    (next, picks)
}
