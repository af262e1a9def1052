//! One synchronous tick over the whole grid.
//!
//! Every site's next value is computed from the same previous
//! snapshot and written into a freshly built grid, so a cell infected
//! this tick only influences its neighbours from the next tick on and
//! the result does not depend on iteration order.

use crate::{
    config::SimParams,
    grid::Grid,
    neighborhood::Neighborhood,
    rng::RandomSource,
    transition::next_cell,
    types::Coord,
};

/// Produce the next generation. `grid` is never mutated.
///
/// Sites are visited row-major and only occupied sites can consume
/// random draws, so a seeded source gives a reproducible tick.
pub fn step<R: RandomSource + ?Sized>(grid: &Grid, params: &SimParams, rng: &mut R) -> Grid {
    Grid::from_fn(grid.rows(), grid.cols(), |x, y| {
        let (x, y) = (x as Coord, y as Coord);
        grid.cell(x, y).map(|cell| {
            let hood = Neighborhood::observe(grid, x, y);
            next_cell(cell, &hood, params, rng)
        })
    })
}
