//! The fixed-size population lattice.
//!
//! Sites are stored row-major; `(x, y)` is (column, row) with the
//! origin at the top-left. Lookups take signed coordinates so hosts
//! can pass raw pointer-derived values: anything off-grid is `None`.
//!
//! A Grid is a value. The stepper and the intervention applicator
//! always build a new Grid from the old one, so a reader holding the
//! previous snapshot never sees a partially updated tick.

use serde::{Deserialize, Serialize};

use crate::{
    cell::{Cell, HealthState},
    error::{SimError, SimResult},
    types::Coord,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    rows:  usize,
    cols:  usize,
    cells: Vec<Option<Cell>>,
}

/// Wire form of a Grid, checked before it becomes one.
#[derive(Deserialize)]
struct RawGrid {
    rows:  usize,
    cols:  usize,
    cells: Vec<Option<Cell>>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = SimError;

    fn try_from(raw: RawGrid) -> SimResult<Self> {
        let RawGrid { rows, cols, cells } = raw;
        if rows.checked_mul(cols) != Some(cells.len()) {
            return Err(SimError::InvalidGrid { rows, cols });
        }
        Ok(Self { rows, cols, cells })
    }
}

impl Grid {
    /// An unpopulated grid.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self { rows, cols, cells: vec![None; rows * cols] }
    }

    /// Build a grid site by site. `f` receives `(x, y)` in row-major order.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Option<Cell>,
    {
        let mut cells = Vec::with_capacity(rows * cols);
        for y in 0..rows {
            for x in 0..cols {
                cells.push(f(x, y));
            }
        }
        Self { rows, cols, cells }
    }

    /// Parse a textual layout, one line per row:
    /// `.` empty, `H` healthy, `I` infected, `R` recovered, `D` dead.
    /// Handy for hand-built scenarios; any other character is empty.
    pub fn from_pattern(pattern: &str) -> SimResult<Self> {
        let lines: Vec<&str> = pattern
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        if rows == 0 || cols == 0 || lines.iter().any(|l| l.chars().count() != cols) {
            return Err(SimError::InvalidGrid { rows, cols });
        }
        let cells = lines
            .iter()
            .flat_map(|l| l.chars())
            .map(|c| match c {
                'H' => Some(Cell::healthy()),
                'I' => Some(Cell::infected()),
                'R' => Some(Cell::with_state(HealthState::Recovered)),
                'D' => Some(Cell::with_state(HealthState::Dead)),
                _ => None,
            })
            .collect();
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    fn index(&self, x: Coord, y: Coord) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.cols && y < self.rows).then(|| y * self.cols + x)
    }

    pub fn in_bounds(&self, x: Coord, y: Coord) -> bool {
        self.index(x, y).is_some()
    }

    pub fn cell(&self, x: Coord, y: Coord) -> Option<&Cell> {
        self.index(x, y).and_then(|i| self.cells[i].as_ref())
    }

    /// Mutable access to an occupied site. Empty sites stay empty.
    pub fn cell_mut(&mut self, x: Coord, y: Coord) -> Option<&mut Cell> {
        let i = self.index(x, y)?;
        self.cells[i].as_mut()
    }

    pub fn is_occupied(&self, x: Coord, y: Coord) -> bool {
        self.cell(x, y).is_some()
    }

    /// Every site in row-major order as `(x, y, site)`.
    pub fn sites(&self) -> impl Iterator<Item = (usize, usize, Option<&Cell>)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (i % cols, i / cols, c.as_ref()))
    }

    /// Occupied sites in row-major order as `(x, y, cell)`.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, &Cell)> + '_ {
        self.sites().filter_map(|(x, y, c)| c.map(|c| (x, y, c)))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// In-bounds coordinates of the square block of the given radius
    /// centred on `(x, y)`, centre included. Off-grid parts are clipped,
    /// including offsets that would overflow the coordinate type.
    pub fn block(
        &self,
        x: Coord,
        y: Coord,
        radius: Coord,
    ) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        (-radius..=radius)
            .flat_map(move |dy| {
                (-radius..=radius)
                    .filter_map(move |dx| Some((x.checked_add(dx)?, y.checked_add(dy)?)))
            })
            .filter(move |&(nx, ny)| self.in_bounds(nx, ny))
    }

    /// True when both grids have the same shape and the same empty sites.
    pub fn same_occupancy(&self, other: &Grid) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.is_some() == b.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_grid_lookups_are_none() {
        let grid = Grid::from_fn(3, 4, |_, _| Some(Cell::healthy()));
        assert!(grid.cell(0, 0).is_some());
        assert!(grid.cell(3, 2).is_some());
        assert!(grid.cell(4, 0).is_none());
        assert!(grid.cell(0, 3).is_none());
        assert!(grid.cell(-1, 0).is_none());
        assert!(grid.cell(0, -1).is_none());
    }

    #[test]
    fn block_is_clipped_at_the_corner() {
        let grid = Grid::empty(5, 5);
        let corner: Vec<_> = grid.block(0, 0, 1).collect();
        assert_eq!(corner, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(grid.block(2, 2, 2).count(), 25);
        assert_eq!(grid.block(-5, -5, 1).count(), 0);
    }

    #[test]
    fn block_at_extreme_coordinates_is_empty() {
        let grid = Grid::empty(5, 5);
        assert_eq!(grid.block(Coord::MAX, Coord::MAX, 2).count(), 0);
        assert_eq!(grid.block(Coord::MIN, Coord::MIN, 2).count(), 0);
        assert_eq!(grid.block(Coord::MAX, 0, 1).count(), 0);
    }

    #[test]
    fn deserialized_grid_must_match_its_dimensions() {
        let short = serde_json::from_str::<Grid>(r#"{"rows":5,"cols":5,"cells":[]}"#);
        assert!(short.is_err(), "cell count must equal rows * cols");

        let grid = Grid::from_pattern("H.\n.I").unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
        assert!(back.cell(1, 1).is_some());
    }

    #[test]
    fn sites_are_row_major() {
        let grid = Grid::from_pattern("H.\n.I").unwrap();
        let occupied: Vec<_> = grid.occupied().map(|(x, y, c)| (x, y, c.state)).collect();
        assert_eq!(
            occupied,
            vec![(0, 0, HealthState::Healthy), (1, 1, HealthState::Infected)]
        );
    }

    #[test]
    fn ragged_pattern_is_rejected() {
        assert!(Grid::from_pattern("HHH\nHH").is_err());
        assert!(Grid::from_pattern("").is_err());
    }
}
