//! Intervention applicator tests: block shapes, clipping, containment.

use outbreak_core::{
    cell::{Cell, HealthState, Intervention},
    config::SimParams,
    grid::Grid,
    intervention::{apply_intervention, infect_cell, InterventionKind},
    rng::RandomSource,
    stepper::step,
};

struct FixedRoll(f64);

impl RandomSource for FixedRoll {
    fn next_f64(&mut self) -> f64 { self.0 }
    fn next_u64_below(&mut self, _n: u64) -> u64 { 0 }
}

fn full_healthy(rows: usize, cols: usize) -> Grid {
    Grid::from_fn(rows, cols, |_, _| Some(Cell::healthy()))
}

fn changed_sites(a: &Grid, b: &Grid) -> Vec<(usize, usize)> {
    a.sites()
        .zip(b.sites())
        .filter(|((_, _, ca), (_, _, cb))| ca != cb)
        .map(|((x, y, _), _)| (x, y))
        .collect()
}

#[test]
fn vaccination_immunises_the_healthy_three_by_three() {
    let grid = full_healthy(5, 5);
    let next = apply_intervention(&grid, InterventionKind::Vaccination, 2, 2);

    let changed = changed_sites(&grid, &next);
    assert_eq!(changed.len(), 9);
    for (x, y) in changed {
        assert!((1..=3).contains(&x) && (1..=3).contains(&y), "({x}, {y}) outside block");
        let cell = next.cell(x as i64, y as i64).unwrap();
        assert_eq!(cell.state, HealthState::Recovered);
        assert_eq!(cell.immunity_time, 0);
        assert_eq!(cell.intervention, Some(Intervention::Vaccinated));
    }
}

#[test]
fn vaccination_leaves_non_healthy_cells_alone() {
    let mut grid = Grid::from_pattern(
        "IRD
         HHH
         .I.",
    )
    .unwrap();
    if let Some(cell) = grid.cell_mut(1, 0) {
        cell.immunity_time = 7;
    }
    let next = apply_intervention(&grid, InterventionKind::Vaccination, 1, 1);

    assert_eq!(next.cell(0, 0), grid.cell(0, 0), "infected untouched");
    assert_eq!(next.cell(1, 0), grid.cell(1, 0), "recovered keeps its timer and no tag");
    assert_eq!(next.cell(2, 0), grid.cell(2, 0), "dead untouched");
    assert_eq!(next.cell(1, 2), grid.cell(1, 2), "infected untouched");
    for x in 0..3 {
        assert!(next.cell(x, 1).unwrap().has(Intervention::Vaccinated));
    }
    assert!(next.same_occupancy(&grid));
}

#[test]
fn quarantine_tags_the_five_by_five_regardless_of_state() {
    let mut grid = full_healthy(7, 7);
    for (x, y) in [(1, 1), (3, 3), (5, 5)] {
        if let Some(cell) = grid.cell_mut(x, y) {
            cell.state = HealthState::Dead;
        }
    }
    let next = apply_intervention(&grid, InterventionKind::Quarantine, 3, 3);

    for (x, y, cell) in next.occupied() {
        let inside = (1..=5).contains(&x) && (1..=5).contains(&y);
        assert_eq!(cell.has(Intervention::Quarantine), inside, "({x}, {y})");
        let before = grid.cell(x as i64, y as i64).unwrap();
        assert_eq!(cell.state, before.state, "quarantine never changes state");
    }
}

#[test]
fn hospital_tags_exactly_one_cell() {
    let grid = full_healthy(5, 5);
    let next = apply_intervention(&grid, InterventionKind::Hospital, 4, 0);
    assert_eq!(changed_sites(&grid, &next), vec![(4, 0)]);
    assert!(next.cell(4, 0).unwrap().has(Intervention::Hospital));
}

#[test]
fn hospital_on_an_empty_site_does_nothing() {
    let grid = Grid::from_pattern("H.H").unwrap();
    let next = apply_intervention(&grid, InterventionKind::Hospital, 1, 0);
    assert_eq!(next, grid);
    assert!(next.cell(1, 0).is_none());
}

#[test]
fn blocks_are_clipped_at_the_edges() {
    let grid = full_healthy(4, 4);

    let corner = apply_intervention(&grid, InterventionKind::Vaccination, 0, 0);
    assert_eq!(changed_sites(&grid, &corner).len(), 4);

    let half_off = apply_intervention(&grid, InterventionKind::Vaccination, -1, -1);
    assert_eq!(changed_sites(&grid, &half_off), vec![(0, 0)]);

    let zone = apply_intervention(&grid, InterventionKind::Quarantine, 3, 0);
    assert_eq!(changed_sites(&grid, &zone).len(), 9);

    for kind in [InterventionKind::Vaccination, InterventionKind::Quarantine, InterventionKind::Hospital] {
        assert_eq!(apply_intervention(&grid, kind, 40, -9), grid, "{kind:?} far off-grid");
    }
}

#[test]
fn last_intervention_wins() {
    let grid = full_healthy(3, 3);
    let zoned = apply_intervention(&grid, InterventionKind::Quarantine, 1, 1);
    let both = apply_intervention(&zoned, InterventionKind::Hospital, 1, 1);
    assert!(both.cell(1, 1).unwrap().has(Intervention::Hospital));
    assert!(both.cell(0, 0).unwrap().has(Intervention::Quarantine));

    let vaccinated = apply_intervention(&both, InterventionKind::Vaccination, 1, 1);
    assert!(vaccinated.cell(1, 1).unwrap().has(Intervention::Vaccinated));
}

#[test]
fn input_grid_is_left_untouched() {
    let grid = full_healthy(5, 5);
    let before = grid.clone();
    let _ = apply_intervention(&grid, InterventionKind::Vaccination, 2, 2);
    let _ = apply_intervention(&grid, InterventionKind::Quarantine, 2, 2);
    let _ = infect_cell(&grid, 2, 2);
    assert_eq!(grid, before);
}

#[test]
fn quarantine_slows_spread_through_the_stepper() {
    let grid = Grid::from_pattern(
        "IIH
         HHH
         HHH",
    )
    .unwrap();
    let params = SimParams { transmission_rate: 2, ..SimParams::default() };

    let open = step(&grid, &params, &mut FixedRoll(0.0));
    assert_eq!(open.cell(1, 1).unwrap().state, HealthState::Infected);

    let zoned = apply_intervention(&grid, InterventionKind::Quarantine, 1, 1);
    let slowed = step(&zoned, &params, &mut FixedRoll(0.0));
    assert_eq!(slowed.cell(1, 1).unwrap().state, HealthState::Healthy);
}

#[test]
fn manual_infection_only_hits_healthy_occupants() {
    let grid = Grid::from_pattern("HR.").unwrap();

    let infected = infect_cell(&grid, 0, 0);
    let cell = infected.cell(0, 0).unwrap();
    assert_eq!(cell.state, HealthState::Infected);
    assert_eq!(cell.infection_time, 0);

    assert_eq!(infect_cell(&grid, 1, 0), grid, "recovered is not susceptible");
    assert_eq!(infect_cell(&grid, 2, 0), grid, "empty stays empty");
    assert_eq!(infect_cell(&grid, -3, 0), grid, "off-grid ignored");
}

#[test]
fn targets_at_the_coordinate_limits_are_clipped_away() {
    let grid = full_healthy(4, 4);
    for kind in [InterventionKind::Vaccination, InterventionKind::Quarantine, InterventionKind::Hospital] {
        assert_eq!(apply_intervention(&grid, kind, i64::MAX, 0), grid, "{} at MAX", kind.name());
        assert_eq!(apply_intervention(&grid, kind, i64::MIN, i64::MIN), grid, "{} at MIN", kind.name());
        assert_eq!(apply_intervention(&grid, kind, 0, i64::MAX), grid, "{} at (0, MAX)", kind.name());
    }
    assert_eq!(infect_cell(&grid, i64::MAX, i64::MIN), grid);
}
