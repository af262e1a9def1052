//! Population seeding tests.

use outbreak_core::{
    cell::{Cell, HealthState, Intervention},
    grid::Grid,
    rng::{RngBank, RngSlot},
    seeder::{seed_grid, seed_random_infections},
    stats::Statistics,
    config::SimParams,
};

#[test]
fn full_density_occupies_every_site_with_fresh_healthy_cells() {
    let mut rng = RngBank::new(1).for_slot(RngSlot::Seeder, 0, 0);
    let grid = seed_grid(12, 9, 1.0, &mut rng);
    assert_eq!(grid.occupied_count(), 12 * 9);
    for (_, _, cell) in grid.occupied() {
        assert_eq!(cell, &Cell::healthy());
    }
}

#[test]
fn occupancy_tracks_density() {
    let mut rng = RngBank::new(77).for_slot(RngSlot::Seeder, 0, 0);
    let grid = seed_grid(100, 100, 0.3, &mut rng);
    let share = grid.occupied_count() as f64 / 10_000.0;
    assert!(
        (0.27..0.33).contains(&share),
        "Expected ~30% occupancy, got {:.1}%",
        share * 100.0
    );
}

#[test]
fn reseeding_with_the_same_source_is_reproducible() {
    let bank = RngBank::new(0xC0FFEE);
    let a = seed_grid(50, 50, 0.5, &mut bank.for_slot(RngSlot::Seeder, 0, 0));
    let b = seed_grid(50, 50, 0.5, &mut bank.for_slot(RngSlot::Seeder, 0, 0));
    assert_eq!(a, b);

    // A new epoch lays people out differently but at the same density.
    let c = seed_grid(50, 50, 0.5, &mut bank.for_slot(RngSlot::Seeder, 1, 0));
    assert_ne!(a, c);
    let diff = a.occupied_count().abs_diff(c.occupied_count());
    assert!(diff < 150, "occupied counts too far apart: {} vs {}", a.occupied_count(), c.occupied_count());
}

#[test]
fn random_infections_pick_distinct_healthy_cells() {
    let bank = RngBank::new(5);
    let grid = seed_grid(30, 30, 0.6, &mut bank.for_slot(RngSlot::Seeder, 0, 0));
    let (infected, count) =
        seed_random_infections(&grid, 25, &mut bank.for_slot(RngSlot::Infection, 0, 0));

    assert_eq!(count, 25);
    let stats = Statistics::tally(&infected, &SimParams::default(), 0);
    assert_eq!(stats.infected, 25, "infections must land on distinct cells");
    assert_eq!(stats.total, grid.occupied_count());
    assert!(infected.same_occupancy(&grid));

    for (_, _, cell) in infected.occupied().filter(|(_, _, c)| c.is(HealthState::Infected)) {
        assert_eq!(cell.infection_time, 0);
        assert!(cell.variant.is_some());
    }
}

#[test]
fn asking_for_too_many_infects_everyone_eligible() {
    let mut grid = Grid::from_pattern(
        "HHR
         D.H
         HIH",
    )
    .unwrap();
    if let Some(cell) = grid.cell_mut(0, 0) {
        cell.intervention = Some(Intervention::Quarantine);
    }
    let mut rng = RngBank::new(9).for_slot(RngSlot::Infection, 0, 0);
    let (next, count) = seed_random_infections(&grid, 100, &mut rng);

    assert_eq!(count, 5);
    assert_eq!(next.cell(2, 0).unwrap().state, HealthState::Recovered);
    assert_eq!(next.cell(0, 1).unwrap().state, HealthState::Dead);
    assert!(next.cell(1, 1).is_none());
    let stats = Statistics::tally(&next, &SimParams::default(), 0);
    assert_eq!(stats.infected, 6);
    assert!(next.cell(0, 0).unwrap().has(Intervention::Quarantine), "tag survives seeding");
}

#[test]
fn seeding_nothing_or_into_an_empty_grid_is_a_no_op() {
    let mut rng = RngBank::new(3).for_slot(RngSlot::Infection, 0, 0);
    let empty = Grid::empty(4, 4);
    let (next, count) = seed_random_infections(&empty, 10, &mut rng);
    assert_eq!((next, count), (empty, 0));

    let grid = Grid::from_pattern("HHH").unwrap();
    let (next, count) = seed_random_infections(&grid, 0, &mut rng);
    assert_eq!((next, count), (grid, 0));
}

#[test]
fn every_healthy_cell_can_be_chosen() {
    let grid = Grid::from_pattern("HHHH").unwrap();
    let bank = RngBank::new(11);
    let mut hits = [0u32; 4];
    for tick in 0..400 {
        let (next, _) = seed_random_infections(&grid, 1, &mut bank.for_slot(RngSlot::Infection, 0, tick));
        for (x, _, cell) in next.occupied() {
            if cell.is(HealthState::Infected) {
                hits[x] += 1;
            }
        }
    }
    assert!(hits.iter().all(|&h| h > 50), "selection looks biased: {hits:?}");
}
