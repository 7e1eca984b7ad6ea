//! Tests for the `HeldKarpSolver`.

use super::*;
use optipath_core::Cost;
use optipath_core::test_support::{unit_matrix, value_rows};
use rstest::{fixture, rstest};

#[fixture]
fn solver() -> HeldKarpSolver {
    HeldKarpSolver::default()
}

fn matrix(rows: &[&[u64]]) -> DistanceMatrix {
    DistanceMatrix::from_rows(value_rows(rows)).expect("rows should be square")
}

fn solved_tour(solver: &HeldKarpSolver, matrix: &DistanceMatrix) -> Tour {
    match solver.solve(matrix).expect("solve should succeed") {
        TourResult::Feasible(tour) => tour,
        TourResult::Infeasible(reason) => panic!("expected a tour, got {reason:?}"),
    }
}

#[rstest]
fn two_cities_go_out_and_back(solver: HeldKarpSolver) {
    let tour = solved_tour(&solver, &matrix(&[&[0, 5], &[5, 0]]));

    assert_eq!(tour.min_cost, 10);
    assert_eq!(tour.path, vec![0, 1, 0]);
}

#[rstest]
fn asymmetric_cycle_follows_cheap_direction(solver: HeldKarpSolver) {
    let tour = solved_tour(&solver, &matrix(&[&[0, 1, 9], &[9, 0, 1], &[1, 9, 0]]));

    assert_eq!(tour.min_cost, 3);
    assert_eq!(tour.path, vec![0, 1, 2, 0]);
}

#[rstest]
fn four_city_square_picks_perimeter(solver: HeldKarpSolver) {
    // Corners of a unit square, diagonals cost more than sides.
    let tour = solved_tour(
        &solver,
        &matrix(&[
            &[0, 10, 14, 10],
            &[10, 0, 10, 14],
            &[14, 10, 0, 10],
            &[10, 14, 10, 0],
        ]),
    );

    assert_eq!(tour.min_cost, 40);
    assert_eq!(tour.path, vec![0, 1, 2, 3, 0]);
}

#[rstest]
fn equal_costs_take_lowest_indices_first(solver: HeldKarpSolver) {
    let uniform = DistanceMatrix::from_rows(unit_matrix(5)).expect("square");

    let tour = solved_tour(&solver, &uniform);

    assert_eq!(tour.min_cost, 5);
    assert_eq!(tour.path, vec![0, 1, 2, 3, 4, 0]);
}

#[rstest]
#[case(2, 3)]
#[case(3, 2)]
#[case(1, 1)]
fn unreachable_cell_is_infeasible(solver: HeldKarpSolver, #[case] from: usize, #[case] to: usize) {
    let mut rows = unit_matrix(4);
    rows[from][to] = Cost::Unreachable;
    let matrix = DistanceMatrix::from_rows(rows).expect("square");

    let result = solver.solve(&matrix).expect("solve should succeed");

    assert_eq!(
        result,
        TourResult::Infeasible(Infeasibility::Unreachable { from, to })
    );
}

#[rstest]
fn first_unreachable_cell_is_reported(solver: HeldKarpSolver) {
    let mut rows = unit_matrix(3);
    rows[2][0] = Cost::Unreachable;
    rows[0][2] = Cost::Unreachable;
    let matrix = DistanceMatrix::from_rows(rows).expect("square");

    let result = solver.solve(&matrix).expect("solve should succeed");

    assert_eq!(
        result,
        TourResult::Infeasible(Infeasibility::Unreachable { from: 0, to: 2 })
    );
}

#[rstest]
#[case(0)]
#[case(1)]
fn fewer_than_two_cities_are_rejected(solver: HeldKarpSolver, #[case] size: usize) {
    let matrix = DistanceMatrix::from_rows(unit_matrix(size)).expect("square");

    let err = solver.solve(&matrix).expect_err("should fail");

    assert_eq!(err, SolveError::TooFewLocations { count: size });
}

#[rstest]
fn configured_cap_is_enforced() {
    let solver = HeldKarpSolver::with_config(HeldKarpConfig::default().with_max_locations(3));
    let matrix = DistanceMatrix::from_rows(unit_matrix(4)).expect("square");

    let err = solver.solve(&matrix).expect_err("should fail");

    assert_eq!(err, SolveError::TooManyLocations { count: 4, max: 3 });
}

#[rstest]
fn cap_is_clamped_to_supported_limit() {
    let config = HeldKarpConfig::default().with_max_locations(100);
    let solver = HeldKarpSolver::with_config(config);
    let size = MAX_SUPPORTED_LOCATIONS + 1;
    let matrix = DistanceMatrix::from_rows(unit_matrix(size)).expect("square");

    let err = solver.solve(&matrix).expect_err("should fail");

    assert_eq!(config.effective_max_locations(), MAX_SUPPORTED_LOCATIONS);
    assert_eq!(
        err,
        SolveError::TooManyLocations {
            count: size,
            max: MAX_SUPPORTED_LOCATIONS,
        }
    );
}

#[rstest]
fn overflowing_cost_is_an_error(solver: HeldKarpSolver) {
    let overflowing = matrix(&[&[0, u64::MAX], &[1, 0]]);

    let err = solver.solve(&overflowing).expect_err("should fail");

    assert_eq!(err, SolveError::CostOverflow);
}

#[rstest]
fn default_config_uses_default_cap() {
    assert_eq!(
        HeldKarpSolver::default().config().max_locations,
        DEFAULT_MAX_LOCATIONS
    );
}
