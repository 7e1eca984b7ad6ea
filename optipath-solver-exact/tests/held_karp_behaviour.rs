//! Behavioural tests for [`HeldKarpSolver`].

use optipath_core::test_support::{unit_matrix, value_rows};
use optipath_core::{
    Cost, DistanceMatrix, Infeasibility, SolveError, TourResult, TourSolver,
};
use optipath_solver_exact::HeldKarpSolver;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

/// Matrix under test.
type MatrixCell = RefCell<Option<DistanceMatrix>>;

/// Result cell holding the outcome of a solve.
type ResultCell = RefCell<Option<Result<TourResult, SolveError>>>;

#[fixture]
fn matrix() -> MatrixCell {
    RefCell::new(None)
}

#[fixture]
fn result() -> ResultCell {
    RefCell::new(None)
}

fn store(cell: &MatrixCell, rows: Vec<Vec<Cost>>) {
    *cell.borrow_mut() = Some(DistanceMatrix::from_rows(rows).expect("rows should be square"));
}

fn solved(result: &ResultCell) -> TourResult {
    let borrowed = result.borrow();
    match borrowed.as_ref() {
        Some(Ok(outcome)) => outcome.clone(),
        other => panic!("expected a solve result, got {other:?}"),
    }
}

// --- Given steps ---

#[given("a symmetric two-location matrix costing 5 each way")]
fn two_locations(#[from(matrix)] matrix: &MatrixCell) {
    store(matrix, value_rows(&[&[0, 5], &[5, 0]]));
}

#[given("a four-location matrix with no route from the third to the fourth location")]
fn four_locations_with_gap(#[from(matrix)] matrix: &MatrixCell) {
    let mut rows = unit_matrix(4);
    rows[2][3] = Cost::Unreachable;
    store(matrix, rows);
}

#[given("a three-location matrix that is cheap only clockwise")]
fn asymmetric_cycle(#[from(matrix)] matrix: &MatrixCell) {
    store(matrix, value_rows(&[&[0, 1, 9], &[9, 0, 1], &[1, 9, 0]]));
}

#[given("a one-location matrix")]
fn one_location(#[from(matrix)] matrix: &MatrixCell) {
    store(matrix, value_rows(&[&[0]]));
}

// --- When steps ---

#[when("I solve the tour")]
fn solve_tour(#[from(matrix)] matrix: &MatrixCell, #[from(result)] result: &ResultCell) {
    let guard = matrix.borrow();
    let input = guard.as_ref().expect("matrix must be initialised");
    *result.borrow_mut() = Some(HeldKarpSolver::default().solve(input));
}

// --- Then steps ---

#[then("the tour costs 10")]
fn then_costs_ten(#[from(result)] result: &ResultCell) {
    assert_eq!(solved(result).tour().map(|tour| tour.min_cost), Some(10));
}

#[then("the tour costs 3")]
fn then_costs_three(#[from(result)] result: &ResultCell) {
    assert_eq!(solved(result).tour().map(|tour| tour.min_cost), Some(3));
}

#[then("the path is 0, 1, 0")]
fn then_out_and_back(#[from(result)] result: &ResultCell) {
    let outcome = solved(result);
    assert_eq!(outcome.tour().map(|tour| tour.path.as_slice()), Some(&[0, 1, 0][..]));
}

#[then("the path is 0, 1, 2, 0")]
fn then_clockwise(#[from(result)] result: &ResultCell) {
    let outcome = solved(result);
    assert_eq!(
        outcome.tour().map(|tour| tour.path.as_slice()),
        Some(&[0, 1, 2, 0][..])
    );
}

#[then("the tour is infeasible because of the pair 2 to 3")]
fn then_infeasible(#[from(result)] result: &ResultCell) {
    assert_eq!(
        solved(result),
        TourResult::Infeasible(Infeasibility::Unreachable { from: 2, to: 3 })
    );
}

#[then("a too few locations error is returned")]
fn then_too_few(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    assert!(
        matches!(
            &*borrowed,
            Some(Err(SolveError::TooFewLocations { count: 1 }))
        ),
        "expected TooFewLocations, got {borrowed:?}"
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/held_karp.feature", name = $title)]
        fn $fn_name(matrix: MatrixCell, result: ResultCell) {
            let _ = (matrix, result);
        }
    };
}

register_scenario!(touring_two_locations, "touring two locations");
register_scenario!(reporting_unreachable_pair, "reporting an unreachable pair");
register_scenario!(
    following_cheap_direction,
    "following the cheap direction of an asymmetric cycle"
);
register_scenario!(rejecting_single_location, "rejecting a single location");
