use thiserror::Error;

use crate::{DistanceMatrix, TourResult};

/// Errors returned by [`TourSolver::solve`].
///
/// An unreachable pair is not an error; it yields
/// [`TourResult::Infeasible`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The matrix describes fewer than two cities.
    #[error("at least two locations are required, got {count}")]
    TooFewLocations {
        /// Matrix dimension.
        count: usize,
    },
    /// The matrix exceeds the solver's size cap.
    #[error("{count} locations exceed the maximum of {max}")]
    TooManyLocations {
        /// Matrix dimension.
        count: usize,
        /// Configured cap.
        max: usize,
    },
    /// An accumulated tour cost does not fit in `u64`.
    #[error("tour cost overflowed")]
    CostOverflow,
}

/// Find the minimum-cost closed tour over a complete matrix.
///
/// Tours start and end at city 0. Implementations must check for
/// unreachable cells before comparing any costs and report them as
/// [`TourResult::Infeasible`].
/// Solvers must be `Send + Sync` to operate safely across threads and must
/// not keep state between calls.
pub trait TourSolver: Send + Sync {
    /// Solve `matrix`, producing a tour result or an error.
    fn solve(&self, matrix: &DistanceMatrix) -> Result<TourResult, SolveError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::value_rows;
    use crate::{Infeasibility, Tour};

    /// Visits cities in index order; enough to exercise the contract.
    struct IndexOrderSolver;

    impl TourSolver for IndexOrderSolver {
        fn solve(&self, matrix: &DistanceMatrix) -> Result<TourResult, SolveError> {
            if matrix.size() < 2 {
                return Err(SolveError::TooFewLocations {
                    count: matrix.size(),
                });
            }
            if let Some((from, to)) = matrix.first_unreachable() {
                return Ok(TourResult::Infeasible(Infeasibility::Unreachable { from, to }));
            }
            let path: Vec<usize> = (0..matrix.size()).chain(std::iter::once(0)).collect();
            let min_cost = matrix.path_cost(&path).ok_or(SolveError::CostOverflow)?;
            Ok(TourResult::Feasible(Tour { min_cost, path }))
        }
    }

    #[rstest]
    fn returns_tour_for_reachable_matrix() {
        let matrix = DistanceMatrix::from_rows(value_rows(&[&[0, 5], &[5, 0]])).expect("square");

        let result = IndexOrderSolver.solve(&matrix).expect("valid matrix");

        assert_eq!(
            result.tour(),
            Some(&Tour {
                min_cost: 10,
                path: vec![0, 1, 0],
            })
        );
    }

    #[rstest]
    fn returns_error_for_single_city() {
        let matrix = DistanceMatrix::from_rows(value_rows(&[&[0]])).expect("square");

        let err = IndexOrderSolver.solve(&matrix).expect_err("one city");

        assert_eq!(err, SolveError::TooFewLocations { count: 1 });
    }
}
