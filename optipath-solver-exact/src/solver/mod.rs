//! `HeldKarpSolver` implementation.
//!
//! Tie-break: candidate successors are scanned in increasing city order and
//! a later candidate replaces the current best only when strictly cheaper,
//! so among equal-cost tours the lexicographically smallest path wins.

use log::{debug, info};
use optipath_core::{
    DEFAULT_MAX_LOCATIONS, DistanceMatrix, Infeasibility, SolveError, Tour, TourResult, TourSolver,
};

use crate::table::HeldKarpTable;

/// Hard ceiling on locations regardless of configuration.
///
/// Beyond this the memo arena no longer fits in memory on typical hosts.
pub const MAX_SUPPORTED_LOCATIONS: usize = 24;

/// Configuration for [`HeldKarpSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldKarpConfig {
    /// Largest matrix accepted; clamped to [`MAX_SUPPORTED_LOCATIONS`].
    pub max_locations: usize,
}

impl Default for HeldKarpConfig {
    fn default() -> Self {
        Self {
            max_locations: DEFAULT_MAX_LOCATIONS,
        }
    }
}

impl HeldKarpConfig {
    /// Set the location cap.
    #[must_use]
    pub const fn with_max_locations(mut self, max_locations: usize) -> Self {
        self.max_locations = max_locations;
        self
    }

    /// Cap actually enforced by the solver.
    #[must_use]
    pub const fn effective_max_locations(&self) -> usize {
        if self.max_locations < MAX_SUPPORTED_LOCATIONS {
            self.max_locations
        } else {
            MAX_SUPPORTED_LOCATIONS
        }
    }
}

/// Exact solver using the Held-Karp dynamic programme.
///
/// # Examples
///
/// ```
/// use optipath_core::{Cost, DistanceMatrix, TourSolver};
/// use optipath_solver_exact::HeldKarpSolver;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![Cost::Value(0), Cost::Value(5)],
///     vec![Cost::Value(5), Cost::Value(0)],
/// ])?;
/// let result = HeldKarpSolver::default().solve(&matrix)?;
/// let tour = result.tour().ok_or("expected a tour")?;
/// assert_eq!(tour.min_cost, 10);
/// assert_eq!(tour.path, vec![0, 1, 0]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeldKarpSolver {
    config: HeldKarpConfig,
}

impl HeldKarpSolver {
    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: HeldKarpConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &HeldKarpConfig {
        &self.config
    }

    fn check_size(&self, count: usize) -> Result<(), SolveError> {
        if count < 2 {
            return Err(SolveError::TooFewLocations { count });
        }
        let max = self.config.effective_max_locations();
        if count > max {
            return Err(SolveError::TooManyLocations { count, max });
        }
        Ok(())
    }
}

impl TourSolver for HeldKarpSolver {
    fn solve(&self, matrix: &DistanceMatrix) -> Result<TourResult, SolveError> {
        let count = matrix.size();
        self.check_size(count)?;

        let weights = match finite_weights(matrix) {
            Ok(weights) => weights,
            Err((from, to)) => {
                info!("no tour over {count} locations: no route from {from} to {to}");
                return Ok(TourResult::Infeasible(Infeasibility::Unreachable { from, to }));
            }
        };

        let tour = HeldKarp::new(count, &weights).run()?;
        info!(
            "solved tour over {count} locations with cost {}",
            tour.min_cost
        );
        Ok(TourResult::Feasible(tour))
    }
}

/// Row-major finite costs, or the first unreachable pair.
///
/// The whole matrix is scanned, diagonal included, before any cost is used.
fn finite_weights(matrix: &DistanceMatrix) -> Result<Vec<u64>, (usize, usize)> {
    let mut weights = Vec::with_capacity(matrix.size() * matrix.size());
    for (from, row) in matrix.rows().enumerate() {
        for (to, cost) in row.iter().enumerate() {
            weights.push(cost.value().ok_or((from, to))?);
        }
    }
    Ok(weights)
}

/// One solve: the weights and the arena that memoises them.
struct HeldKarp<'a> {
    count: usize,
    weights: &'a [u64],
    table: HeldKarpTable,
}

impl<'a> HeldKarp<'a> {
    fn new(count: usize, weights: &'a [u64]) -> Self {
        let table = HeldKarpTable::new(count);
        debug!("allocated Held-Karp table with {} states", table.len());
        Self {
            count,
            weights,
            table,
        }
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "from and to are city indices below count"
    )]
    fn weight(&self, from: usize, to: usize) -> u64 {
        self.weights[from * self.count + to]
    }

    fn run(mut self) -> Result<Tour, SolveError> {
        self.fill()?;
        Ok(self.reconstruct())
    }

    /// Fill every reachable state bottom-up.
    ///
    /// Masks are visited in descending order, so each superset a state
    /// depends on is already stored.
    fn fill(&mut self) -> Result<(), SolveError> {
        let full = (1_usize << self.count) - 1;
        for city in 1..self.count {
            self.table.set(city, full, self.weight(city, 0), 0);
        }

        let half = full >> 1;
        for visited in (0..half).rev().map(|bits| (bits << 1) | 1) {
            for city in 0..self.count {
                let current = 1_usize << city;
                // City 0 is only current at the start of the tour.
                if visited & current == 0 || (city == 0 && visited != 1) {
                    continue;
                }
                if let Some((cost, next)) = self.best_step(city, visited)? {
                    self.table.set(city, visited, cost, next);
                }
            }
        }
        Ok(())
    }

    /// Cheapest unvisited successor of `city`, first minimum on ties.
    fn best_step(&self, city: usize, visited: usize) -> Result<Option<(u64, u8)>, SolveError> {
        let mut best: Option<(u64, u8)> = None;
        for (next, tag) in (0..self.count).zip(0_u8..) {
            let bit = 1_usize << next;
            if visited & bit != 0 {
                continue;
            }
            let cost = self
                .weight(city, next)
                .checked_add(self.table.cost(next, visited | bit))
                .ok_or(SolveError::CostOverflow)?;
            if best.is_none_or(|(lowest, _)| cost < lowest) {
                best = Some((cost, tag));
            }
        }
        Ok(best)
    }

    /// Walk stored successors from the start state.
    fn reconstruct(&self) -> Tour {
        let mut path = Vec::with_capacity(self.count + 1);
        path.push(0);
        let mut city = 0;
        let mut visited = 1_usize;
        for _ in 1..self.count {
            city = self.table.next(city, visited);
            visited |= 1_usize << city;
            path.push(city);
        }
        path.push(0);
        Tour {
            min_cost: self.table.cost(0, 1),
            path,
        }
    }
}

#[cfg(test)]
mod tests;
