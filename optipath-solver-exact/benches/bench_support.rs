//! Benchmark support utilities for the Held-Karp solver.
//!
//! Provides deterministic asymmetric cost matrices for reproducible runs.

use optipath_core::{Cost, DistanceMatrix};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Upper bound for generated costs, roughly a long day's drive in metres.
const MAX_COST: u64 = 500_000;

/// Generate a random asymmetric matrix with a zero diagonal.
pub fn generate_distance_matrix(size: usize, seed: u64) -> DistanceMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let rows = (0..size)
        .map(|from| {
            (0..size)
                .map(|to| {
                    if from == to {
                        Cost::Value(0)
                    } else {
                        Cost::Value(rng.gen_range(1..=MAX_COST))
                    }
                })
                .collect()
        })
        .collect();
    #[expect(
        clippy::expect_used,
        reason = "generated rows are square by construction"
    )]
    let matrix = DistanceMatrix::from_rows(rows).expect("generated rows are square");
    matrix
}
