//! Criterion benchmarks for the Held-Karp solver.
//!
//! Measures solve time across problem sizes (8, 12, 16 locations) to track
//! the exponential growth of the memo table and detect regressions.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package optipath-solver-exact
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use optipath_core::TourSolver;
use optipath_solver_exact::HeldKarpSolver;

mod bench_support;

use bench_support::{BENCHMARK_SEED, generate_distance_matrix};

/// Problem sizes to benchmark.
const PROBLEM_SIZES: &[usize] = &[8, 12, 16];

/// Benchmark solve times for various problem sizes.
fn bench_solve_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_time");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    let solver = HeldKarpSolver::default();
    for &size in PROBLEM_SIZES {
        // Pre-generate inputs outside the benchmark loop.
        let matrix = generate_distance_matrix(size, BENCHMARK_SEED);

        #[expect(
            clippy::as_conversions,
            reason = "Safe conversion for small problem sizes"
        )]
        let throughput_size = size as u64;
        group.throughput(Throughput::Elements(throughput_size));
        group.bench_with_input(BenchmarkId::new("locations", size), &matrix, |b, input| {
            b.iter(|| {
                #[expect(
                    clippy::let_underscore_must_use,
                    reason = "Benchmarking solve performance, result is intentionally discarded"
                )]
                let _ = solver.solve(input);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_solve_times);
criterion_main!(benches);
