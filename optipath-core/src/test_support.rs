//! Test-only helpers and an in-memory `DistanceQuery` used by unit and
//! behaviour tests across the workspace.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::{BatchCells, Cost, DistanceBatch, DistanceQuery, DistanceQueryError, Location};

/// Build `count` distinct locations named `"Location 0"`, `"Location 1"`, ...
///
/// # Panics
///
/// Never in practice; the generated names are not blank.
#[must_use]
pub fn locations(count: usize) -> Vec<Location> {
    (0..count)
        .map(|i| Location::new(format!("Location {i}")).expect("generated names are not blank"))
        .collect()
}

/// Square cost grid with zero on the diagonal and one elsewhere.
#[must_use]
pub fn unit_matrix(size: usize) -> Vec<Vec<Cost>> {
    (0..size)
        .map(|i| {
            (0..size)
                .map(|j| if i == j { Cost::Value(0) } else { Cost::Value(1) })
                .collect()
        })
        .collect()
}

/// Convert rows of plain numbers into finite costs.
#[must_use]
pub fn value_rows(rows: &[&[u64]]) -> Vec<Vec<Cost>> {
    rows.iter()
        .map(|row| row.iter().copied().map(Cost::Value).collect())
        .collect()
}

/// Origin/destination window requested from a [`StubDistanceQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRecord {
    /// Global index of the first origin.
    pub origin_offset: usize,
    /// Number of origins.
    pub origins: usize,
    /// Global index of the first destination.
    pub destination_offset: usize,
    /// Number of destinations.
    pub destinations: usize,
}

/// Deterministic `DistanceQuery` answering from a full in-memory matrix.
///
/// Each call slices the window described by the batch offsets out of the
/// configured matrix, counts the call and records the window so tests can
/// check coverage.
#[derive(Debug, Default)]
pub struct StubDistanceQuery {
    matrix: Vec<Vec<Cost>>,
    failure: Option<(usize, usize, DistanceQueryError)>,
    calls: AtomicUsize,
    batches: Mutex<Vec<BatchRecord>>,
}

impl StubDistanceQuery {
    /// Answer every batch from `matrix`.
    #[must_use]
    pub fn with_matrix(matrix: Vec<Vec<Cost>>) -> Self {
        Self {
            matrix,
            ..Self::default()
        }
    }

    /// Answer from [`unit_matrix`] of the given size.
    #[must_use]
    pub fn with_unit_matrix(size: usize) -> Self {
        Self::with_matrix(unit_matrix(size))
    }

    /// Fail the batch whose first origin and first destination sit at the
    /// given global offsets.
    #[must_use]
    pub fn failing_at(
        mut self,
        origin_offset: usize,
        destination_offset: usize,
        error: DistanceQueryError,
    ) -> Self {
        self.failure = Some((origin_offset, destination_offset, error));
        self
    }

    /// Number of `query` calls made so far, including failed ones.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Windows requested so far, in completion order.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the record lock panicked.
    #[must_use]
    pub fn batches(&self) -> Vec<BatchRecord> {
        self.batches.lock().expect("batch record lock poisoned").clone()
    }

    fn window(&self, batch: &DistanceBatch<'_>) -> BatchCells {
        self.matrix
            .iter()
            .skip(batch.origin_offset)
            .take(batch.origins.len())
            .map(|row| {
                row.iter()
                    .skip(batch.destination_offset)
                    .take(batch.destinations.len())
                    .copied()
                    .collect()
            })
            .collect()
    }
}

#[async_trait]
impl DistanceQuery for StubDistanceQuery {
    async fn query(&self, batch: DistanceBatch<'_>) -> Result<BatchCells, DistanceQueryError> {
        if batch.is_empty() {
            return Err(DistanceQueryError::EmptyBatch);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batches
            .lock()
            .expect("batch record lock poisoned")
            .push(BatchRecord {
                origin_offset: batch.origin_offset,
                origins: batch.origins.len(),
                destination_offset: batch.destination_offset,
                destinations: batch.destinations.len(),
            });

        match &self.failure {
            Some((origin, destination, error))
                if *origin == batch.origin_offset && *destination == batch.destination_offset =>
            {
                Err(error.clone())
            }
            _ => Ok(self.window(&batch)),
        }
    }
}
