//! Batched distance-query trait and the grid it returns.

use async_trait::async_trait;

use crate::{Cost, Location};

use super::error::DistanceQueryError;

/// Costs for one batch, indexed `[origin][destination]` within the batch.
pub type BatchCells = Vec<Vec<Cost>>;

/// One bounded request: a contiguous run of origins against a contiguous run
/// of destinations.
///
/// The offsets give the global city index of the first origin and the first
/// destination, so implementations can log or look up cells without
/// re-deriving the partition.
#[derive(Debug, Clone, Copy)]
pub struct DistanceBatch<'a> {
    /// Origins in city-index order.
    pub origins: &'a [Location],
    /// Destinations in city-index order.
    pub destinations: &'a [Location],
    /// Global index of `origins[0]`.
    pub origin_offset: usize,
    /// Global index of `destinations[0]`.
    pub destination_offset: usize,
}

impl DistanceBatch<'_> {
    /// Whether the batch lacks origins or destinations.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.origins.is_empty() || self.destinations.is_empty()
    }

    /// Number of cells the batch covers.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.origins.len() * self.destinations.len()
    }
}

/// Fetch travel costs for a batch of origin/destination pairs.
///
/// Implementers issue exactly one upstream request per call and must return
/// a grid of `origins.len()` rows, each `destinations.len()` wide. Pairs
/// without a route are reported as [`Cost::Unreachable`]; only failures of
/// the request as a whole are errors.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use optipath_core::{BatchCells, Cost, DistanceBatch, DistanceQuery, DistanceQueryError};
///
/// struct UnitQuery;
///
/// #[async_trait]
/// impl DistanceQuery for UnitQuery {
///     async fn query(&self, batch: DistanceBatch<'_>) -> Result<BatchCells, DistanceQueryError> {
///         if batch.is_empty() {
///             return Err(DistanceQueryError::EmptyBatch);
///         }
///         Ok(vec![vec![Cost::Value(1); batch.destinations.len()]; batch.origins.len()])
///     }
/// }
/// ```
#[async_trait]
pub trait DistanceQuery: Send + Sync {
    /// Return the cost grid for `batch`.
    ///
    /// Implementations must return `Err(DistanceQueryError::EmptyBatch)` when
    /// the batch has no origins or no destinations.
    async fn query(&self, batch: DistanceBatch<'_>) -> Result<BatchCells, DistanceQueryError>;
}

/// Check that `cells` has one row per origin and one column per destination.
///
/// # Errors
///
/// Returns [`DistanceQueryError::ShapeMismatch`] describing the first
/// deviation found.
pub fn ensure_shape(
    batch: &DistanceBatch<'_>,
    cells: &BatchCells,
) -> Result<(), DistanceQueryError> {
    let expected_rows = batch.origins.len();
    let expected_columns = batch.destinations.len();
    let mismatch = |actual_rows, actual_columns| DistanceQueryError::ShapeMismatch {
        expected_rows,
        expected_columns,
        actual_rows,
        actual_columns,
    };

    if cells.len() != expected_rows {
        return Err(mismatch(cells.len(), expected_columns));
    }
    match cells.iter().find(|row| row.len() != expected_columns) {
        Some(row) => Err(mismatch(expected_rows, row.len())),
        None => Ok(()),
    }
}
