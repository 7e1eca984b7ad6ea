//! Drive a [`DistanceQuery`] over every batch pair and assemble the result.
//!
//! Batches are independent: each answers a disjoint rectangle of the
//! matrix. They are issued with bounded concurrency and written by the
//! single task driving the stream, so the matrix needs no locking. The
//! builder returns only once every batch has resolved and every cell is
//! accounted for.
//!
//! Dropping the future returned by [`MatrixBuilder::build`] cancels all
//! in-flight requests. The first failing batch does the same and no matrix
//! is produced.

use std::num::NonZeroUsize;

use futures_util::stream::{self, StreamExt};
use log::debug;
use thiserror::Error;

use crate::distance::ensure_shape;
use crate::{BatchCells, DistanceBatch, DistanceQuery, DistanceQueryError, Location};

use super::{BatchPair, DistanceMatrix, MatrixAssembly, MatrixError, batch_pairs};

/// Largest batch the upstream distance service accepts per side.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default number of batch requests allowed in flight at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Configuration for [`MatrixBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixBuilderConfig {
    /// Maximum origins (and destinations) per upstream request.
    pub batch_size: usize,
    /// Maximum concurrent upstream requests.
    pub max_concurrency: usize,
}

impl Default for MatrixBuilderConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl MatrixBuilderConfig {
    /// Set the batch size.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the concurrency bound.
    #[must_use]
    pub const fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}

/// Errors from [`MatrixBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A configuration value was zero.
    #[error("{field} must be greater than zero")]
    InvalidConfig {
        /// Name of the offending setting.
        field: &'static str,
    },
    /// Fewer than two locations were supplied.
    #[error("at least two locations are required, got {count}")]
    TooFewLocations {
        /// Number of locations supplied.
        count: usize,
    },
    /// A batch request failed; the build was abandoned.
    #[error("distance query for batch ({origin_batch}, {destination_batch}) failed: {source}")]
    Query {
        /// Position of the origin batch.
        origin_batch: usize,
        /// Position of the destination batch.
        destination_batch: usize,
        /// Underlying client failure.
        #[source]
        source: DistanceQueryError,
    },
    /// Batch results did not tile the matrix.
    #[error("failed to assemble distance matrix: {0}")]
    Assembly(#[from] MatrixError),
}

/// A batch answer tagged with where it belongs.
struct Block {
    origin_offset: usize,
    destination_offset: usize,
    cells: BatchCells,
}

/// Builds complete [`DistanceMatrix`] values from a [`DistanceQuery`].
///
/// # Examples
///
/// ```
/// use optipath_core::test_support::{StubDistanceQuery, locations};
/// use optipath_core::{MatrixBuilder, MatrixBuilderConfig};
///
/// # async fn demo() -> Result<(), optipath_core::BuildError> {
/// let query = StubDistanceQuery::with_unit_matrix(12);
/// let builder = MatrixBuilder::with_config(&query, MatrixBuilderConfig::default());
/// let matrix = builder.build(&locations(12)).await?;
/// assert_eq!(matrix.size(), 12);
/// assert_eq!(query.calls(), 4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MatrixBuilder<'q, Q: ?Sized> {
    query: &'q Q,
    config: MatrixBuilderConfig,
}

impl<'q, Q> MatrixBuilder<'q, Q>
where
    Q: DistanceQuery + ?Sized,
{
    /// Construct a builder using default configuration.
    pub fn new(query: &'q Q) -> Self {
        Self::with_config(query, MatrixBuilderConfig::default())
    }

    /// Construct a builder with explicit configuration.
    pub const fn with_config(query: &'q Q, config: MatrixBuilderConfig) -> Self {
        Self { query, config }
    }

    /// Query every batch pair for `locations` and assemble the matrix.
    ///
    /// Issues exactly `ceil(n / batch_size)^2` requests. Unreachable pairs
    /// are kept as [`Cost::Unreachable`](crate::Cost) cells.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidConfig`] for zero settings,
    /// [`BuildError::TooFewLocations`] for fewer than two locations,
    /// [`BuildError::Query`] when any request fails and
    /// [`BuildError::Assembly`] when answers do not tile the matrix.
    pub async fn build(&self, locations: &[Location]) -> Result<DistanceMatrix, BuildError> {
        let batch_size = NonZeroUsize::new(self.config.batch_size)
            .ok_or(BuildError::InvalidConfig { field: "batch_size" })?;
        let max_concurrency = NonZeroUsize::new(self.config.max_concurrency)
            .ok_or(BuildError::InvalidConfig {
                field: "max_concurrency",
            })?;
        let size = locations.len();
        if size < 2 {
            return Err(BuildError::TooFewLocations { count: size });
        }

        let pairs = batch_pairs(size, batch_size);
        debug!(
            "building {size}x{size} distance matrix with {} batch requests",
            pairs.len()
        );

        let mut assembly = MatrixAssembly::new(size);
        let mut blocks = stream::iter(pairs)
            .map(|pair| self.fetch_block(locations, pair))
            .buffer_unordered(max_concurrency.get());
        while let Some(block) = blocks.next().await {
            let block = block?;
            assembly.write_block(block.origin_offset, block.destination_offset, &block.cells)?;
        }

        let matrix = assembly.finish()?;
        debug!("distance matrix for {size} locations complete");
        Ok(matrix)
    }

    async fn fetch_block(
        &self,
        locations: &[Location],
        pair: BatchPair,
    ) -> Result<Block, BuildError> {
        let outside = || MatrixError::OutOfBounds {
            from: pair.origins.end,
            to: pair.destinations.end,
            size: locations.len(),
        };
        let batch = DistanceBatch {
            origins: locations.get(pair.origins.clone()).ok_or_else(outside)?,
            destinations: locations.get(pair.destinations.clone()).ok_or_else(outside)?,
            origin_offset: pair.origins.start,
            destination_offset: pair.destinations.start,
        };
        let query_error = |source| BuildError::Query {
            origin_batch: pair.origin_batch,
            destination_batch: pair.destination_batch,
            source,
        };

        debug!(
            "querying batch ({}, {}): {} origins x {} destinations",
            pair.origin_batch,
            pair.destination_batch,
            batch.origins.len(),
            batch.destinations.len()
        );
        let cells = self.query.query(batch).await.map_err(query_error)?;
        ensure_shape(&batch, &cells).map_err(query_error)?;

        Ok(Block {
            origin_offset: batch.origin_offset,
            destination_offset: batch.destination_offset,
            cells,
        })
    }
}
