//! Square cost matrices and the batched builder that fills them.
//!
//! A [`DistanceMatrix`] is always fully populated: the only ways to obtain
//! one are [`DistanceMatrix::from_rows`], which checks squareness, and the
//! [`MatrixBuilder`], which refuses to hand out a matrix until every cell
//! has been written exactly once.

mod assembly;
mod batch;
mod builder;

use thiserror::Error;

use crate::Cost;

pub use assembly::MatrixAssembly;
pub use batch::{BatchPair, batch_pairs, partition_batches};
pub use builder::{
    BuildError, DEFAULT_BATCH_SIZE, DEFAULT_MAX_CONCURRENCY, MatrixBuilder, MatrixBuilderConfig,
};

/// Errors raised while shaping or assembling a [`DistanceMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// A row did not have one cell per location.
    #[error("row {row} has {actual} cells but the matrix is {expected} wide")]
    NotSquare {
        /// Offending row index.
        row: usize,
        /// Required width.
        expected: usize,
        /// Width found.
        actual: usize,
    },
    /// A cell lies outside the matrix.
    #[error("cell ({from}, {to}) is outside a {size}x{size} matrix")]
    OutOfBounds {
        /// Origin index.
        from: usize,
        /// Destination index.
        to: usize,
        /// Matrix dimension.
        size: usize,
    },
    /// A cell was written more than once.
    #[error("cell ({from}, {to}) was written twice")]
    DuplicateWrite {
        /// Origin index.
        from: usize,
        /// Destination index.
        to: usize,
    },
    /// Some cells were never written.
    #[error("{missing} matrix cells were never written")]
    Incomplete {
        /// Number of unwritten cells.
        missing: usize,
    },
}

/// Complete `n×n` table of travel costs.
///
/// `get(i, j)` is the cost from city `i` to city `j`; the matrix may be
/// asymmetric. Cells are stored flat in row-major order.
///
/// # Examples
///
/// ```
/// use optipath_core::{Cost, DistanceMatrix};
///
/// # fn main() -> Result<(), optipath_core::MatrixError> {
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![Cost::Value(0), Cost::Value(5)],
///     vec![Cost::Unreachable, Cost::Value(0)],
/// ])?;
/// assert_eq!(matrix.size(), 2);
/// assert_eq!(matrix.get(0, 1), Some(Cost::Value(5)));
/// assert_eq!(matrix.first_unreachable(), Some((1, 0)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<Cost>,
}

impl DistanceMatrix {
    /// Validates and constructs a matrix from rows.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquare`] when any row length differs from
    /// the number of rows.
    pub fn from_rows(rows: Vec<Vec<Cost>>) -> Result<Self, MatrixError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(MatrixError::NotSquare {
                    row,
                    expected: size,
                    actual: values.len(),
                });
            }
            cells.extend(values);
        }
        Ok(Self { size, cells })
    }

    /// Wrap flat row-major cells already known to be complete.
    pub(crate) const fn from_complete_cells(size: usize, cells: Vec<Cost>) -> Self {
        Self { size, cells }
    }

    /// Number of locations (rows and columns).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Cost from `from` to `to`, or `None` outside the matrix.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> Option<Cost> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.cells.get(from * self.size + to).copied()
    }

    /// Iterate rows in city-index order.
    pub fn rows(&self) -> impl Iterator<Item = &[Cost]> {
        // `chunks` rejects zero; an empty matrix has no cells to split anyway.
        self.cells.chunks(self.size.max(1))
    }

    /// First unreachable cell in row-major order, diagonal included.
    #[must_use]
    pub fn first_unreachable(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|cell| !cell.is_reachable())
            .map(|index| (index / self.size, index % self.size))
    }

    /// Total cost of walking `path` edge by edge.
    ///
    /// Returns `None` when the path leaves the matrix, crosses an
    /// unreachable pair or overflows.
    #[must_use]
    pub fn path_cost(&self, path: &[usize]) -> Option<u64> {
        path.windows(2).try_fold(0_u64, |total, edge| match edge {
            [from, to] => total.checked_add(self.get(*from, *to)?.value()?),
            _ => Some(total),
        })
    }
}
