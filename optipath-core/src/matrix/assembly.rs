//! Write-once staging area for a matrix under construction.

use crate::{BatchCells, Cost};

use super::{DistanceMatrix, MatrixError};

/// Matrix being filled batch by batch.
///
/// Each cell starts empty and may be written once. [`MatrixAssembly::finish`]
/// is the only way out and fails unless every cell was written, so a partial
/// matrix can never reach a solver.
#[derive(Debug, Clone)]
pub struct MatrixAssembly {
    size: usize,
    cells: Vec<Option<Cost>>,
}

impl MatrixAssembly {
    /// Start an empty `size×size` assembly.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Write a single cell.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfBounds`] or [`MatrixError::DuplicateWrite`].
    pub fn write(&mut self, from: usize, to: usize, cost: Cost) -> Result<(), MatrixError> {
        let size = self.size;
        if from >= size || to >= size {
            return Err(MatrixError::OutOfBounds { from, to, size });
        }
        let slot = self
            .cells
            .get_mut(from * size + to)
            .ok_or(MatrixError::OutOfBounds { from, to, size })?;
        if slot.is_some() {
            return Err(MatrixError::DuplicateWrite { from, to });
        }
        *slot = Some(cost);
        Ok(())
    }

    /// Write a batch grid whose top-left cell lands at
    /// `(origin_offset, destination_offset)`.
    ///
    /// # Errors
    ///
    /// Propagates the first [`MatrixAssembly::write`] failure. Cells before
    /// the failing one stay written.
    pub fn write_block(
        &mut self,
        origin_offset: usize,
        destination_offset: usize,
        block: &BatchCells,
    ) -> Result<(), MatrixError> {
        for (row, values) in block.iter().enumerate() {
            for (column, cost) in values.iter().enumerate() {
                self.write(origin_offset + row, destination_offset + column, *cost)?;
            }
        }
        Ok(())
    }

    /// Number of cells still empty.
    #[must_use]
    pub fn missing(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Seal the assembly into a [`DistanceMatrix`].
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::Incomplete`] when any cell was never written.
    pub fn finish(self) -> Result<DistanceMatrix, MatrixError> {
        let missing = self.missing();
        if missing > 0 {
            return Err(MatrixError::Incomplete { missing });
        }
        let cells = self.cells.into_iter().flatten().collect();
        Ok(DistanceMatrix::from_complete_cells(self.size, cells))
    }
}
