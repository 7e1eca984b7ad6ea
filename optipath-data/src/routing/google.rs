//! Google Distance Matrix API response types.
//!
//! This module provides deserialisation types for the Distance Matrix
//! response format and converts a decoded response into a batch cost grid.
//!
//! See: <https://developers.google.com/maps/documentation/distance-matrix/distance-matrix>

use log::warn;
use optipath_core::{BatchCells, Cost, DistanceBatch, DistanceQueryError};
use serde::Deserialize;

const STATUS_OK: &str = "OK";

/// Distance Matrix API response.
///
/// The response carries one row per origin, each holding one element per
/// destination. The top-level `status` covers the request as a whole.
#[derive(Debug, Deserialize)]
pub struct DistanceMatrixResponse {
    /// Top-level status.
    ///
    /// Common values:
    /// - `"OK"` - Request was successful
    /// - `"INVALID_REQUEST"` - Malformed request
    /// - `"MAX_ELEMENTS_EXCEEDED"` - Batch too large
    /// - `"OVER_QUERY_LIMIT"` - Quota exhausted
    /// - `"REQUEST_DENIED"` - Key missing or rejected
    pub status: String,

    /// Detail supplied alongside a non-`"OK"` status.
    pub error_message: Option<String>,

    /// One row per origin.
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// Results for a single origin.
#[derive(Debug, Deserialize)]
pub struct Row {
    /// One element per destination.
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Result for a single origin/destination pair.
#[derive(Debug, Deserialize)]
pub struct Element {
    /// Element status: `"OK"`, `"NOT_FOUND"` or `"ZERO_RESULTS"`, among others.
    pub status: String,
    /// Route length; present when `status` is `"OK"`.
    pub distance: Option<TextValue>,
}

/// A measured quantity with its display text.
#[derive(Debug, Deserialize)]
pub struct TextValue {
    /// Value in base units (metres for distance).
    pub value: u64,
    /// Localised display text, e.g. `"1.2 km"`.
    #[serde(default)]
    pub text: String,
}

impl DistanceMatrixResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Convert the response into a grid aligned with `batch`.
    ///
    /// Elements without an `"OK"` status, or without a distance, become
    /// [`Cost::Unreachable`] and are logged.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceQueryError::ServiceError`] for a non-`"OK"`
    /// top-level status and [`DistanceQueryError::ShapeMismatch`] when the
    /// grid does not match the batch.
    pub fn into_cells(self, batch: &DistanceBatch<'_>) -> Result<BatchCells, DistanceQueryError> {
        if !self.is_ok() {
            return Err(DistanceQueryError::ServiceError {
                status: self.status,
                message: self.error_message.unwrap_or_default(),
            });
        }

        self.ensure_grid_shape(batch)?;
        let cells = self
            .rows
            .into_iter()
            .zip(batch.origins)
            .map(|(row, origin)| {
                row.elements
                    .into_iter()
                    .zip(batch.destinations)
                    .map(|(element, destination)| element_cost(element, origin, destination))
                    .collect()
            })
            .collect();
        Ok(cells)
    }

    /// Reject grids with missing or surplus rows or elements before they are
    /// paired with the batch locations.
    fn ensure_grid_shape(&self, batch: &DistanceBatch<'_>) -> Result<(), DistanceQueryError> {
        let expected_rows = batch.origins.len();
        let expected_columns = batch.destinations.len();
        let mismatch = |actual_rows, actual_columns| DistanceQueryError::ShapeMismatch {
            expected_rows,
            expected_columns,
            actual_rows,
            actual_columns,
        };

        if self.rows.len() != expected_rows {
            return Err(mismatch(self.rows.len(), expected_columns));
        }
        match self
            .rows
            .iter()
            .find(|row| row.elements.len() != expected_columns)
        {
            Some(row) => Err(mismatch(expected_rows, row.elements.len())),
            None => Ok(()),
        }
    }
}

fn element_cost(
    element: Element,
    origin: &impl std::fmt::Display,
    destination: &impl std::fmt::Display,
) -> Cost {
    match element {
        Element {
            status,
            distance: Some(distance),
        } if status == STATUS_OK => Cost::Value(distance.value),
        Element { status, .. } => {
            warn!("No valid route from {origin} to {destination} ({status})");
            Cost::Unreachable
        }
    }
}
