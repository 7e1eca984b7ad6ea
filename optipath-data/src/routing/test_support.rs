//! Test utilities for distance query clients.
//!
//! This module provides [`StubDistanceQueryClient`], a deterministic test
//! double that replays a canned Distance Matrix payload through the same
//! decoding path as [`HttpDistanceQueryClient`](super::HttpDistanceQueryClient)
//! without making HTTP requests.

use async_trait::async_trait;
use optipath_core::{BatchCells, DistanceBatch, DistanceQuery, DistanceQueryError};

use super::google::DistanceMatrixResponse;

/// Stub `DistanceQuery` for testing.
///
/// # Example
///
/// ```
/// use optipath_core::test_support::locations;
/// use optipath_core::{Cost, DistanceBatch, DistanceQuery};
/// use optipath_data::routing::test_support::StubDistanceQueryClient;
///
/// # tokio_test_block(async {
/// let client = StubDistanceQueryClient::with_payload(
///     r#"{"status": "OK", "rows": [{"elements": [
///         {"status": "OK", "distance": {"value": 0, "text": "1 m"}}
///     ]}]}"#,
/// );
/// let places = locations(1);
/// let batch = DistanceBatch {
///     origins: &places,
///     destinations: &places,
///     origin_offset: 0,
///     destination_offset: 0,
/// };
///
/// let cells = client.query(batch).await.expect("payload decodes");
/// assert_eq!(cells, vec![vec![Cost::Value(0)]]);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(future: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(future)
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StubDistanceQueryClient {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Payload(String),
    Error(DistanceQueryError),
}

impl StubDistanceQueryClient {
    /// Create a client that decodes `payload` for every batch.
    ///
    /// The payload is parsed on each call, so malformed JSON surfaces as
    /// [`DistanceQueryError::ParseError`].
    #[must_use]
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            response: StubResponse::Payload(payload.into()),
        }
    }

    /// Create a client that returns the given error.
    ///
    /// Empty batches still return `DistanceQueryError::EmptyBatch`.
    #[must_use]
    pub fn with_error(error: DistanceQueryError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }
}

#[async_trait]
impl DistanceQuery for StubDistanceQueryClient {
    async fn query(&self, batch: DistanceBatch<'_>) -> Result<BatchCells, DistanceQueryError> {
        if batch.is_empty() {
            return Err(DistanceQueryError::EmptyBatch);
        }

        match &self.response {
            StubResponse::Payload(payload) => {
                let response: DistanceMatrixResponse = serde_json::from_str(payload).map_err(
                    |err| DistanceQueryError::ParseError {
                        message: err.to_string(),
                    },
                )?;
                response.into_cells(&batch)
            }
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
