use thiserror::Error;

/// Errors from [`crate::distance::DistanceQuery::query`].
///
/// Every variant is fatal for the matrix build that issued the request. No
/// variant is retried inside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceQueryError {
    /// The batch contained no origins or no destinations.
    #[error("a distance batch needs at least one origin and one destination")]
    EmptyBatch,
    /// The request could not reach the service.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Request URL with credentials redacted.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The request exceeded its deadline.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL with credentials redacted.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("request to {url} failed with status {status}: {message}")]
    HttpError {
        /// Request URL with credentials redacted.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The service reported a non-"OK" top-level status.
    #[error("distance service returned {status}: {message}")]
    ServiceError {
        /// Top-level status string, e.g. `"REQUEST_DENIED"`.
        status: String,
        /// Human-readable detail supplied by the service, if any.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse distance response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
    /// The response grid does not line up with the batch.
    #[error(
        "distance response is {actual_rows}x{actual_columns} but the batch is \
         {expected_rows}x{expected_columns}"
    )]
    ShapeMismatch {
        /// Number of origins in the batch.
        expected_rows: usize,
        /// Number of destinations in the batch.
        expected_columns: usize,
        /// Rows in the response.
        actual_rows: usize,
        /// Width of the first offending row, or the expected width when the
        /// row count alone is wrong.
        actual_columns: usize,
    },
}
