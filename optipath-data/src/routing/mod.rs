//! HTTP-based distance query clients for routing services.
//!
//! This module provides [`HttpDistanceQueryClient`], an implementation of
//! [`optipath_core::DistanceQuery`] that fetches batch cost grids from the
//! Google Distance Matrix API.
//!
//! # Architecture
//!
//! One call maps to one `GET` request carrying the batch origins and
//! destinations as `|`-separated lists. The client stays asynchronous; the
//! matrix builder decides how many batches run at once.
//!
//! # Example
//!
//! ```no_run
//! use optipath_core::test_support::locations;
//! use optipath_core::MatrixBuilder;
//! use optipath_data::routing::{HttpDistanceQueryClient, HttpDistanceQueryConfig};
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client with custom configuration
//! let config = HttpDistanceQueryConfig::new("my-api-key")
//!     .with_timeout(Duration::from_secs(60))
//!     .with_user_agent("my-app/1.0");
//! let client = HttpDistanceQueryClient::with_config(config)?;
//!
//! let matrix = MatrixBuilder::new(&client).build(&locations(3)).await?;
//! println!("Distance: {:?}", matrix.get(0, 1));
//! # Ok(())
//! # }
//! ```

mod client;
mod google;

#[doc(hidden)]
pub mod test_support;

pub use client::{
    ClientBuildError, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpDistanceQueryClient,
    HttpDistanceQueryConfig,
};
pub use google::{DistanceMatrixResponse, Element, Row, TextValue};
