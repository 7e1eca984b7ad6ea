//! Query pairwise travel costs from an upstream distance service.
//!
//! The `DistanceQuery` trait abstracts one bounded batch request: callers
//! supply a [`DistanceBatch`] of origins and destinations and receive a
//! [`BatchCells`] grid aligned to the batch.
//!
//! Per-pair failures are values ([`Cost::Unreachable`](crate::Cost)); only
//! failures of the request itself surface as [`DistanceQueryError`].

mod error;
mod query;

pub use error::DistanceQueryError;
pub use query::{BatchCells, DistanceBatch, DistanceQuery, ensure_shape};
