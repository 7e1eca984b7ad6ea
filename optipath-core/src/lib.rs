//! Core domain types for the OptiPath tour engine.
//!
//! The crate models the path from a list of named locations to an exact
//! closed tour:
//!
//! - [`Location`] and [`SolveRequest`] capture and validate caller input.
//! - [`DistanceQuery`] abstracts the batched upstream distance service, and
//!   [`MatrixBuilder`] drives it to assemble a complete [`DistanceMatrix`].
//! - [`TourSolver`] turns a matrix into a [`TourResult`], which maps onto the
//!   wire-level [`SolveResponse`].
//!
//! Constructors return `Result` to surface invalid input early. Unreachable
//! pairs are carried as [`Cost::Unreachable`] rather than an in-band number.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod cost;
pub mod distance;
mod location;
pub mod matrix;
mod request;
#[cfg(feature = "serde")]
mod response;
mod solver;
mod tour;

#[doc(hidden)]
pub mod test_support;

pub use cost::Cost;
pub use distance::{BatchCells, DistanceBatch, DistanceQuery, DistanceQueryError};
pub use location::{Location, LocationError};
pub use matrix::{
    BuildError, DEFAULT_BATCH_SIZE, DEFAULT_MAX_CONCURRENCY, DistanceMatrix, MatrixBuilder,
    MatrixBuilderConfig, MatrixError,
};
pub use request::{DEFAULT_MAX_LOCATIONS, SolveRequest, SolveRequestError};
#[cfg(feature = "serde")]
pub use response::{MinCost, SolveResponse};
pub use solver::{SolveError, TourSolver};
pub use tour::{INFEASIBLE_MESSAGE, Infeasibility, Tour, TourResult};
