//! Facade crate for the OptiPath tour engine.
//!
//! This crate re-exports the core domain types and exposes the exact solver
//! and the HTTP distance client behind feature flags.

#![forbid(unsafe_code)]

pub use optipath_core::{
    BuildError, Cost, DistanceBatch, DistanceMatrix, DistanceQuery, DistanceQueryError,
    Infeasibility, Location, MatrixBuilder, MatrixBuilderConfig, SolveError, SolveRequest,
    SolveRequestError, Tour, TourResult, TourSolver,
};

#[cfg(feature = "serde")]
pub use optipath_core::{MinCost, SolveResponse};

#[cfg(feature = "solver-exact")]
pub use optipath_solver_exact::{HeldKarpConfig, HeldKarpSolver};

#[cfg(feature = "http")]
pub use optipath_data::routing::{HttpDistanceQueryClient, HttpDistanceQueryConfig};
