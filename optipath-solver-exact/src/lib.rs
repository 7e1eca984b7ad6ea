//! Exact tour solver for OptiPath.
//!
//! This crate provides [`HeldKarpSolver`], an implementation of the
//! [`TourSolver`](optipath_core::TourSolver) trait that finds the
//! minimum-cost closed tour with the Held-Karp dynamic programme. Running
//! time is `O(n²·2ⁿ)` and the memo arena holds `n·2ⁿ⁻¹` states, so the
//! solver caps the number of locations it accepts.
//!
//! The solver is synchronous and stateless between calls: each solve
//! allocates its own table and drops it before returning.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod solver;
mod table;

pub use solver::{HeldKarpConfig, HeldKarpSolver, MAX_SUPPORTED_LOCATIONS};
