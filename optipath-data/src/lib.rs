//! Data access adapters for the OptiPath engine.
//!
//! Responsibilities:
//! - Provide HTTP adapters for the core [`DistanceQuery`](optipath_core::DistanceQuery)
//!   contract.
//! - Encapsulate upstream wire formats.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `optipath-core`).
//! - Keep blocking I/O off async executors; prefer async-capable clients.
//!
//! Invariants:
//! - Thread-safe by default where feasible.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod routing;
