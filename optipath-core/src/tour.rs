//! Solved tours and the infeasible outcome.

/// Message reported when the tour cannot be driven.
pub const INFEASIBLE_MESSAGE: &str =
    "Some locations are too far apart and cannot be travelled with land transport.";

/// A closed minimum-cost tour.
///
/// `path` starts and ends at city 0 and lists every other city exactly once
/// in between, so its length is `n + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    /// Sum of the costs along `path`.
    pub min_cost: u64,
    /// Visiting order, closing back to the start.
    pub path: Vec<usize>,
}

/// Why no tour exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infeasibility {
    /// The upstream service found no route between a pair.
    Unreachable {
        /// Origin city index.
        from: usize,
        /// Destination city index.
        to: usize,
    },
}

impl Infeasibility {
    /// Human-readable explanation for callers.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => INFEASIBLE_MESSAGE,
        }
    }
}

/// Outcome of a solve. Infeasibility is a result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourResult {
    /// A tour was found.
    Feasible(Tour),
    /// No tour exists.
    Infeasible(Infeasibility),
}

impl TourResult {
    /// Borrow the tour when one was found.
    #[must_use]
    pub const fn tour(&self) -> Option<&Tour> {
        match self {
            Self::Feasible(tour) => Some(tour),
            Self::Infeasible(_) => None,
        }
    }

    /// Whether a tour was found.
    #[must_use]
    pub const fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible(_))
    }
}
