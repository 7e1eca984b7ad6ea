//! Caller-supplied solve requests and their validation.

use thiserror::Error;

use crate::Location;

/// Default cap on locations per request; Held-Karp is exponential in it.
pub const DEFAULT_MAX_LOCATIONS: usize = 20;

/// Locations to tour, in the order that fixes their city indices.
///
/// Blank entries are tolerated on the wire and dropped by
/// [`SolveRequest::into_locations`].
///
/// # Examples
///
/// ```
/// use optipath_core::{DEFAULT_MAX_LOCATIONS, SolveRequest};
///
/// # fn main() -> Result<(), optipath_core::SolveRequestError> {
/// let request = SolveRequest::new(["Paris", " ", "Lyon"]);
/// let locations = request.into_locations(DEFAULT_MAX_LOCATIONS)?;
/// assert_eq!(locations.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveRequest {
    /// Raw location text, possibly containing blanks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub locations: Vec<String>,
}

/// Validation failures for [`SolveRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveRequestError {
    /// The request listed no locations at all.
    #[error("no locations provided or locations array is empty")]
    NoLocations,
    /// Fewer than two non-blank locations remained.
    #[error("at least two valid locations are required, got {count}")]
    TooFewLocations {
        /// Non-blank locations found.
        count: usize,
    },
    /// More locations than the configured cap.
    #[error("{count} locations exceed the maximum of {max}")]
    TooManyLocations {
        /// Non-blank locations found.
        count: usize,
        /// Configured cap.
        max: usize,
    },
}

impl SolveRequest {
    /// Construct a request from any sequence of location strings.
    pub fn new<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locations: locations.into_iter().map(Into::into).collect(),
        }
    }

    /// Drop blank entries and check the remaining count.
    ///
    /// # Errors
    ///
    /// Returns [`SolveRequestError::NoLocations`] for an empty list,
    /// [`SolveRequestError::TooFewLocations`] when fewer than two non-blank
    /// entries remain and [`SolveRequestError::TooManyLocations`] above
    /// `max_locations`.
    pub fn into_locations(self, max_locations: usize) -> Result<Vec<Location>, SolveRequestError> {
        if self.locations.is_empty() {
            return Err(SolveRequestError::NoLocations);
        }
        let locations: Vec<Location> = self
            .locations
            .into_iter()
            .filter_map(|text| Location::new(text).ok())
            .collect();
        let count = locations.len();
        if count < 2 {
            return Err(SolveRequestError::TooFewLocations { count });
        }
        if count > max_locations {
            return Err(SolveRequestError::TooManyLocations {
                count,
                max: max_locations,
            });
        }
        Ok(locations)
    }
}
