//! Opaque location identifiers.
//!
//! A location is free-form address or place text understood by the upstream
//! distance service. Its position in the request decides its city index.

use std::fmt;

use thiserror::Error;

/// A single stop in a tour request.
///
/// The text is stored verbatim; duplicates are legal and are treated as
/// distinct cities by the builder and the solver.
///
/// # Examples
///
/// ```
/// use optipath_core::Location;
///
/// # fn main() -> Result<(), optipath_core::LocationError> {
/// let location = Location::new("Brandenburg Gate, Berlin")?;
/// assert_eq!(location.as_str(), "Brandenburg Gate, Berlin");
/// assert!(Location::new("   ").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Location(String);

/// Errors returned by [`Location::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The text was empty or contained only whitespace.
    #[error("location text must not be blank")]
    Blank,
}

impl Location {
    /// Validates and constructs a [`Location`].
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::Blank`] when `text` is empty once trimmed.
    pub fn new(text: impl Into<String>) -> Result<Self, LocationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(LocationError::Blank);
        }
        Ok(Self(text))
    }

    /// Borrow the location text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Location {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Location {
    type Error = LocationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.0
    }
}
