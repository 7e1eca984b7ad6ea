//! Travel cost between two locations.

/// Cost of travelling from one location to another.
///
/// Values are non-negative integers in the unit reported by the upstream
/// service (metres for the HTTP client). A missing route is the distinct
/// [`Cost::Unreachable`] variant and never takes part in arithmetic.
///
/// # Examples
///
/// ```
/// use optipath_core::Cost;
///
/// assert_eq!(Cost::from(250).value(), Some(250));
/// assert_eq!(Cost::Unreachable.value(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Cost {
    /// A finite travel cost.
    Value(u64),
    /// No route exists between the pair.
    Unreachable,
}

impl Cost {
    /// Return the finite cost, or `None` when unreachable.
    #[must_use]
    pub const fn value(self) -> Option<u64> {
        match self {
            Self::Value(value) => Some(value),
            Self::Unreachable => None,
        }
    }

    /// Whether the pair has a route.
    #[must_use]
    pub const fn is_reachable(self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl From<u64> for Cost {
    fn from(value: u64) -> Self {
        Self::Value(value)
    }
}
