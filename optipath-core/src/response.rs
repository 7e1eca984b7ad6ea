//! Wire-level response contract.
//!
//! Success is `{"minCost": 1234, "path": [0, 2, 1, 0]}`. An infeasible tour
//! is `{"minCost": -1, "path": [], "message": "..."}`; callers must check
//! for `-1` before trusting `path`.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::TourResult;

/// `minCost` field: a tour cost, or the `-1` infeasible marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinCost {
    /// Cost of the returned tour.
    Cost(u64),
    /// Encoded as `-1`.
    Infeasible,
}

impl Serialize for MinCost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Cost(cost) => serializer.serialize_u64(*cost),
            Self::Infeasible => serializer.serialize_i64(-1),
        }
    }
}

struct MinCostVisitor;

impl Visitor<'_> for MinCostVisitor {
    type Value = MinCost;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a non-negative tour cost or -1")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<MinCost, E> {
        Ok(MinCost::Cost(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<MinCost, E> {
        match value {
            -1 => Ok(MinCost::Infeasible),
            _ => u64::try_from(value)
                .map(MinCost::Cost)
                .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for MinCost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_i64(MinCostVisitor)
    }
}

/// Response returned to callers of the solve operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    /// Tour cost or the infeasible marker.
    pub min_cost: MinCost,
    /// Visiting order closing back to 0; empty when infeasible.
    pub path: Vec<usize>,
    /// Explanation, present only when infeasible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&TourResult> for SolveResponse {
    fn from(result: &TourResult) -> Self {
        match result {
            TourResult::Feasible(tour) => Self {
                min_cost: MinCost::Cost(tour.min_cost),
                path: tour.path.clone(),
                message: None,
            },
            TourResult::Infeasible(reason) => Self {
                min_cost: MinCost::Infeasible,
                path: Vec::new(),
                message: Some(reason.message().to_owned()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    use crate::{INFEASIBLE_MESSAGE, Infeasibility, Tour};

    #[rstest]
    fn feasible_result_omits_message() {
        let result = TourResult::Feasible(Tour {
            min_cost: 10,
            path: vec![0, 1, 0],
        });

        let value = serde_json::to_value(SolveResponse::from(&result)).expect("serialise");

        assert_eq!(value, json!({ "minCost": 10, "path": [0, 1, 0] }));
    }

    #[rstest]
    fn infeasible_result_uses_minus_one() {
        let result = TourResult::Infeasible(Infeasibility::Unreachable { from: 2, to: 3 });

        let value = serde_json::to_value(SolveResponse::from(&result)).expect("serialise");

        assert_eq!(
            value,
            json!({ "minCost": -1, "path": [], "message": INFEASIBLE_MESSAGE })
        );
    }

    #[rstest]
    #[case(r#"{"minCost": 42, "path": [0, 1, 0]}"#, MinCost::Cost(42))]
    #[case(r#"{"minCost": -1, "path": [], "message": "x"}"#, MinCost::Infeasible)]
    fn decodes_both_shapes(#[case] payload: &str, #[case] expected: MinCost) {
        let response: SolveResponse = serde_json::from_str(payload).expect("valid payload");
        assert_eq!(response.min_cost, expected);
    }

    #[rstest]
    fn other_negative_costs_are_rejected() {
        let result: Result<SolveResponse, _> =
            serde_json::from_str(r#"{"minCost": -2, "path": []}"#);
        assert!(result.is_err());
    }
}
