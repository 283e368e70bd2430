//! Filter whitelisting and normalization for mission plan queries.

use serde::Serialize;
use std::collections::HashMap;

/// Query parameters accepted by the primary listing route. Everything else
/// gets the whole request rejected.
pub const ALLOWED_QUERY_PARAMS: [&str; 6] =
    ["team", "target", "date", "spass_type", "limit", "offset"];

/// The canonical filter set for mission plan queries.
///
/// Only the four whitelisted columns can be constrained. An absent or empty
/// value means "no constraint on that column", never "match empty string".
/// Serialization emits only the provided keys, so the set can be echoed back
/// in responses as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spass_type: Option<String>,
}

impl FilterSet {
    /// Build a filter set from raw string parameters, dropping empty values.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let pick = |key: &str| {
            params
                .get(key)
                .filter(|value| !value.is_empty())
                .map(|value| value.to_string())
        };
        FilterSet {
            team: pick("team"),
            target: pick("target"),
            date: pick("date"),
            spass_type: pick("spass_type"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.team.is_none()
            && self.target.is_none()
            && self.date.is_none()
            && self.spass_type.is_none()
    }

    /// The declarative predicate list folded into parameterized SQL by the
    /// store. Column names come only from this fixed enumeration.
    pub fn predicates(&self) -> Vec<(&'static str, &str)> {
        let mut predicates = Vec::new();
        if let Some(team) = &self.team {
            predicates.push(("team", team.as_str()));
        }
        if let Some(target) = &self.target {
            predicates.push(("target", target.as_str()));
        }
        if let Some(date) = &self.date {
            predicates.push(("date", date.as_str()));
        }
        if let Some(spass_type) = &self.spass_type {
            predicates.push(("spass_type", spass_type.as_str()));
        }
        predicates
    }
}

/// Reject any query parameter outside the whitelist. Returns the offending
/// keys, sorted for deterministic error messages.
pub fn reject_unknown_params(params: &HashMap<String, String>) -> Result<(), Vec<String>> {
    let mut invalid: Vec<String> = params
        .keys()
        .filter(|key| !ALLOWED_QUERY_PARAMS.contains(&key.as_str()))
        .cloned()
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        invalid.sort();
        Err(invalid)
    }
}
