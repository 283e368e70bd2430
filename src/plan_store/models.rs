//! Data model for mission plan entries.

use serde::Serialize;

/// A single row of the Cassini-Huygens master plan.
///
/// The table is externally provisioned and read-only; every field besides the
/// primary key is nullable in the source data. JSON field names match the
/// database column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionPlanEntry {
    pub id: i64,
    pub start_time_utc: Option<String>,
    pub duration: Option<String>,
    pub date: Option<String>,
    pub team: Option<String>,
    pub spass_type: Option<String>,
    pub target: Option<String>,
    pub request_name: Option<String>,
    pub library_definition: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Aggregate counts over the whole table, shaped for the stats endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionStats {
    pub total_entries: i64,
    pub unique_teams: usize,
    pub unique_targets: usize,
    pub unique_spass_types: usize,
}
