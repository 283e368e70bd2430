//! Mission plan storage.
//!
//! `PlanStore` is the query contract both exposure surfaces consume; the
//! SQLite implementation composes every statement from bound parameters so
//! no external value is ever concatenated into SQL.

mod aggregate;
mod models;
mod sqlite_store;

pub use aggregate::{fetch_page, gather_stats};
pub use models::{MissionPlanEntry, MissionStats};
pub use sqlite_store::SqlitePlanStore;

use crate::query::FilterSet;
use anyhow::Result;

/// Columns that support distinct-value enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinctColumn {
    Team,
    Target,
    SpassType,
}

impl DistinctColumn {
    pub fn column_name(&self) -> &'static str {
        match self {
            DistinctColumn::Team => "team",
            DistinctColumn::Target => "target",
            DistinctColumn::SpassType => "spass_type",
        }
    }
}

/// Read-only catalog access over the master plan table.
///
/// Store faults propagate unchanged; translating them into transport errors
/// is the exposure layer's job. A missing id is `Ok(None)`, not a fault.
pub trait PlanStore: Send + Sync {
    /// List entries matching the filter set, ANDed, in store-native order.
    fn list_entries(
        &self,
        filters: &FilterSet,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MissionPlanEntry>>;

    /// Count entries matching the filter set. Returns 0 on an empty result.
    fn count_entries(&self, filters: &FilterSet) -> Result<i64>;

    /// Fetch a single entry by primary key.
    fn get_entry_by_id(&self, id: i64) -> Result<Option<MissionPlanEntry>>;

    /// Substring match on title or description, bounded by `limit`.
    fn search_text(&self, term: &str, limit: i64) -> Result<Vec<MissionPlanEntry>>;

    /// Distinct non-null values of a column, ascending.
    fn list_distinct(&self, column: DistinctColumn) -> Result<Vec<String>>;
}
