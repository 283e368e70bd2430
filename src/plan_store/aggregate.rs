//! Concurrent read compositions shared by both exposure surfaces.
//!
//! rusqlite work is blocking, so each independent read runs on the blocking
//! pool and the legs are joined fail-fast: if any one read errors, the whole
//! combined operation errors with no partial result.

use super::models::{MissionPlanEntry, MissionStats};
use super::{DistinctColumn, PlanStore};
use crate::query::FilterSet;
use anyhow::Result;
use std::sync::Arc;
use tokio::task;

/// Fetch one page of entries together with the total count for the same
/// filter set.
pub async fn fetch_page(
    store: Arc<dyn PlanStore>,
    filters: FilterSet,
    limit: i64,
    offset: i64,
) -> Result<(Vec<MissionPlanEntry>, i64)> {
    let list_store = store.clone();
    let list_filters = filters.clone();
    let count_store = store;
    let count_filters = filters;

    let (entries, total) = tokio::try_join!(
        task::spawn_blocking(move || list_store.list_entries(&list_filters, limit, offset)),
        task::spawn_blocking(move || count_store.count_entries(&count_filters)),
    )?;

    Ok((entries?, total?))
}

/// Gather the four table-wide aggregates concurrently.
pub async fn gather_stats(store: Arc<dyn PlanStore>) -> Result<MissionStats> {
    let count_store = store.clone();
    let teams_store = store.clone();
    let targets_store = store.clone();
    let spass_store = store;

    let (total, teams, targets, spass_types) = tokio::try_join!(
        task::spawn_blocking(move || count_store.count_entries(&FilterSet::default())),
        task::spawn_blocking(move || teams_store.list_distinct(DistinctColumn::Team)),
        task::spawn_blocking(move || targets_store.list_distinct(DistinctColumn::Target)),
        task::spawn_blocking(move || spass_store.list_distinct(DistinctColumn::SpassType)),
    )?;

    Ok(MissionStats {
        total_entries: total?,
        unique_teams: teams?.len(),
        unique_targets: targets?.len(),
        unique_spass_types: spass_types?.len(),
    })
}
