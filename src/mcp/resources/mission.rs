//! Mission Plan Resources
//!
//! Fixed-URI snapshots: the first page of the plan plus the metadata lists.

use serde_json::json;

use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ResourceContent};
use crate::mcp::registry::{McpRegistry, RegisteredResource, ResourceBuilder, ResourceResult};
use crate::plan_store::{fetch_page, gather_stats, DistinctColumn};
use crate::query::FilterSet;
use tokio::task;

const RESOURCE_PAGE_LIMIT: i64 = 100;

/// Register mission plan resources with the registry
pub fn register_resources(registry: &mut McpRegistry) {
    registry.register_resource(mission_plan_all_resource());
    registry.register_resource(metadata_teams_resource());
    registry.register_resource(metadata_targets_resource());
    registry.register_resource(metadata_stats_resource());
}

fn json_content(uri: String, value: &impl serde::Serialize) -> ResourceResult {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::InternalError(e.to_string()))?;
    Ok(vec![ResourceContent::Text {
        uri,
        mime_type: Some("application/json".to_string()),
        text,
    }])
}

fn mission_plan_all_resource() -> RegisteredResource {
    ResourceBuilder::new("cassini://mission-plan/all", "Mission Plan Entries")
        .description("First page of Cassini-Huygens mission plan entries")
        .mime_type("application/json")
        .build(mission_plan_all_handler)
}

async fn mission_plan_all_handler(ctx: ToolContext, uri: String) -> ResourceResult {
    let (entries, total) = fetch_page(ctx.plan_store, FilterSet::default(), RESOURCE_PAGE_LIMIT, 0)
        .await
        .map_err(|e| McpError::InternalError(e.to_string()))?;

    json_content(
        uri,
        &json!({
            "entries": entries,
            "total": total,
            "limit": RESOURCE_PAGE_LIMIT,
        }),
    )
}

fn metadata_teams_resource() -> RegisteredResource {
    ResourceBuilder::new("cassini://metadata/teams", "Science Teams")
        .description("All science teams present in the mission plan")
        .mime_type("application/json")
        .build(|ctx, uri| metadata_list_handler(ctx, uri, DistinctColumn::Team, "teams"))
}

fn metadata_targets_resource() -> RegisteredResource {
    ResourceBuilder::new("cassini://metadata/targets", "Observation Targets")
        .description("All observation targets present in the mission plan")
        .mime_type("application/json")
        .build(|ctx, uri| metadata_list_handler(ctx, uri, DistinctColumn::Target, "targets"))
}

async fn metadata_list_handler(
    ctx: ToolContext,
    uri: String,
    column: DistinctColumn,
    key: &'static str,
) -> ResourceResult {
    let store = ctx.plan_store;
    let values = task::spawn_blocking(move || store.list_distinct(column))
        .await
        .map_err(|e| McpError::InternalError(e.to_string()))?
        .map_err(|e| McpError::InternalError(e.to_string()))?;

    let count = values.len();
    json_content(uri, &json!({ key: values, "count": count }))
}

fn metadata_stats_resource() -> RegisteredResource {
    ResourceBuilder::new("cassini://metadata/stats", "Mission Statistics")
        .description("Aggregate statistics over the mission plan")
        .mime_type("application/json")
        .build(metadata_stats_handler)
}

async fn metadata_stats_handler(ctx: ToolContext, uri: String) -> ResourceResult {
    let stats = gather_stats(ctx.plan_store)
        .await
        .map_err(|e| McpError::InternalError(e.to_string()))?;

    json_content(uri, &stats)
}
