//! Mission Plan Tools
//!
//! Tools for listing, fetching, and searching mission plan entries. Tool
//! arguments get the clamp pagination policy only; malformed agent input
//! degrades to defaults instead of failing hard.

use serde_json::{json, Value};

use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ToolsCallResult};
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};
use crate::plan_store::fetch_page;
use crate::query::{clamp_limit, clamp_offset, parse_loose_int, FilterSet};
use tokio::task;

/// Register mission plan tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(get_mission_plan_tool());
    registry.register_tool(get_activity_by_id_tool());
    registry.register_tool(search_activities_tool());
}

/// Pull the whitelisted filters out of loosely-typed tool arguments; keys we
/// don't read are simply ignored.
pub fn filters_from_args(args: &Value) -> FilterSet {
    let pick = |key: &str| {
        args.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    FilterSet {
        team: pick("team"),
        target: pick("target"),
        date: pick("date"),
        spass_type: pick("spass_type"),
    }
}

// ============================================================================
// get-mission-plan
// ============================================================================

fn get_mission_plan_tool() -> RegisteredTool {
    ToolBuilder::new("get-mission-plan")
        .description("Get mission plan entries with optional filters and pagination")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "team": { "type": "string", "description": "Filter by team name" },
                "target": { "type": "string", "description": "Filter by target" },
                "date": { "type": "string", "description": "Filter by date" },
                "spass_type": { "type": "string", "description": "Filter by SPASS type" },
                "limit": { "type": "number", "description": "Maximum results (default: 100, max: 1000)" },
                "offset": { "type": "number", "description": "Pagination offset (default: 0)" },
            },
        }))
        .build(get_mission_plan_handler)
}

async fn get_mission_plan_handler(ctx: ToolContext, args: Value) -> ToolResult {
    let filters = filters_from_args(&args);
    let limit = clamp_limit(parse_loose_int(args.get("limit")));
    let offset = clamp_offset(parse_loose_int(args.get("offset")));

    let (entries, total) = fetch_page(ctx.plan_store, filters.clone(), limit, offset)
        .await
        .map_err(|e| McpError::ToolExecutionFailed(e.to_string()))?;

    let count = entries.len();
    let result = json!({
        "data": entries,
        "pagination": {
            "total": total,
            "limit": limit,
            "offset": offset,
            "count": count,
        },
        "filters": if filters.is_empty() { Value::Null } else { json!(filters) },
    });

    ToolsCallResult::json(&result).map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// get-activity-by-id
// ============================================================================

fn get_activity_by_id_tool() -> RegisteredTool {
    ToolBuilder::new("get-activity-by-id")
        .description("Get a single mission plan entry by ID")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": { "type": "number", "description": "Mission plan entry ID" },
            },
            "required": ["id"],
        }))
        .build(get_activity_by_id_handler)
}

async fn get_activity_by_id_handler(ctx: ToolContext, args: Value) -> ToolResult {
    let id = parse_loose_int(args.get("id"))
        .ok_or_else(|| McpError::InvalidParams("ID argument is required".to_string()))?;

    let store = ctx.plan_store;
    let entry = task::spawn_blocking(move || store.get_entry_by_id(id))
        .await
        .map_err(|e| McpError::InternalError(e.to_string()))?
        .map_err(|e| McpError::ToolExecutionFailed(e.to_string()))?;

    let entry = entry.ok_or_else(|| {
        McpError::ToolExecutionFailed(format!("Mission plan entry with id {} not found", id))
    })?;

    let result = json!({ "data": entry });

    ToolsCallResult::json(&result).map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// search-activities
// ============================================================================

fn search_activities_tool() -> RegisteredTool {
    ToolBuilder::new("search-activities")
        .description("Search mission activities by keyword in title or description")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Search query" },
                "limit": { "type": "number", "description": "Maximum results (default: 100, max: 1000)" },
            },
            "required": ["query"],
        }))
        .build(search_activities_handler)
}

async fn search_activities_handler(ctx: ToolContext, args: Value) -> ToolResult {
    let query = args
        .get("query")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| McpError::InvalidParams("Query argument is required".to_string()))?
        .to_string();

    let limit = clamp_limit(parse_loose_int(args.get("limit")));

    let store = ctx.plan_store;
    let term = query.clone();
    let results = task::spawn_blocking(move || store.search_text(&term, limit))
        .await
        .map_err(|e| McpError::InternalError(e.to_string()))?
        .map_err(|e| McpError::ToolExecutionFailed(e.to_string()))?;

    let count = results.len();
    let result = json!({
        "data": results,
        "query": query,
        "count": count,
    });

    ToolsCallResult::json(&result).map_err(|e| McpError::InternalError(e.to_string()))
}
