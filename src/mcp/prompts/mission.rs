//! Mission Plan Prompts

use serde_json::Value;

use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, PromptsGetResult};
use crate::mcp::registry::{McpRegistry, PromptBuilder, PromptResult, RegisteredPrompt};
use crate::plan_store::fetch_page;
use crate::query::FilterSet;
use tokio::task;

const SUMMARY_PAGE_LIMIT: i64 = 50;
const SEARCH_PROMPT_LIMIT: i64 = 20;

/// Register mission plan prompts with the registry
pub fn register_prompts(registry: &mut McpRegistry) {
    registry.register_prompt(mission_summary_prompt());
    registry.register_prompt(activity_details_prompt());
    registry.register_prompt(search_activities_prompt());
}

fn arg_str(args: &Value, key: &str) -> Option<String> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn pretty(value: &impl serde::Serialize) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// mission-summary
// ============================================================================

fn mission_summary_prompt() -> RegisteredPrompt {
    PromptBuilder::new("mission-summary")
        .description("Summarize Cassini-Huygens mission activities, optionally filtered")
        .argument("team", "Filter by science team", false)
        .argument("target", "Filter by observation target", false)
        .build(mission_summary_handler)
}

async fn mission_summary_handler(ctx: ToolContext, args: Value) -> PromptResult {
    let filters = FilterSet {
        team: arg_str(&args, "team"),
        target: arg_str(&args, "target"),
        ..FilterSet::default()
    };

    let (entries, total) = fetch_page(ctx.plan_store, filters.clone(), SUMMARY_PAGE_LIMIT, 0)
        .await
        .map_err(|e| McpError::InternalError(e.to_string()))?;

    let mut filter_desc = String::new();
    if let Some(team) = &filters.team {
        filter_desc.push_str(&format!(" for team=\"{}\"", team));
    }
    if let Some(target) = &filters.target {
        let sep = if filter_desc.is_empty() { " for" } else { "," };
        filter_desc.push_str(&format!("{} target=\"{}\"", sep, target));
    }

    let text = format!(
        "Analyze the Cassini-Huygens mission activities{}. \
         Here are the first {} of {} total entries:\n\n{}",
        filter_desc,
        entries.len(),
        total,
        pretty(&entries)?,
    );

    Ok(PromptsGetResult::user_text(
        "Mission activity summary",
        text,
    ))
}

// ============================================================================
// activity-details
// ============================================================================

fn activity_details_prompt() -> RegisteredPrompt {
    PromptBuilder::new("activity-details")
        .description("Explain a single mission activity in detail")
        .argument("id", "Mission plan entry ID", true)
        .build(activity_details_handler)
}

async fn activity_details_handler(ctx: ToolContext, args: Value) -> PromptResult {
    let id = crate::query::parse_loose_int(args.get("id"))
        .ok_or_else(|| McpError::InvalidParams("ID argument is required".to_string()))?;

    let store = ctx.plan_store;
    let entry = task::spawn_blocking(move || store.get_entry_by_id(id))
        .await
        .map_err(|e| McpError::InternalError(e.to_string()))?
        .map_err(|e| McpError::InternalError(e.to_string()))?;

    let entry = entry.ok_or_else(|| {
        McpError::InvalidParams(format!("Mission plan entry with id {} not found", id))
    })?;

    let text = format!(
        "Explain this Cassini-Huygens mission activity:\n\n{}",
        pretty(&entry)?,
    );

    Ok(PromptsGetResult::user_text("Mission activity details", text))
}

// ============================================================================
// search-activities
// ============================================================================

fn search_activities_prompt() -> RegisteredPrompt {
    PromptBuilder::new("search-activities")
        .description("Analyze mission activities matching a text query")
        .argument("query", "Text to search in titles and descriptions", true)
        .build(search_activities_handler)
}

async fn search_activities_handler(ctx: ToolContext, args: Value) -> PromptResult {
    let query = arg_str(&args, "query")
        .ok_or_else(|| McpError::InvalidParams("Query argument is required".to_string()))?;

    let store = ctx.plan_store;
    let term = query.clone();
    let results = task::spawn_blocking(move || store.search_text(&term, SEARCH_PROMPT_LIMIT))
        .await
        .map_err(|e| McpError::InternalError(e.to_string()))?
        .map_err(|e| McpError::InternalError(e.to_string()))?;

    let text = format!(
        "Analyze these Cassini-Huygens mission activities matching \"{}\":\n\n{}",
        query,
        pretty(&results)?,
    );

    Ok(PromptsGetResult::user_text("Mission activity search", text))
}
