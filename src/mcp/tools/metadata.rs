//! Metadata Tool
//!
//! One consolidated tool for teams, targets, SPASS types, and statistics.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ToolsCallResult};
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};
use crate::plan_store::{gather_stats, DistinctColumn};
use tokio::task;

/// Register metadata tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(get_metadata_tool());
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum MetadataType {
    Teams,
    Targets,
    SpassTypes,
    Stats,
}

#[derive(Debug, Deserialize)]
struct GetMetadataParams {
    #[serde(rename = "type", default = "default_metadata_type")]
    metadata_type: MetadataType,
}

fn default_metadata_type() -> MetadataType {
    MetadataType::Stats
}

fn get_metadata_tool() -> RegisteredTool {
    ToolBuilder::new("get-metadata")
        .description("Get mission metadata (teams, targets, spass-types, or stats)")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "type": {
                    "type": "string",
                    "enum": ["teams", "targets", "spass-types", "stats"],
                    "description": "Type of metadata to retrieve (default: stats)",
                },
            },
        }))
        .build(get_metadata_handler)
}

async fn get_metadata_handler(ctx: ToolContext, args: Value) -> ToolResult {
    let params: GetMetadataParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let result = match params.metadata_type {
        MetadataType::Teams => list_column(&ctx, DistinctColumn::Team).await?,
        MetadataType::Targets => list_column(&ctx, DistinctColumn::Target).await?,
        MetadataType::SpassTypes => list_column(&ctx, DistinctColumn::SpassType).await?,
        MetadataType::Stats => {
            let stats = gather_stats(ctx.plan_store)
                .await
                .map_err(|e| McpError::ToolExecutionFailed(e.to_string()))?;
            json!({ "data": stats })
        }
    };

    ToolsCallResult::json(&result).map_err(|e| McpError::InternalError(e.to_string()))
}

async fn list_column(ctx: &ToolContext, column: DistinctColumn) -> Result<Value, McpError> {
    let store = ctx.plan_store.clone();
    let values = task::spawn_blocking(move || store.list_distinct(column))
        .await
        .map_err(|e| McpError::InternalError(e.to_string()))?
        .map_err(|e| McpError::ToolExecutionFailed(e.to_string()))?;

    let count = values.len();
    Ok(json!({ "data": values, "count": count }))
}
