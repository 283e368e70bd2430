//! MCP stdio handler
//!
//! Reads newline-delimited JSON-RPC requests from stdin and writes responses
//! to stdout. Logging goes to stderr so the protocol stream stays clean.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use super::context::ToolContext;
use super::protocol::{
    methods, InitializeParams, InitializeResult, McpError, McpRequest, McpResponse, PingResult,
    PromptsCapability, PromptsGetParams, PromptsListResult, ResourcesCapability,
    ResourcesListResult, ResourcesReadParams, ResourcesReadResult, ServerCapabilities, ServerInfo,
    ToolsCallParams, ToolsCapability, ToolsListResult, MCP_PROTOCOL_VERSION,
};
use super::registry::McpRegistry;
use crate::plan_store::PlanStore;

pub const MCP_SERVER_NAME: &str = "cassini-huygens-mcp-server";

/// State shared across the MCP connection
pub struct McpServerState {
    pub registry: Arc<McpRegistry>,
    pub plan_store: Arc<dyn PlanStore>,
    pub server_version: String,
}

impl McpServerState {
    fn tool_context(&self) -> ToolContext {
        ToolContext {
            plan_store: self.plan_store.clone(),
        }
    }
}

/// Create the MCP state with registered tools, resources, and prompts
pub fn create_mcp_state(plan_store: Arc<dyn PlanStore>) -> McpServerState {
    let mut registry = McpRegistry::new();

    super::tools::register_all_tools(&mut registry);
    super::resources::register_all_resources(&mut registry);
    super::prompts::register_all_prompts(&mut registry);

    info!(
        "MCP registry initialized with {} tools, {} resources, {} prompts",
        registry.tool_count(),
        registry.resource_count(),
        registry.prompt_count()
    );

    McpServerState {
        registry: Arc::new(registry),
        plan_store,
        server_version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Run the stdio transport loop until the client closes stdin.
pub async fn run_stdio_server(state: McpServerState) -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(stdin).lines();

    let mut initialized = false;

    info!("{} running on stdio", MCP_SERVER_NAME);

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(response) = handle_message(line, &state, &mut initialized).await {
            let json = serde_json::to_string(&response)?;
            stdout.write_all(json.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }

    debug!("stdin closed, shutting down");
    Ok(())
}

/// Handle a single MCP message
pub async fn handle_message(
    text: &str,
    state: &McpServerState,
    initialized: &mut bool,
) -> Option<McpResponse> {
    // Parse the request
    let request: McpRequest = match serde_json::from_str(text) {
        Ok(req) => req,
        Err(e) => {
            return Some(McpResponse::error(
                None,
                McpError::ParseError(e.to_string()),
            ));
        }
    };

    let request_id = request.id.clone();

    // Dispatch based on method
    let result = match request.method.as_str() {
        methods::INITIALIZE => handle_initialize(&request, state, initialized).await,
        methods::INITIALIZED => {
            // Notification, no response needed
            return None;
        }
        methods::PING => handle_ping(&request).await,
        methods::TOOLS_LIST => {
            if !*initialized {
                Err(McpError::InvalidRequest("Not initialized".to_string()))
            } else {
                handle_tools_list(state).await
            }
        }
        methods::TOOLS_CALL => {
            if !*initialized {
                Err(McpError::InvalidRequest("Not initialized".to_string()))
            } else {
                handle_tools_call(&request, state).await
            }
        }
        methods::RESOURCES_LIST => {
            if !*initialized {
                Err(McpError::InvalidRequest("Not initialized".to_string()))
            } else {
                handle_resources_list(state).await
            }
        }
        methods::RESOURCES_READ => {
            if !*initialized {
                Err(McpError::InvalidRequest("Not initialized".to_string()))
            } else {
                handle_resources_read(&request, state).await
            }
        }
        methods::PROMPTS_LIST => {
            if !*initialized {
                Err(McpError::InvalidRequest("Not initialized".to_string()))
            } else {
                handle_prompts_list(state).await
            }
        }
        methods::PROMPTS_GET => {
            if !*initialized {
                Err(McpError::InvalidRequest("Not initialized".to_string()))
            } else {
                handle_prompts_get(&request, state).await
            }
        }
        methods::SHUTDOWN => {
            // Client is disconnecting gracefully
            return None;
        }
        other => Err(McpError::MethodNotFound(other.to_string())),
    };

    // Requests without an id are notifications and get no reply
    let request_id = request_id?;

    Some(match result {
        Ok(value) => McpResponse::success(request_id, value),
        Err(error) => McpResponse::error(Some(request_id), error),
    })
}

async fn handle_initialize(
    request: &McpRequest,
    state: &McpServerState,
    initialized: &mut bool,
) -> Result<serde_json::Value, McpError> {
    let _params: Option<InitializeParams> = request
        .params
        .clone()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?;

    *initialized = true;

    let result = InitializeResult {
        protocol_version: MCP_PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability { list_changed: None }),
            resources: Some(ResourcesCapability {
                subscribe: Some(false),
                list_changed: None,
            }),
            prompts: Some(PromptsCapability { list_changed: None }),
        },
        server_info: ServerInfo {
            name: MCP_SERVER_NAME.to_string(),
            version: state.server_version.clone(),
        },
    };

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

async fn handle_ping(_request: &McpRequest) -> Result<serde_json::Value, McpError> {
    serde_json::to_value(PingResult {}).map_err(|e| McpError::InternalError(e.to_string()))
}

async fn handle_tools_list(state: &McpServerState) -> Result<serde_json::Value, McpError> {
    let result = ToolsListResult {
        tools: state.registry.list_tools(),
    };

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

async fn handle_tools_call(
    request: &McpRequest,
    state: &McpServerState,
) -> Result<serde_json::Value, McpError> {
    let params: ToolsCallParams = request
        .params
        .clone()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?
        .ok_or_else(|| McpError::InvalidParams("Missing params".to_string()))?;

    let tool = state
        .registry
        .get_tool(&params.name)
        .ok_or_else(|| McpError::MethodNotFound(format!("Unknown tool: {}", params.name)))?;

    let arguments = params.arguments.unwrap_or(serde_json::json!({}));
    let result = (tool.handler)(state.tool_context(), arguments).await?;

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

async fn handle_resources_list(state: &McpServerState) -> Result<serde_json::Value, McpError> {
    let result = ResourcesListResult {
        resources: state.registry.list_resources(),
    };

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

async fn handle_resources_read(
    request: &McpRequest,
    state: &McpServerState,
) -> Result<serde_json::Value, McpError> {
    let params: ResourcesReadParams = request
        .params
        .clone()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?
        .ok_or_else(|| McpError::InvalidParams("Missing params".to_string()))?;

    let resource = state
        .registry
        .find_resource(&params.uri)
        .ok_or_else(|| McpError::ResourceNotFound(params.uri.clone()))?;

    let contents = (resource.handler)(state.tool_context(), params.uri).await?;

    let result = ResourcesReadResult { contents };

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

async fn handle_prompts_list(state: &McpServerState) -> Result<serde_json::Value, McpError> {
    let result = PromptsListResult {
        prompts: state.registry.list_prompts(),
    };

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

async fn handle_prompts_get(
    request: &McpRequest,
    state: &McpServerState,
) -> Result<serde_json::Value, McpError> {
    let params: PromptsGetParams = request
        .params
        .clone()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?
        .ok_or_else(|| McpError::InvalidParams("Missing params".to_string()))?;

    let prompt = state
        .registry
        .get_prompt(&params.name)
        .ok_or_else(|| McpError::PromptNotFound(params.name.clone()))?;

    let arguments = params.arguments.unwrap_or(serde_json::json!({}));
    let result = (prompt.handler)(state.tool_context(), arguments).await?;

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}
