//! MCP Tool, Resource, and Prompt Registry
//!
//! Manages registration and lookup of tools, resources, and prompts.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use super::context::ToolContext;
use super::protocol::{
    McpError, PromptArgument, PromptDefinition, PromptsGetResult, ResourceContent,
    ResourceDefinition, ToolDefinition, ToolsCallResult,
};

// ============================================================================
// Tool Types
// ============================================================================

/// Result type for tool execution
pub type ToolResult = Result<ToolsCallResult, McpError>;

/// Boxed future for async tool execution
pub type ToolFuture = Pin<Box<dyn Future<Output = ToolResult> + Send>>;

/// Tool handler function type
pub type ToolHandler = Arc<dyn Fn(ToolContext, Value) -> ToolFuture + Send + Sync>;

/// A registered tool with metadata and handler
pub struct RegisteredTool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    pub handler: ToolHandler,
}

// ============================================================================
// Resource Types
// ============================================================================

/// Result type for resource read
pub type ResourceResult = Result<Vec<ResourceContent>, McpError>;

/// Boxed future for async resource read
pub type ResourceFuture = Pin<Box<dyn Future<Output = ResourceResult> + Send>>;

/// Resource handler function type
pub type ResourceHandler = Arc<dyn Fn(ToolContext, String) -> ResourceFuture + Send + Sync>;

/// A registered resource with metadata and handler
pub struct RegisteredResource {
    pub uri_pattern: String,
    pub name: String,
    pub description: Option<String>,
    pub mime_type: Option<String>,
    pub handler: ResourceHandler,
}

// ============================================================================
// Prompt Types
// ============================================================================

/// Result type for prompt rendering
pub type PromptResult = Result<PromptsGetResult, McpError>;

/// Boxed future for async prompt rendering
pub type PromptFuture = Pin<Box<dyn Future<Output = PromptResult> + Send>>;

/// Prompt handler function type
pub type PromptHandler = Arc<dyn Fn(ToolContext, Value) -> PromptFuture + Send + Sync>;

/// A registered prompt with metadata and handler
pub struct RegisteredPrompt {
    pub name: String,
    pub description: String,
    pub arguments: Vec<PromptArgument>,
    pub handler: PromptHandler,
}

// ============================================================================
// Registry
// ============================================================================

/// Registry for MCP tools, resources, and prompts
pub struct McpRegistry {
    tools: HashMap<String, RegisteredTool>,
    resources: Vec<RegisteredResource>,
    prompts: HashMap<String, RegisteredPrompt>,
}

impl McpRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            resources: Vec::new(),
            prompts: HashMap::new(),
        }
    }

    /// Register a tool
    pub fn register_tool(&mut self, tool: RegisteredTool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Register a resource
    pub fn register_resource(&mut self, resource: RegisteredResource) {
        self.resources.push(resource);
    }

    /// Register a prompt
    pub fn register_prompt(&mut self, prompt: RegisteredPrompt) {
        self.prompts.insert(prompt.name.clone(), prompt);
    }

    /// List all registered tools, sorted by name for stable output
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        let mut tools: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name.clone(),
                description: tool.description.clone(),
                input_schema: tool.input_schema.clone(),
            })
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    /// List all registered resources in registration order
    pub fn list_resources(&self) -> Vec<ResourceDefinition> {
        self.resources
            .iter()
            .map(|resource| ResourceDefinition {
                uri: resource.uri_pattern.clone(),
                name: resource.name.clone(),
                description: resource.description.clone(),
                mime_type: resource.mime_type.clone(),
            })
            .collect()
    }

    /// Find a resource handler for a URI
    pub fn find_resource(&self, uri: &str) -> Option<&RegisteredResource> {
        self.resources
            .iter()
            .find(|resource| matches_uri_pattern(&resource.uri_pattern, uri))
    }

    /// List all registered prompts, sorted by name for stable output
    pub fn list_prompts(&self) -> Vec<PromptDefinition> {
        let mut prompts: Vec<PromptDefinition> = self
            .prompts
            .values()
            .map(|prompt| PromptDefinition {
                name: prompt.name.clone(),
                description: prompt.description.clone(),
                arguments: prompt.arguments.clone(),
            })
            .collect();
        prompts.sort_by(|a, b| a.name.cmp(&b.name));
        prompts
    }

    /// Get a prompt by name
    pub fn get_prompt(&self, name: &str) -> Option<&RegisteredPrompt> {
        self.prompts.get(name)
    }

    /// Get the number of registered tools
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Get the number of registered resources
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Get the number of registered prompts
    pub fn prompt_count(&self) -> usize {
        self.prompts.len()
    }
}

impl Default for McpRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a URI matches a pattern with {param} placeholders
fn matches_uri_pattern(pattern: &str, uri: &str) -> bool {
    let pattern_parts: Vec<&str> = pattern.split('/').collect();
    let uri_parts: Vec<&str> = uri.split('/').collect();

    if pattern_parts.len() != uri_parts.len() {
        return false;
    }

    for (pattern_part, uri_part) in pattern_parts.iter().zip(uri_parts.iter()) {
        if pattern_part.starts_with('{') && pattern_part.ends_with('}') {
            // Parameter placeholder - matches anything
            continue;
        }
        if pattern_part != uri_part {
            return false;
        }
    }

    true
}

// ============================================================================
// Builder helpers
// ============================================================================

/// Builder for registering a tool
pub struct ToolBuilder {
    name: String,
    description: String,
    input_schema: Value,
}

impl ToolBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn input_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }

    pub fn build<F, Fut>(self, handler: F) -> RegisteredTool
    where
        F: Fn(ToolContext, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult> + Send + 'static,
    {
        RegisteredTool {
            name: self.name,
            description: self.description,
            input_schema: self.input_schema,
            handler: Arc::new(move |ctx, params| Box::pin(handler(ctx, params))),
        }
    }
}

/// Builder for registering a resource
pub struct ResourceBuilder {
    uri_pattern: String,
    name: String,
    description: Option<String>,
    mime_type: Option<String>,
}

impl ResourceBuilder {
    pub fn new(uri_pattern: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uri_pattern: uri_pattern.into(),
            name: name.into(),
            description: None,
            mime_type: None,
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }

    pub fn build<F, Fut>(self, handler: F) -> RegisteredResource
    where
        F: Fn(ToolContext, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ResourceResult> + Send + 'static,
    {
        RegisteredResource {
            uri_pattern: self.uri_pattern,
            name: self.name,
            description: self.description,
            mime_type: self.mime_type,
            handler: Arc::new(move |ctx, uri| Box::pin(handler(ctx, uri))),
        }
    }
}

/// Builder for registering a prompt
pub struct PromptBuilder {
    name: String,
    description: String,
    arguments: Vec<PromptArgument>,
}

impl PromptBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            arguments: Vec::new(),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn argument(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.arguments.push(PromptArgument {
            name: name.into(),
            description: description.into(),
            required,
        });
        self
    }

    pub fn build<F, Fut>(self, handler: F) -> RegisteredPrompt
    where
        F: Fn(ToolContext, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = PromptResult> + Send + 'static,
    {
        RegisteredPrompt {
            name: self.name,
            description: self.description,
            arguments: self.arguments,
            handler: Arc::new(move |ctx, params| Box::pin(handler(ctx, params))),
        }
    }
}
