//! MCP Tools
//!
//! Tool implementations for mission plan access and metadata.

pub mod metadata;
pub mod mission;

use super::registry::McpRegistry;

/// Register all tools with the registry
pub fn register_all_tools(registry: &mut McpRegistry) {
    mission::register_tools(registry);
    metadata::register_tools(registry);
}
