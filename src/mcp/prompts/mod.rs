//! MCP Prompts
//!
//! Prebuilt analysis prompts that embed catalog data as user-role messages.

mod mission;

use super::registry::McpRegistry;

/// Register all prompts with the registry
pub fn register_all_prompts(registry: &mut McpRegistry) {
    mission::register_prompts(registry);
}
