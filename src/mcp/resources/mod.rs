//! MCP Resources
//!
//! Read-only views over the mission plan catalog, addressed by cassini:// URIs.

mod mission;

use super::registry::McpRegistry;

/// Register all resources with the registry
pub fn register_all_resources(registry: &mut McpRegistry) {
    mission::register_resources(registry);
}
