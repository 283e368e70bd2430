//! MCP Tool Execution Context
//!
//! Provides access to the mission plan store for tool, resource, and prompt
//! implementations.

use std::sync::Arc;

use crate::plan_store::PlanStore;

#[derive(Clone)]
pub struct ToolContext {
    /// Access to mission plan data
    pub plan_store: Arc<dyn PlanStore>,
}
