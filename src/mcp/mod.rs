//! Model Context Protocol subsystem
//!
//! JSON-RPC 2.0 over newline-delimited stdio. The handler gates everything
//! behind `initialize`, the registry dispatches tools, resources, and
//! prompts, and all catalog access goes through the shared [`PlanStore`]
//! contract.
//!
//! [`PlanStore`]: crate::plan_store::PlanStore

pub mod context;
pub mod handler;
pub mod prompts;
pub mod protocol;
pub mod registry;
pub mod resources;
pub mod tools;

pub use context::ToolContext;
pub use handler::{create_mcp_state, handle_message, run_stdio_server, McpServerState};
pub use protocol::{McpError, McpRequest, McpResponse};
pub use registry::McpRegistry;
