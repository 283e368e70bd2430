//! Cassini-Huygens Mission Plan Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod mcp;
pub mod plan_store;
pub mod query;
pub mod server;

// Re-export commonly used types for convenience
pub use plan_store::{PlanStore, SqlitePlanStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
