use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cassini_plan_server::mcp::{create_mcp_state, run_stdio_server};
use cassini_plan_server::SqlitePlanStore;

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite mission plan database file.
    pub plan_db: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    // stdout carries the JSON-RPC stream, so all logging goes to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    info!(
        "Opening SQLite mission plan database at {:?}...",
        cli_args.plan_db
    );
    let plan_store = Arc::new(SqlitePlanStore::open(&cli_args.plan_db)?);

    let state = create_mcp_state(plan_store);
    run_stdio_server(state).await
}
