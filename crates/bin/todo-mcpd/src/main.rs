//! Daemon entry point for the Notion todo MCP server.
//!
//! Loads configuration from the environment (and an optional `.env` file),
//! builds the Notion-backed todo store, and serves the MCP protocol over stdio
//! or streamable HTTP.

mod config;

use todo_core::control::TodoControlPlane;
use todo_core::store::NotionTodoStore;
use todo_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::TodoConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = TodoConfig::from_args()?;
    let store = NotionTodoStore::new(&config.store_config())?;
    info!(database_id = store.database_id(), "todo store ready");
    let control = TodoControlPlane::new(store);

    match config.http_addr {
        Some(addr) => {
            let http = McpHttpServerConfig::new(addr).with_stateful_mode(!config.http_stateless);
            serve_streamable_http(control, http).await
        }
        None => serve_stdio(control).await,
    }
}

/// Logs go to stderr; stdout carries the stdio transport.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
