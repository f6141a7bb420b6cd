//! MCP command implementation.

use crate::config::{ApiConfig, Settings};
use crate::mcp::McpServer;
use anyhow::Result;
use std::sync::Arc;

/// Run the MCP server on stdio.
pub async fn run_mcp(config: ApiConfig, settings: Settings) -> Result<()> {
    let server = McpServer::new(Arc::new(config), Arc::new(settings.limits));
    server.run_stdio().await
}
