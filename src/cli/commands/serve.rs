//! Streamable HTTP MCP server.

use crate::cli::Output;
use crate::config::{ApiConfig, Settings};
use crate::mcp::{router, McpServer};
use std::sync::Arc;
use tracing::info;

/// Run the HTTP MCP server until interrupted.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    config: ApiConfig,
    settings: Settings,
) -> anyhow::Result<()> {
    let host = host.unwrap_or(settings.server.host);
    let port = port.unwrap_or(settings.server.port);
    let path = settings.server.path;

    let server = McpServer::new(Arc::new(config), Arc::new(settings.limits));
    let app = router(server, &path);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    Output::header("ytdata MCP Server");
    Output::success(&format!("Listening on http://{}{}", addr, path));
    Output::kv("MCP", &format!("POST {}", path));
    Output::kv("Health", "GET  /health");
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
