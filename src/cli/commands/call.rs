//! One-shot tool invocation.

use crate::cli::Output;
use crate::config::{ApiConfig, Settings};
use crate::mcp::McpServer;
use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;

/// Run `tool` once and print its payload to stdout.
///
/// Error payloads are printed too, and turn into a non-zero exit.
pub async fn run_call(
    tool: &str,
    args: Option<&str>,
    config: ApiConfig,
    settings: Settings,
) -> Result<()> {
    let args: Option<Value> = args
        .map(serde_json::from_str::<Value>)
        .transpose()
        .context("--args must be a JSON object")?;

    let server = McpServer::new(Arc::new(config), Arc::new(settings.limits));
    let payload = server.run_tool(tool, args).await;

    if payload.starts_with("ERROR: ") {
        Output::error(&payload);
        anyhow::bail!("{} failed", tool);
    }

    match serde_json::from_str::<Value>(&payload) {
        Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Err(_) => println!("{}", payload),
    }
    Ok(())
}
