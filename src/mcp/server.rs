//! MCP server implementation.

use super::protocol::*;
use super::tools::{call_tool, definitions, render_error};
use crate::config::{ApiConfig, Limits};
use crate::youtube::YoutubeClient;
#[cfg(test)]
use crate::youtube::YoutubeApi;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

pub const PROTOCOL_VERSION: &str = "2025-03-26";
const SERVER_NAME: &str = "ytdata";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where tool calls send their upstream requests.
#[derive(Clone)]
enum Upstream {
    /// A fresh HTTP client per tool call.
    Http(Arc<ApiConfig>),
    #[cfg(test)]
    Fixed(Arc<dyn YoutubeApi>),
}

/// MCP server for the YouTube tools. Cheap to clone.
#[derive(Clone)]
pub struct McpServer {
    upstream: Upstream,
    limits: Arc<Limits>,
}

impl McpServer {
    pub fn new(config: Arc<ApiConfig>, limits: Arc<Limits>) -> Self {
        Self {
            upstream: Upstream::Http(config),
            limits,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_api(api: Arc<dyn YoutubeApi>, limits: Limits) -> Self {
        Self {
            upstream: Upstream::Fixed(api),
            limits: Arc::new(limits),
        }
    }

    /// Run the stdio transport: one JSON-RPC message per line on stdin,
    /// one response per line on stdout.
    pub async fn run_stdio(&self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        info!("ytdata MCP server listening on stdio");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let mut out = serde_json::to_string(&response)?;
                out.push('\n');
                stdout.write_all(out.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw message. `None` means nothing should be sent back.
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        match serde_json::from_str::<Value>(line) {
            Ok(message) => self.handle_message(message).await,
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                Some(to_json(&JsonRpcResponse::error(None, PARSE_ERROR, "Parse error")))
            }
        }
    }

    /// Handle a single message or a batch.
    pub async fn handle_message(&self, message: Value) -> Option<Value> {
        match message {
            Value::Array(batch) if batch.is_empty() => Some(to_json(&JsonRpcResponse::error(
                None,
                INVALID_REQUEST,
                "Empty batch",
            ))),
            Value::Array(batch) => {
                let mut responses = Vec::with_capacity(batch.len());
                for message in batch {
                    if let Some(response) = self.handle_single(message).await {
                        responses.push(to_json(&response));
                    }
                }
                (!responses.is_empty()).then_some(Value::Array(responses))
            }
            message => self
                .handle_single(message)
                .await
                .map(|response| to_json(&response)),
        }
    }

    async fn handle_single(&self, message: Value) -> Option<JsonRpcResponse> {
        let id = message.get("id").cloned();
        match serde_json::from_value::<JsonRpcRequest>(message) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                &format!("Invalid request: {}", e),
            )),
        }
    }

    /// Handle a single JSON-RPC request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!("MCP request: {}", request.method);

        // notifications/initialized and friends
        if request.is_notification() {
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        JsonRpcResponse::success(id, to_json(&result))
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ToolsListResult {
            tools: definitions(&self.limits),
        };
        JsonRpcResponse::success(id, to_json(&result))
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        &format!("Invalid params: {}", e),
                    )
                }
            },
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        info!("Calling tool {}", params.name);
        let payload = self.run_tool(&params.name, params.arguments).await;
        JsonRpcResponse::success(id, to_json(&ToolCallResult::from_payload(payload)))
    }

    /// Run a tool against a client scoped to this call.
    pub async fn run_tool(&self, name: &str, args: Option<Value>) -> String {
        match &self.upstream {
            Upstream::Http(config) => match YoutubeClient::new(config) {
                Ok(client) => call_tool(&client, &self.limits, name, args).await,
                Err(e) => render_error(name, &e),
            },
            #[cfg(test)]
            Upstream::Fixed(api) => call_tool(api.as_ref(), &self.limits, name, args).await,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": { "code": INTERNAL_ERROR, "message": e.to_string() }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::testing::ScriptedApi;

    fn server(api: ScriptedApi) -> McpServer {
        McpServer::with_api(Arc::new(api), Limits::default())
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = server(ScriptedApi::new())
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["serverInfo"]["name"], "ytdata");
        assert_eq!(response["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(response["result"]["capabilities"]["tools"]["listChanged"], false);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let response = server(ScriptedApi::new())
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_null_id_gets_a_response() {
        let response = server(ScriptedApi::new())
            .handle_line(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#)
            .await
            .unwrap();
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["result"], json!({}));
    }

    #[tokio::test]
    async fn test_parse_error_and_unknown_method() {
        let server = server(ScriptedApi::new());

        let response = server.handle_line("{not json").await.unwrap();
        assert_eq!(response["error"]["code"], PARSE_ERROR);
        assert_eq!(response["id"], Value::Null);

        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":"a","method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);
        assert_eq!(response["id"], "a");
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = server(ScriptedApi::new())
            .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .unwrap();
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 9);
        assert!(tools[0]["inputSchema"].is_object());
    }

    #[tokio::test]
    async fn test_tools_call_success_and_error() {
        let api = ScriptedApi::new()
            .respond(
                "videos",
                json!({ "items": [{ "id": "dQw4w9WgXcQ", "snippet": { "title": "Song" } }] }),
            )
            .respond("videos", json!({ "items": [] }));
        let server = server(api);

        let call = |id: u64| {
            json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": "tools/call",
                "params": { "name": "get_video_details", "arguments": { "videoUrl": "dQw4w9WgXcQ" } }
            })
        };

        let response = server.handle_message(call(3)).await.unwrap();
        let result = &response["result"];
        assert!(result.get("isError").is_none());
        let text = result["content"][0]["text"].as_str().unwrap();
        let video: Value = serde_json::from_str(text).unwrap();
        assert_eq!(video["title"], "Song");

        let response = server.handle_message(call(4)).await.unwrap();
        assert_eq!(response["result"]["isError"], true);
        assert_eq!(
            response["result"]["content"][0]["text"],
            "ERROR: NotFoundError: Video not found: dQw4w9WgXcQ"
        );
    }

    #[tokio::test]
    async fn test_tools_call_without_params() {
        let response = server(ScriptedApi::new())
            .handle_line(r#"{"jsonrpc":"2.0","id":5,"method":"tools/call"}"#)
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_batch_skips_notifications() {
        let batch = json!([
            { "jsonrpc": "2.0", "id": 1, "method": "ping" },
            { "jsonrpc": "2.0", "method": "notifications/initialized" },
            { "jsonrpc": "2.0", "id": 2, "method": "ping" }
        ]);
        let response = server(ScriptedApi::new()).handle_message(batch).await.unwrap();
        let responses = response.as_array().unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[1]["id"], 2);

        let only_notifications = json!([{ "jsonrpc": "2.0", "method": "notifications/initialized" }]);
        assert!(server(ScriptedApi::new())
            .handle_message(only_notifications)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_invalid_request_keeps_id() {
        let response = server(ScriptedApi::new())
            .handle_message(json!({ "jsonrpc": "2.0", "id": 9 }))
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], INVALID_REQUEST);
        assert_eq!(response["id"], 9);
    }
}
