//! Streamable HTTP transport.
//!
//! `POST {path}` carries one JSON-RPC message or a batch and is answered
//! with plain `application/json`. Server-initiated streams are not offered,
//! so `GET {path}` is refused.

use super::protocol::{JsonRpcResponse, PARSE_ERROR};
use super::server::McpServer;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, warn};
use uuid::Uuid;

pub const SESSION_HEADER: &str = "mcp-session-id";

/// Build the router serving the MCP endpoint at `path`.
pub fn router(server: McpServer, path: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([header::HeaderName::from_static(SESSION_HEADER)]);

    Router::new()
        .route("/health", get(health))
        .route(path, post(handle_post).get(not_allowed).delete(not_allowed))
        .layer(cors)
        .with_state(server)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        "Method Not Allowed",
    )
}

fn is_initialize(message: &Value) -> bool {
    let is_init = |m: &Value| m.get("method").and_then(Value::as_str) == Some("initialize");
    match message {
        Value::Array(batch) => batch.iter().any(is_init),
        message => is_init(message),
    }
}

async fn handle_post(
    State(server): State<McpServer>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let message: Value = match serde_json::from_str(&body) {
        Ok(message) => message,
        Err(e) => {
            warn!("Failed to parse request body: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error")),
            )
                .into_response();
        }
    };

    if let Some(session) = headers.get(SESSION_HEADER) {
        debug!("Request for session {:?}", session);
    }

    let initialize = is_initialize(&message);
    match server.handle_message(message).await {
        None => StatusCode::ACCEPTED.into_response(),
        Some(response) if initialize => {
            let session_id = Uuid::new_v4().to_string();
            debug!("New MCP session {}", session_id);
            ([(SESSION_HEADER, session_id)], Json(response)).into_response()
        }
        Some(response) => Json(response).into_response(),
    }
}
