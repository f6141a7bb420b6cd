//! MCP (Model Context Protocol) server.
//!
//! JSON-RPC 2.0 over two transports: newline-delimited stdio and
//! streamable HTTP.

pub mod http;
pub mod protocol;
pub mod server;
pub mod tools;

pub use http::router;
pub use server::McpServer;
pub use tools::{call_tool, definitions};
