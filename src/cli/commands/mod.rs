//! CLI command implementations.

mod call;
mod config;
mod mcp;
mod serve;
mod tools;

pub use call::run_call;
pub use config::run_config;
pub use mcp::run_mcp;
pub use serve::run_serve;
pub use tools::run_tools;
