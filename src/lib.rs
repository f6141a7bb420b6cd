//! ytdata - YouTube Data API tools for AI assistants
//!
//! Exposes nine read-only YouTube tools over the Model Context Protocol:
//! comments, channel uploads, video search, trending videos, video details,
//! trending playlists, playlist artists, playlist details and playlist search.
//!
//! # Architecture
//!
//! - `config` - Settings file and API key resolution
//! - `youtube` - Identifier parsing, the upstream client and record shapes
//! - `aggregate` - Paginated fetch sequences, one per tool
//! - `mcp` - JSON-RPC protocol, tool catalog and transports
//! - `cli` - Command-line surface
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use ytdata::aggregate::fetch_comments;
//! use ytdata::config::ApiConfig;
//! use ytdata::youtube::YoutubeClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ApiConfig::new(
//!         "my-key",
//!         "https://www.googleapis.com/youtube/v3",
//!         Duration::from_secs(30),
//!     );
//!     let client = YoutubeClient::new(&config)?;
//!
//!     let comments = fetch_comments(&client, "https://youtu.be/dQw4w9WgXcQ", "time", 50).await?;
//!     println!("Fetched {} comments", comments.total_returned);
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod youtube;

pub use error::{Result, YtError};
