//! CLI module for ytdata.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// ytdata - YouTube Data API tools over MCP
///
/// Serves read-only YouTube tools (comments, channel uploads, search,
/// trending, playlists) to AI assistants via the Model Context Protocol.
#[derive(Parser, Debug)]
#[command(name = "ytdata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// YouTube Data API key (overrides YOUTUBE_API_KEY and the config file)
    #[arg(long = "yt-key", value_name = "KEY", global = true)]
    pub yt_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the streamable HTTP MCP server
    Serve {
        /// Host to bind to [default: server.host from config]
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to [default: server.port from config]
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },

    /// Start an MCP server on stdio for AI assistant integration
    Mcp,

    /// Run a single tool and print its result
    Call {
        /// Tool name (see `ytdata tools`)
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long)]
        args: Option<String>,
    },

    /// List available tools
    Tools,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
