//! Error types for ytdata.

use thiserror::Error;

/// Library-level error type for ytdata operations.
#[derive(Error, Debug)]
pub enum YtError {
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl YtError {
    /// Category name used when rendering the error at the call boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            YtError::Config(_) | YtError::Io(_) | YtError::TomlParse(_) => "ConfigurationError",
            YtError::InvalidInput(_) => "ParseError",
            YtError::NotFound(_) => "NotFoundError",
            YtError::Upstream { .. } | YtError::Http(_) | YtError::Json(_) => "UpstreamError",
        }
    }
}

/// Result type alias for ytdata operations.
pub type Result<T> = std::result::Result<T, YtError>;
