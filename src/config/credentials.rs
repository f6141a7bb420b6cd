//! API credential resolution.
//!
//! The key is resolved once at startup and carried in an immutable
//! [`ApiConfig`] that every upstream client is built from.

use super::YoutubeSettings;
use crate::error::{Result, YtError};
use std::fmt;
use std::time::Duration;
use tracing::info;

/// Environment variable holding the YouTube Data API key.
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Where the API key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    CommandLine,
    Environment,
    ConfigFile,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::CommandLine => write!(f, "--yt-key flag"),
            KeySource::Environment => write!(f, "{} environment variable", API_KEY_ENV),
            KeySource::ConfigFile => write!(f, "config file"),
        }
    }
}

/// Everything an upstream client needs, fixed for the life of the process.
#[derive(Clone)]
pub struct ApiConfig {
    api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub source: KeySource,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("source", &self.source)
            .finish()
    }
}

impl ApiConfig {
    /// Build a config directly from a key (mainly for tests and embedding).
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout,
            source: KeySource::CommandLine,
        }
    }

    /// Resolve the key: command-line flag, then environment, then config file.
    ///
    /// Empty values are treated as absent.
    pub fn resolve(
        cli_key: Option<&str>,
        env_key: Option<&str>,
        settings: &YoutubeSettings,
    ) -> Result<Self> {
        let candidates = [
            (cli_key, KeySource::CommandLine),
            (env_key, KeySource::Environment),
            (settings.api_key.as_deref(), KeySource::ConfigFile),
        ];

        let (key, source) = candidates
            .into_iter()
            .find_map(|(key, source)| {
                key.map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(|k| (k.to_string(), source))
            })
            .ok_or_else(|| {
                YtError::Config(format!(
                    "YouTube API key is required. Provide via '--yt-key <KEY>' or set {} env var.",
                    API_KEY_ENV
                ))
            })?;

        info!("Using YouTube API key from {}", source);

        Ok(Self {
            api_key: key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(settings.timeout_secs),
            source,
        })
    }

    /// The raw API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_wins_over_env_and_file() {
        let settings = YoutubeSettings {
            api_key: Some("file".into()),
            ..Default::default()
        };
        let config = ApiConfig::resolve(Some("cli"), Some("env"), &settings).unwrap();
        assert_eq!(config.api_key(), "cli");
        assert_eq!(config.source, KeySource::CommandLine);
    }

    #[test]
    fn test_env_used_when_flag_absent() {
        let config = ApiConfig::resolve(None, Some("env"), &YoutubeSettings::default()).unwrap();
        assert_eq!(config.api_key(), "env");
        assert_eq!(config.source, KeySource::Environment);
    }

    #[test]
    fn test_file_is_last_resort() {
        let settings = YoutubeSettings {
            api_key: Some("file".into()),
            ..Default::default()
        };
        let config = ApiConfig::resolve(Some("  "), None, &settings).unwrap();
        assert_eq!(config.api_key(), "file");
        assert_eq!(config.source, KeySource::ConfigFile);
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let err = ApiConfig::resolve(None, Some(""), &YoutubeSettings::default()).unwrap_err();
        assert_eq!(err.kind(), "ConfigurationError");
        assert!(err.to_string().contains("--yt-key"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ApiConfig::new("secret-key", "http://localhost", Duration::from_secs(1));
        assert!(!format!("{:?}", config).contains("secret-key"));
    }

    #[test]
    fn test_timeout_and_base_url_from_settings() {
        let settings = YoutubeSettings {
            base_url: "http://127.0.0.1:9/v3/".into(),
            timeout_secs: 7,
            ..Default::default()
        };
        let config = ApiConfig::resolve(Some("k"), None, &settings).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9/v3");
        assert_eq!(config.timeout, Duration::from_secs(7));
    }
}
