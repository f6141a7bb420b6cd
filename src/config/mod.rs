//! Configuration module for ytdata.
//!
//! Handles loading application settings and resolving the API credential.

mod credentials;
mod settings;

pub use credentials::{ApiConfig, KeySource, API_KEY_ENV};
pub use settings::{GeneralSettings, Limits, ServerSettings, Settings, YoutubeSettings};
