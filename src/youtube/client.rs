//! YouTube Data API client.

use crate::config::ApiConfig;
use crate::error::{Result, YtError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

use super::models::ListResponse;

/// Flat query parameters for a single API call.
pub type Params = BTreeMap<&'static str, String>;

/// Read-only access to the Data API.
///
/// Every upstream call in the crate goes through this trait.
#[async_trait]
pub trait YoutubeApi: Send + Sync {
    /// GET `endpoint` with `params` and return the decoded JSON document.
    async fn get(&self, endpoint: &str, params: &Params) -> Result<Value>;
}

/// Fetch one page of a list endpoint and decode it.
pub async fn list<T: DeserializeOwned>(
    api: &dyn YoutubeApi,
    endpoint: &str,
    params: &Params,
) -> Result<ListResponse<T>> {
    let value = api.get(endpoint, params).await?;
    Ok(serde_json::from_value(value)?)
}

/// HTTP implementation of [`YoutubeApi`].
pub struct YoutubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YoutubeClient {
    /// Create a client from the process-wide API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key().to_string(),
        })
    }
}

#[async_trait]
impl YoutubeApi for YoutubeClient {
    #[instrument(skip(self, params), fields(endpoint = %endpoint))]
    async fn get(&self, endpoint: &str, params: &Params) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut query = params.clone();
        query.insert("key", self.api_key.clone());

        debug!("Making YouTube API request to: {}", endpoint);
        let response = self.http.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("YouTube API request to {} failed with {}", endpoint, status);
            return Err(YtError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        debug!("API request successful - Status: {}", status);
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    async fn spawn_stub() -> String {
        let app = Router::new()
            .route(
                "/v3/videos",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    Json(json!({ "echo": q }))
                }),
            )
            .route(
                "/v3/commentThreads",
                get(|| async { (StatusCode::FORBIDDEN, "quotaExceeded") }),
            )
            .route("/v3/broken", get(|| async { "not json" }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v3", addr)
    }

    fn client(base_url: String) -> YoutubeClient {
        YoutubeClient::new(&ApiConfig::new("test-key", base_url, Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn test_key_is_injected_into_query() {
        let client = client(spawn_stub().await);

        let mut params = Params::new();
        params.insert("part", "snippet".to_string());
        params.insert("key", "caller-supplied".to_string());

        let body = client.get("videos", &params).await.unwrap();
        assert_eq!(body["echo"]["key"], "test-key");
        assert_eq!(body["echo"]["part"], "snippet");
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let client = client(spawn_stub().await);

        let err = client.get("commentThreads", &Params::new()).await.unwrap_err();
        match &err {
            YtError::Upstream { status, body } => {
                assert_eq!(*status, 403);
                assert_eq!(body, "quotaExceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.kind(), "UpstreamError");
    }

    #[tokio::test]
    async fn test_undecodable_body_is_upstream_error() {
        let client = client(spawn_stub().await);
        let err = client.get("broken", &Params::new()).await.unwrap_err();
        assert_eq!(err.kind(), "UpstreamError");
    }

    #[tokio::test]
    async fn test_connection_failure_is_upstream_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client(format!("http://{}/v3", addr));
        let err = client.get("videos", &Params::new()).await.unwrap_err();
        assert_eq!(err.kind(), "UpstreamError");
    }
}
