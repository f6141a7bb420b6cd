//! Scripted in-memory API for tests.

use super::client::{Params, YoutubeApi};
use crate::error::{Result, YtError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays canned responses in order and records every request.
#[derive(Default)]
pub struct ScriptedApi {
    responses: Mutex<VecDeque<(String, Result<Value>)>>,
    calls: Mutex<Vec<(String, Params)>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response for the next call, which must hit `endpoint`.
    pub fn respond(self, endpoint: &str, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back((endpoint.to_string(), Ok(body)));
        self
    }

    /// Queue an HTTP failure for the next call.
    pub fn fail(self, endpoint: &str, status: u16) -> Self {
        self.responses.lock().unwrap().push_back((
            endpoint.to_string(),
            Err(YtError::Upstream {
                status,
                body: "forbidden".to_string(),
            }),
        ));
        self
    }

    /// Every request made so far.
    pub fn calls(&self) -> Vec<(String, Params)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests made to `endpoint`.
    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, _)| e == endpoint)
            .count()
    }

    /// Number of queued responses not yet consumed.
    pub fn pending(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl YoutubeApi for ScriptedApi {
    async fn get(&self, endpoint: &str, params: &Params) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), params.clone()));

        let (expected, response) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request to {endpoint}"));
        assert_eq!(expected, endpoint, "request hit the wrong endpoint");
        response
    }
}
