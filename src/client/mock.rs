//! In-memory client for unit tests

use super::Client;
use crate::error::TransportError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned payloads and records every requested URI.
#[derive(Default)]
pub(crate) struct MockClient {
    responses: Mutex<HashMap<String, Vec<u8>>>,
    requests: Mutex<Vec<String>>,
}

impl MockClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(self, uri: &str, body: impl Into<Vec<u8>>) -> Self {
        self.set(uri, body);
        self
    }

    /// Replace the payload served for `uri`
    pub(crate) fn set(&self, uri: &str, body: impl Into<Vec<u8>>) {
        self.responses
            .lock()
            .unwrap()
            .insert(uri.to_string(), body.into());
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Client for MockClient {
    async fn get(&self, uri: &str) -> Result<Vec<u8>, TransportError> {
        self.requests.lock().unwrap().push(uri.to_string());
        self.responses
            .lock()
            .unwrap()
            .get(uri)
            .cloned()
            .ok_or(TransportError::Status { status: 404 })
    }
}
