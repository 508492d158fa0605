//! Single-shot JSON GETs against a game server's status endpoints.

use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;
use std::time::Duration;

pub const CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[async_trait]
pub trait StatusFetcher: Send + Sync {
    /// GET `candidate` + `path` and parse the body as JSON. No retries.
    async fn fetch_json(&self, candidate: &str, path: &str) -> Result<Value, FetchError>;
}

pub struct HttpStatusFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpStatusFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), timeout)
    }

    /// Reuse an existing client (connection pool) with a per-request timeout.
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl StatusFetcher for HttpStatusFetcher {
    async fn fetch_json(&self, candidate: &str, path: &str) -> Result<Value, FetchError> {
        let url = format!("{}{}", candidate, path);
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| FetchError::Network(describe(&e)))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(describe(&e)))?;
        parse_body(&url, &bytes)
    }
}

/// Decode as UTF-8 (invalid sequences replaced) and parse as JSON.
pub fn parse_body(url: &str, bytes: &[u8]) -> Result<Value, FetchError> {
    let text = String::from_utf8_lossy(bytes);
    serde_json::from_str(&text).map_err(|e| FetchError::Parse {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        match e.url() {
            Some(url) => format!("timed out requesting {}", url),
            None => "request timed out".to_string(),
        }
    } else {
        e.to_string()
    }
}
