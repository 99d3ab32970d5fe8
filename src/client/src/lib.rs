//! Search API Adapter Layer
//!
//! Thin blocking HTTP binding for the retrieval service's `/search`,
//! `/health` and `/manual_scrape` endpoints.

use config::ClientConfig;
use error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Body of `POST /search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub text: String,
    pub top_k: i64,
    pub threshold: f64,
}

/// One scored hit returned by `/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub content: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeAck {
    pub message: String,
}

/// Anything that can answer a search request.
pub trait SearchBackend: Send + Sync {
    fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>>;
}

pub struct SearchClient {
    config: ClientConfig,
    http: reqwest::blocking::Client,
}

impl SearchClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SearchError::config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// `GET /health`
    pub fn health(&self) -> Result<HealthStatus> {
        let resp = self
            .http
            .get(self.url("health"))
            .send()
            .map_err(request_error)?;
        read_json(resp)
    }

    /// `POST /manual_scrape`
    pub fn trigger_scrape(&self) -> Result<ScrapeAck> {
        let resp = self
            .http
            .post(self.url("manual_scrape"))
            .send()
            .map_err(request_error)?;
        read_json(resp)
    }
}

impl SearchBackend for SearchClient {
    fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        let url = self.url("search");
        tracing::debug!(
            url = %url,
            user_id = %self.config.user_id,
            top_k = request.top_k,
            threshold = request.threshold,
            "dispatching search"
        );

        let resp = self
            .http
            .post(&url)
            .query(&[("user_id", self.config.user_id.as_str())])
            .json(request)
            .send()
            .map_err(request_error)?;

        let results: Vec<SearchResult> = read_json(resp)?;
        tracing::debug!(count = results.len(), "search returned");
        Ok(results)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(resp: reqwest::blocking::Response) -> Result<T> {
    let status = resp.status();

    if status.as_u16() == 429 {
        return Err(SearchError::RateLimited);
    }
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(SearchError::http(status.as_u16(), body));
    }

    let text = resp.text().map_err(request_error)?;

    serde_json::from_str(&text)
        .map_err(|e| SearchError::parse(format!("unexpected response body: {}; body={}", e, text)))
}

/// Flattens the reqwest error chain so the root cause (e.g. "Connection
/// refused") is part of the rendered message.
fn request_error(err: reqwest::Error) -> SearchError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    if err.is_timeout() {
        message.push_str(" (timed out)");
    }
    SearchError::request(message)
}
