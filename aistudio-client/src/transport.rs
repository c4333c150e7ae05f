//! HTTP transport
//!
//! The job driver talks to the service through the [`Transport`] trait so the
//! poll protocol does not depend on a particular HTTP stack. [`HttpTransport`]
//! is the reqwest-backed implementation used by default.

use aistudio_core::domain::job::RunId;
use aistudio_core::dto::run::RunQuery;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// User agent sent with every request
pub const SDK_USER_AGENT: &str = concat!("aistudio-rust-sdk/", env!("CARGO_PKG_VERSION"));

/// Status code and body of a completed HTTP exchange
///
/// Status interpretation is left to the caller: a 202 means "not ready" for
/// some tasks and is an error for others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Only 200 counts as success; 202 is reported separately
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    pub fn is_accepted(&self) -> bool {
        self.status == 202
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

/// Minimal request surface the job driver needs
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body to `path`
    async fn post(&self, path: &str, body: &Value) -> Result<RawResponse>;

    /// GET `path` with `?run_id=<run_id>`
    async fn get(&self, path: &str, run_id: &RunId) -> Result<RawResponse>;
}

/// reqwest-backed transport
///
/// Authentication and content headers are attached per request, so a
/// caller-supplied `reqwest::Client` does not need default headers.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    api_key: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, path: &str, body: &Value) -> Result<RawResponse> {
        let response = self
            .client
            .post(self.url(path))
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, SDK_USER_AGENT)
            .json(body)
            .send()
            .await?;

        Self::read(response).await
    }

    async fn get(&self, path: &str, run_id: &RunId) -> Result<RawResponse> {
        let response = self
            .client
            .get(self.url(path))
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, SDK_USER_AGENT)
            .query(&RunQuery {
                run_id: run_id.as_str(),
            })
            .send()
            .await?;

        Self::read(response).await
    }
}
