//! AI Studio HTTP Client
//!
//! A type-safe client for the AI Studio web-extraction API.
//!
//! Each app (scrape, crawl, map, search, browser agent) submits a job, polls
//! until the service reports a terminal state and returns the decoded result.
//! All apps share one job driver, so timeouts, failures and cancellation
//! behave the same everywhere.
//!
//! # Example
//!
//! ```no_run
//! use aistudio_client::StudioClient;
//! use aistudio_core::dto::search::SearchRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = StudioClient::from_env()?;
//!
//!     let job = client.search(SearchRequest::new("weather today")).await?;
//!     for hit in &job.data {
//!         println!("{} - {}", hit.title, hit.url);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! A blocking variant with the same methods is available as
//! [`BlockingStudioClient`].

pub mod blocking;
mod browser_agent;
pub mod config;
mod crawl;
mod driver;
pub mod error;
mod map;
mod scrape;
mod search;
pub mod transport;

#[cfg(test)]
mod mock;

// Re-export commonly used types
pub use aistudio_core::domain::data::{
    BrowserAgentData, BrowserContent, ExtractedData, SearchResult,
};
pub use aistudio_core::domain::format::OutputFormat;
pub use aistudio_core::domain::job::{JobResult, JobStatus, RunId};
pub use aistudio_core::domain::task::TaskKind;
pub use blocking::BlockingStudioClient;
pub use browser_agent::BrowserAgentJob;
pub use config::{ClientConfig, PollPolicy};
pub use crawl::CrawlJob;
pub use error::{ClientError, Result};
pub use map::MapJob;
pub use scrape::ScrapeJob;
pub use search::SearchJob;
pub use tokio_util::sync::CancellationToken;

use std::sync::Arc;

use aistudio_core::dto::schema::{SchemaRequest, SchemaResponse};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::driver::{JobDriver, TaskEndpoints};
use crate::transport::{HttpTransport, Transport};

/// Client for the AI Studio API
///
/// Cheap to clone: clones share the connection pool. Every clone carries a
/// cancellation token; cancelling it aborts all jobs started through clients
/// holding that token.
#[derive(Clone)]
pub struct StudioClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for StudioClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudioClient")
            .field("base_url", &self.config.base_url)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl StudioClient {
    /// Create a client for the default endpoint
    ///
    /// # Example
    /// ```
    /// use aistudio_client::StudioClient;
    ///
    /// let client = StudioClient::new("my-api-key").unwrap();
    /// assert_eq!(client.base_url(), "https://api-aistudio.oxylabs.io");
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(api_key))
    }

    /// Create a client from `OXYLABS_AI_STUDIO_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Create a client from an explicit configuration
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Self::with_client(config, http_client)
    }

    /// Create a client with a custom HTTP client
    ///
    /// This allows you to configure proxies, TLS settings, etc. The
    /// configuration's request timeout is not applied to `client`.
    pub fn with_client(config: ClientConfig, client: Client) -> Result<Self> {
        let transport = HttpTransport::new(config.base_url.clone(), config.api_key.clone(), client);
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over an arbitrary [`Transport`]
    ///
    /// Fails on an invalid configuration, including a zero poll interval.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config: Arc::new(config),
            transport,
            cancel: CancellationToken::new(),
        })
    }

    /// Returns a clone bound to `token`
    ///
    /// Jobs started through the returned client abort with
    /// [`ClientError::Cancelled`] once `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
            cancel: token,
        }
    }

    /// Token that cancels jobs started through this client
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =============================================================================
    // Shared Plumbing
    // =============================================================================

    /// Serialize `payload` and drive one job to completion
    async fn run_job<P, T, D>(
        &self,
        endpoints: &TaskEndpoints,
        payload: &P,
        decode: D,
    ) -> Result<JobResult<T>>
    where
        P: Serialize + ?Sized,
        D: FnOnce(Option<Value>) -> serde_json::Result<T>,
    {
        let body = serde_json::to_value(payload)?;
        let policy = self.config.poll_policy(endpoints.task);

        JobDriver::new(self.transport.as_ref(), endpoints, policy, &self.cancel)
            .submit_and_await(&body, decode)
            .await
    }

    /// Ask the service to propose an extraction schema for `prompt`
    ///
    /// Returns `None` when the service could not derive a schema.
    async fn generate_schema(
        &self,
        endpoints: &TaskEndpoints,
        prompt: &str,
    ) -> Result<Option<Value>> {
        let task = endpoints.task;
        let Some(path) = endpoints.schema else {
            return Err(ClientError::validation(task, "schema generation is not supported"));
        };

        info!(task = %task, "Generating schema");

        let body = serde_json::to_value(SchemaRequest {
            user_prompt: prompt.to_string(),
        })?;
        let response = self.transport.post(path, &body).await?;

        if !response.is_success() {
            return Err(ClientError::schema_generation(task, response.status, &response.body));
        }

        let schema: SchemaResponse = response
            .json()
            .map_err(|e| ClientError::parse(task, None, e, &response.body))?;
        Ok(schema.openapi_schema)
    }
}

/// Rejects structured output without a schema, before any network call
fn require_schema(task: TaskKind, format: OutputFormat, schema: Option<&Value>) -> Result<()> {
    if format.is_structured() && schema.is_none() {
        return Err(ClientError::validation(
            task,
            "openapi_schema is required when output_format is json",
        ));
    }
    Ok(())
}

/// Rejects formats the task cannot produce
fn require_format(task: TaskKind, format: OutputFormat, allowed: &[OutputFormat]) -> Result<()> {
    if !allowed.contains(&format) {
        return Err(ClientError::validation(
            task,
            format!("output_format {} is not supported", format),
        ));
    }
    Ok(())
}

fn require_non_empty(task: TaskKind, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::validation(task, format!("{} is required", field)));
    }
    Ok(())
}

/// Decodes extracted data; a missing or null payload becomes an empty document
fn decode_extracted(data: Option<Value>) -> serde_json::Result<ExtractedData> {
    match data {
        None | Some(Value::Null) => Ok(ExtractedData::empty()),
        Some(value) => serde_json::from_value(value),
    }
}
