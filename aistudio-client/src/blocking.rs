//! Blocking client
//!
//! Wraps [`StudioClient`] with a private current-thread runtime so scripts
//! and synchronous code can call the API without an async context. Both
//! clients run the same job driver, so timeouts and errors are identical.
//!
//! Do not call these methods from inside an async runtime: `block_on` panics
//! when nested in another runtime's worker. Use
//! `tokio::task::spawn_blocking` there, or the async client directly.

use aistudio_core::dto::browser_agent::BrowserAgentRequest;
use aistudio_core::dto::crawl::CrawlRequest;
use aistudio_core::dto::map::MapRequest;
use aistudio_core::dto::scrape::ScrapeRequest;
use aistudio_core::dto::search::SearchRequest;
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::{BrowserAgentJob, CrawlJob, MapJob, ScrapeJob, SearchJob, StudioClient};

/// Synchronous counterpart of [`StudioClient`]
///
/// # Example
/// ```no_run
/// use aistudio_client::BlockingStudioClient;
/// use aistudio_core::dto::scrape::ScrapeRequest;
///
/// let client = BlockingStudioClient::new("my-api-key")?;
/// let job = client.scrape(ScrapeRequest::new("https://example.com"))?;
/// println!("{:?}", job.data.as_text());
/// # Ok::<(), aistudio_client::ClientError>(())
/// ```
#[derive(Debug)]
pub struct BlockingStudioClient {
    inner: StudioClient,
    runtime: Runtime,
}

impl BlockingStudioClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_async(StudioClient::new(api_key)?)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_async(StudioClient::from_env()?)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Self::from_async(StudioClient::from_config(config)?)
    }

    /// Wrap an existing async client; the two share connections and token
    pub fn from_async(inner: StudioClient) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientError::Runtime)?;

        Ok(Self { inner, runtime })
    }

    /// Bind jobs to `token`; cancelling it from another thread aborts them
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.inner = self.inner.with_cancellation(token);
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.inner.cancellation_token()
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    /// The async client this wrapper drives
    pub fn as_async(&self) -> &StudioClient {
        &self.inner
    }

    pub fn scrape(&self, req: ScrapeRequest) -> Result<ScrapeJob> {
        self.runtime.block_on(self.inner.scrape(req))
    }

    pub fn generate_scrape_schema(&self, prompt: &str) -> Result<Option<Value>> {
        self.runtime.block_on(self.inner.generate_scrape_schema(prompt))
    }

    pub fn crawl(&self, req: CrawlRequest) -> Result<CrawlJob> {
        self.runtime.block_on(self.inner.crawl(req))
    }

    pub fn generate_crawl_schema(&self, prompt: &str) -> Result<Option<Value>> {
        self.runtime.block_on(self.inner.generate_crawl_schema(prompt))
    }

    pub fn map(&self, req: MapRequest) -> Result<MapJob> {
        self.runtime.block_on(self.inner.map(req))
    }

    pub fn search(&self, req: SearchRequest) -> Result<SearchJob> {
        self.runtime.block_on(self.inner.search(req))
    }

    pub fn search_instant(&self, req: SearchRequest) -> Result<SearchJob> {
        self.runtime.block_on(self.inner.search_instant(req))
    }

    pub fn run_browser_agent(&self, req: BrowserAgentRequest) -> Result<BrowserAgentJob> {
        self.runtime.block_on(self.inner.run_browser_agent(req))
    }

    pub fn generate_browser_agent_schema(&self, prompt: &str) -> Result<Option<Value>> {
        self.runtime
            .block_on(self.inner.generate_browser_agent_schema(prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PollPolicy;
    use crate::mock::{ScriptedTransport, scripted_client};
    use crate::transport::Transport;
    use aistudio_core::domain::format::OutputFormat;
    use aistudio_core::domain::task::TaskKind;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_blocking_client_requires_api_key() {
        let err = BlockingStudioClient::new("").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_blocking_search() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .created("abc123")
                .get_reply(200, json!({"status": "processing"}))
                .get_reply(
                    200,
                    json!({
                        "status": "completed",
                        "data": [{"url": "https://a.example", "title": "A", "description": "a"}]
                    }),
                ),
        );
        let config = ClientConfig::new("test-key").with_poll_policy(
            TaskKind::Search,
            PollPolicy::new(Duration::from_millis(100), Duration::from_millis(5)),
        );
        let dyn_transport: Arc<dyn Transport> = transport.clone();
        let inner = StudioClient::with_transport(config, dyn_transport).unwrap();
        let client = BlockingStudioClient::from_async(inner).unwrap();

        let job = client.search(SearchRequest::new("weather today")).unwrap();
        assert_eq!(job.run_id.as_str(), "abc123");
        assert_eq!(job.data.len(), 1);
        assert_eq!(transport.get_count(), 2);
    }

    #[test]
    fn test_blocking_validation_makes_no_calls() {
        let transport = Arc::new(ScriptedTransport::new());
        let client = BlockingStudioClient::from_async(scripted_client(&transport)).unwrap();

        let req =
            CrawlRequest::new("https://example.com", "x").with_output_format(OutputFormat::Json);
        let err = client.crawl(req).unwrap_err();
        assert!(err.is_validation());
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_blocking_cancellation() {
        let transport = Arc::new(ScriptedTransport::new());
        let token = CancellationToken::new();
        let client = BlockingStudioClient::from_async(scripted_client(&transport))
            .unwrap()
            .with_cancellation(token.clone());

        token.cancel();
        let err = client
            .map(MapRequest::new("https://example.com", "products"))
            .unwrap_err();
        assert!(err.is_cancelled());
        assert!(transport.calls().is_empty());
    }
}
