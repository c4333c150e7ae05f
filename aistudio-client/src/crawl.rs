//! Crawl app
//!
//! Prompt-guided multi-page extraction. Results come back inline on the data
//! endpoint, which answers 202 until the run is ready.

use aistudio_core::domain::data::ExtractedData;
use aistudio_core::domain::format::OutputFormat;
use aistudio_core::domain::job::JobResult;
use aistudio_core::domain::task::TaskKind;
use aistudio_core::dto::crawl::CrawlRequest;
use serde_json::Value;
use tracing::info;

use crate::driver::TaskEndpoints;
use crate::error::Result;
use crate::{StudioClient, require_format, require_non_empty, require_schema};

pub(crate) const CRAWL_ENDPOINTS: TaskEndpoints = TaskEndpoints {
    task: TaskKind::Crawl,
    create: "/extract/run",
    status: "/extract/run/data",
    data: None,
    accepted_is_pending: true,
    schema: Some("/extract/generate-params"),
};

const CRAWL_FORMATS: [OutputFormat; 2] = [OutputFormat::Json, OutputFormat::Markdown];

/// Completed crawl: one record per page for `json`, page markdown otherwise
pub type CrawlJob = JobResult<Option<ExtractedData>>;

impl StudioClient {
    // =============================================================================
    // Crawl
    // =============================================================================

    /// Crawl a site and extract content from the pages matching the prompt
    ///
    /// # Arguments
    /// * `req` - The crawl request; `json` output requires a schema
    ///
    /// # Returns
    /// The completed job; `data` is `None` when the service returned no pages
    pub async fn crawl(&self, req: CrawlRequest) -> Result<CrawlJob> {
        let task = TaskKind::Crawl;
        require_non_empty(task, "url", &req.url)?;
        require_format(task, req.output_format, &CRAWL_FORMATS)?;
        require_schema(task, req.output_format, req.schema.as_ref())?;

        info!(url = %req.url, limit = req.return_sources_limit, "Starting crawl");
        self.run_job(&CRAWL_ENDPOINTS, &req.body(), decode_pages).await
    }

    /// Generate an extraction schema for crawling from a natural-language prompt
    pub async fn generate_crawl_schema(&self, prompt: &str) -> Result<Option<Value>> {
        self.generate_schema(&CRAWL_ENDPOINTS, prompt).await
    }
}

fn decode_pages(data: Option<Value>) -> serde_json::Result<Option<ExtractedData>> {
    match data {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some),
    }
}
