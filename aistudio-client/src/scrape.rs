//! Scrape app
//!
//! Single-page extraction. Status and data live on separate endpoints: the
//! driver polls `/scrape/run` and fetches `/scrape/run/data` once completed.

use aistudio_core::domain::data::ExtractedData;
use aistudio_core::domain::format::OutputFormat;
use aistudio_core::domain::job::JobResult;
use aistudio_core::domain::task::TaskKind;
use aistudio_core::dto::scrape::ScrapeRequest;
use serde_json::Value;
use tracing::info;

use crate::driver::TaskEndpoints;
use crate::error::Result;
use crate::{StudioClient, decode_extracted, require_format, require_non_empty, require_schema};

pub(crate) const SCRAPE_ENDPOINTS: TaskEndpoints = TaskEndpoints {
    task: TaskKind::Scrape,
    create: "/scrape",
    status: "/scrape/run",
    data: Some("/scrape/run/data"),
    accepted_is_pending: false,
    schema: Some("/scrape/schema"),
};

const SCRAPE_FORMATS: [OutputFormat; 2] = [OutputFormat::Json, OutputFormat::Markdown];

/// Completed scrape: a structured document for `json`, markdown text otherwise
pub type ScrapeJob = JobResult<ExtractedData>;

impl StudioClient {
    // =============================================================================
    // Scrape
    // =============================================================================

    /// Scrape a single page
    ///
    /// # Arguments
    /// * `req` - The scrape request; `json` output requires a schema
    ///
    /// # Returns
    /// The completed job with the extracted data
    ///
    /// # Example
    /// ```no_run
    /// # use aistudio_client::StudioClient;
    /// # use aistudio_core::dto::scrape::ScrapeRequest;
    /// # use serde_json::json;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = StudioClient::from_env()?;
    /// let job = client
    ///     .scrape(ScrapeRequest::new("https://example.com/product").with_schema(json!({
    ///         "type": "object",
    ///         "properties": {"price": {"type": "number"}}
    ///     })))
    ///     .await?;
    /// println!("{:?}", job.data);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scrape(&self, req: ScrapeRequest) -> Result<ScrapeJob> {
        let task = TaskKind::Scrape;
        require_non_empty(task, "url", &req.url)?;
        require_format(task, req.output_format, &SCRAPE_FORMATS)?;
        require_schema(task, req.output_format, req.schema.as_ref())?;

        info!(url = %req.url, format = %req.output_format, "Starting scrape");
        self.run_job(&SCRAPE_ENDPOINTS, &req, decode_extracted).await
    }

    /// Generate an extraction schema for scraping from a natural-language prompt
    pub async fn generate_scrape_schema(&self, prompt: &str) -> Result<Option<Value>> {
        self.generate_schema(&SCRAPE_ENDPOINTS, prompt).await
    }
}
