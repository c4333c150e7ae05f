//! Browser agent app
//!
//! Drives a remote browser through prompt instructions and returns the final
//! page as JSON, markdown, HTML or a screenshot.

use aistudio_core::domain::data::BrowserAgentData;
use aistudio_core::domain::job::JobResult;
use aistudio_core::domain::task::TaskKind;
use aistudio_core::dto::browser_agent::BrowserAgentRequest;
use serde_json::Value;
use tracing::info;

use crate::driver::TaskEndpoints;
use crate::error::Result;
use crate::{StudioClient, require_non_empty, require_schema};

pub(crate) const BROWSER_AGENT_ENDPOINTS: TaskEndpoints = TaskEndpoints {
    task: TaskKind::BrowserAgent,
    create: "/browser-agent/run",
    status: "/browser-agent/run/data",
    data: None,
    accepted_is_pending: true,
    schema: Some("/browser-agent/generate-params"),
};

pub type BrowserAgentJob = JobResult<Option<BrowserAgentData>>;

impl StudioClient {
    // =============================================================================
    // Browser Agent
    // =============================================================================

    /// Run a browser agent from `req.url` following `req.user_prompt`
    ///
    /// Every output format is accepted; `json` requires a schema.
    pub async fn run_browser_agent(&self, req: BrowserAgentRequest) -> Result<BrowserAgentJob> {
        let task = TaskKind::BrowserAgent;
        require_non_empty(task, "url", &req.url)?;
        require_schema(task, req.output_format, req.schema.as_ref())?;

        info!(url = %req.url, format = %req.output_format, "Starting browser agent");
        self.run_job(&BROWSER_AGENT_ENDPOINTS, &req, decode_agent_data).await
    }

    /// Generate an extraction schema for the browser agent from a prompt
    pub async fn generate_browser_agent_schema(&self, prompt: &str) -> Result<Option<Value>> {
        self.generate_schema(&BROWSER_AGENT_ENDPOINTS, prompt).await
    }
}

fn decode_agent_data(data: Option<Value>) -> serde_json::Result<Option<BrowserAgentData>> {
    match data {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some),
    }
}
