//! Browser agent DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::format::OutputFormat;

/// Request to drive a browser agent from a starting URL
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowserAgentRequest {
    pub url: String,
    /// Instructions for the agent
    #[serde(rename = "auxiliary_prompt")]
    pub user_prompt: String,
    pub output_format: OutputFormat,
    #[serde(rename = "openapi_schema")]
    pub schema: Option<Value>,
    pub geo_location: Option<String>,
}

impl BrowserAgentRequest {
    pub fn new(url: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user_prompt: user_prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.output_format = OutputFormat::Json;
        self.schema = Some(schema);
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_geo_location(mut self, geo_location: impl Into<String>) -> Self {
        self.geo_location = Some(geo_location.into());
        self
    }
}
