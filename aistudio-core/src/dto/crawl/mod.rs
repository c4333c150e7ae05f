//! Crawl DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::format::OutputFormat;

/// Request to crawl a site, guided by a prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlRequest {
    /// Starting URL; the service crawls within its domain
    pub url: String,
    pub user_prompt: String,
    pub output_format: OutputFormat,
    pub schema: Option<Value>,
    pub render_javascript: bool,
    /// Maximum number of pages to return
    pub return_sources_limit: u32,
    pub geo_location: Option<String>,
}

impl Default for CrawlRequest {
    fn default() -> Self {
        Self {
            url: String::new(),
            user_prompt: String::new(),
            output_format: OutputFormat::Markdown,
            schema: None,
            render_javascript: false,
            return_sources_limit: 25,
            geo_location: None,
        }
    }
}

impl CrawlRequest {
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

    pub fn with_javascript(mut self, render: bool) -> Self {
        self.render_javascript = render;
        self
    }

    pub fn with_sources_limit(mut self, limit: u32) -> Self {
        self.return_sources_limit = limit;
        self
    }

    pub fn with_geo_location(mut self, geo_location: impl Into<String>) -> Self {
        self.geo_location = Some(geo_location.into());
        self
    }

    /// Wire body for the submission call
    pub fn body(&self) -> CrawlBody<'_> {
        CrawlBody {
            domain: &self.url,
            user_prompt: &self.user_prompt,
            output_format: self.output_format,
            openapi_schema: self.schema.as_ref(),
            auxiliary_prompt: &self.user_prompt,
            render_html: self.render_javascript,
            return_sources_limit: self.return_sources_limit,
            geo_location: self.geo_location.as_deref(),
        }
    }
}

/// Crawl submission body
///
/// The service reads the prompt from both `user_prompt` and `auxiliary_prompt`.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlBody<'a> {
    pub domain: &'a str,
    pub user_prompt: &'a str,
    pub output_format: OutputFormat,
    pub openapi_schema: Option<&'a Value>,
    pub auxiliary_prompt: &'a str,
    pub render_html: bool,
    pub return_sources_limit: u32,
    pub geo_location: Option<&'a str>,
}
