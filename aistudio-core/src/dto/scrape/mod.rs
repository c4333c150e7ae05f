//! Scrape DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::format::OutputFormat;

/// Request to scrape a single page
///
/// Serializes directly to the wire body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
    pub output_format: OutputFormat,
    /// Extraction schema; required when `output_format` is `Json`
    #[serde(rename = "openapi_schema")]
    pub schema: Option<Value>,
    #[serde(rename = "render_html")]
    pub render_javascript: bool,
    pub geo_location: Option<String>,
}

impl ScrapeRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Switches to structured output with the given extraction schema
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

    pub fn with_geo_location(mut self, geo_location: impl Into<String>) -> Self {
        self.geo_location = Some(geo_location.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scrape_body() {
        let req = ScrapeRequest::new("https://example.com")
            .with_schema(json!({"type": "object"}))
            .with_javascript(true);

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            json!({
                "url": "https://example.com",
                "output_format": "json",
                "openapi_schema": {"type": "object"},
                "render_html": true,
                "geo_location": null
            })
        );
    }
}
