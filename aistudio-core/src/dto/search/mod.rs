//! Search DTOs

use serde::{Deserialize, Serialize};

use crate::domain::data::SearchResult;
use crate::domain::job::RunId;

/// Request to run a web search
///
/// Used for both the polled and the instant search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Maximum number of results
    pub limit: u32,
    #[serde(rename = "render_html")]
    pub render_javascript: bool,
    /// Fetch page content for every hit
    pub return_content: bool,
    pub geo_location: Option<String>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            limit: 10,
            render_javascript: false,
            return_content: true,
            geo_location: None,
        }
    }
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_content(mut self, return_content: bool) -> Self {
        self.return_content = return_content;
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

/// Synchronous response of the instant search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstantSearchResponse {
    pub run_id: RunId,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<SearchResult>>,
}
