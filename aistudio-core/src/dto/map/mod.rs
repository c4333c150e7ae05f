//! Map DTOs

use serde::{Deserialize, Serialize};

/// Request to discover URLs on a site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapRequest {
    pub url: String,
    pub user_prompt: String,
    pub return_sources_limit: u32,
    /// Link depth to follow from the starting URL
    pub max_depth: u32,
    pub geo_location: Option<String>,
    #[serde(rename = "render_html")]
    pub render_javascript: bool,
    /// Also seed discovery from the site's sitemap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_sitemap: Option<bool>,
    /// Regular expressions; only matching paths are returned
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_paths: Vec<String>,
}

impl Default for MapRequest {
    fn default() -> Self {
        Self {
            url: String::new(),
            user_prompt: String::new(),
            return_sources_limit: 25,
            max_depth: 3,
            geo_location: None,
            render_javascript: false,
            include_sitemap: None,
            include_paths: Vec::new(),
        }
    }
}

impl MapRequest {
    pub fn new(url: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user_prompt: user_prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_sources_limit(mut self, limit: u32) -> Self {
        self.return_sources_limit = limit;
        self
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_sitemap(mut self, include: bool) -> Self {
        self.include_sitemap = Some(include);
        self
    }

    pub fn with_include_path(mut self, pattern: impl Into<String>) -> Self {
        self.include_paths.push(pattern.into());
        self
    }

    pub fn with_geo_location(mut self, geo_location: impl Into<String>) -> Self {
        self.geo_location = Some(geo_location.into());
        self
    }

    pub fn with_javascript(mut self, render: bool) -> Self {
        self.render_javascript = render;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_body_defaults() {
        let req = MapRequest::new("https://example.com", "products");
        let body = serde_json::to_value(req).unwrap();
        assert_eq!(
            body,
            json!({
                "url": "https://example.com",
                "user_prompt": "products",
                "return_sources_limit": 25,
                "max_depth": 3,
                "geo_location": null,
                "render_html": false
            })
        );
    }

    #[test]
    fn test_map_body_with_filters() {
        let req = MapRequest::new("https://example.com", "find product pages")
            .with_sources_limit(10)
            .with_sitemap(false)
            .with_include_path(".*/?products/.*");

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["include_sitemap"], json!(false));
        assert_eq!(body["include_paths"], json!([".*/?products/.*"]));
        assert_eq!(body["return_sources_limit"], json!(10));
    }
}
