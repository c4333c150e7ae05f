//! Extracted data payloads
//!
//! Typed shapes for the `data` field of completed jobs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::format::OutputFormat;

/// Data extracted by a scrape, crawl or map job
///
/// The service returns a structured document for `json` output, free text for
/// `markdown`, and lists of records, pages or URLs for multi-page tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractedData {
    Document(Map<String, Value>),
    Records(Vec<Map<String, Value>>),
    Pages(Vec<String>),
    Text(String),
    Other(Value),
}

impl ExtractedData {
    /// Empty structured document, used when a completed job carries no data
    pub fn empty() -> Self {
        ExtractedData::Document(Map::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ExtractedData::Document(map) => map.is_empty(),
            ExtractedData::Records(records) => records.is_empty(),
            ExtractedData::Pages(pages) => pages.is_empty(),
            ExtractedData::Text(text) => text.is_empty(),
            ExtractedData::Other(value) => value.is_null(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ExtractedData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Map<String, Value>> {
        match self {
            ExtractedData::Document(map) => Some(map),
            _ => None,
        }
    }

    /// Number of top-level items (records, pages) in the payload
    pub fn len(&self) -> usize {
        match self {
            ExtractedData::Records(records) => records.len(),
            ExtractedData::Pages(pages) => pages.len(),
            ExtractedData::Document(_) | ExtractedData::Text(_) => usize::from(!self.is_empty()),
            ExtractedData::Other(Value::Array(items)) => items.len(),
            ExtractedData::Other(value) => usize::from(!value.is_null()),
        }
    }
}

impl Default for ExtractedData {
    fn default() -> Self {
        Self::empty()
    }
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub description: String,
    /// Page content, present only when content was requested and retrieved
    #[serde(default)]
    pub content: Option<String>,
}

/// Output of a browser-agent run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserAgentData {
    #[serde(rename = "type")]
    pub format: OutputFormat,
    #[serde(default)]
    pub content: Option<BrowserContent>,
}

/// Browser-agent content: a structured document for `json`, otherwise text
/// (markdown, HTML, or a base64-encoded screenshot)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BrowserContent {
    Structured(Map<String, Value>),
    Text(String),
}
