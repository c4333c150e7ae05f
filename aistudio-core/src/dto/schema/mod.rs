//! Schema generation DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Natural-language description of the data to extract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaRequest {
    pub user_prompt: String,
}

/// Extraction schema proposed by the service, if it could derive one
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaResponse {
    #[serde(default)]
    pub openapi_schema: Option<Value>,
}
