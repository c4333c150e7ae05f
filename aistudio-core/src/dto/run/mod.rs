//! Run lifecycle DTOs
//!
//! Envelopes shared by every task: the submission acknowledgement, the status
//! report returned while polling, and the payload returned by data endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::job::{JobStatus, RunId};

/// Response to a successful submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunCreated {
    pub run_id: RunId,
}

/// Response from a status endpoint
///
/// Tasks that return results inline also carry `data` once `completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatusResponse {
    pub status: JobStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Response from a dedicated data endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunDataResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Query string attached to every status and data request
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunQuery<'a> {
    pub run_id: &'a str,
}
