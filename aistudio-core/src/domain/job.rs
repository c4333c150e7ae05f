//! Job domain types

use serde::{Deserialize, Serialize};

/// Opaque run identifier returned by a submission call
///
/// Used for every subsequent status and data request. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RunId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RunId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Job status as reported by the remote service
///
/// Transitions are driven by the service; the client only observes them.
/// Unrecognised status strings deserialize to [`JobStatus::Unknown`] and are
/// treated as still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    #[serde(alias = "pending", alias = "running")]
    Processing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Whether the service will not report any further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    pub fn is_pending(&self) -> bool {
        !self.is_terminal()
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "queued"),
            JobStatus::Processing => write!(f, "processing"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
            JobStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Result of a completed job
///
/// Only ever produced from a `completed` status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult<T> {
    pub run_id: RunId,
    pub message: Option<String>,
    pub data: T,
}

impl<T> JobResult<T> {
    /// Transforms the payload while keeping the run metadata
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> JobResult<U> {
        JobResult {
            run_id: self.run_id,
            message: self.message,
            data: f(self.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_deserialization() {
        let parse = |s: &str| serde_json::from_str::<JobStatus>(s).unwrap();

        assert_eq!(parse("\"queued\""), JobStatus::Queued);
        assert_eq!(parse("\"processing\""), JobStatus::Processing);
        assert_eq!(parse("\"pending\""), JobStatus::Processing);
        assert_eq!(parse("\"completed\""), JobStatus::Completed);
        assert_eq!(parse("\"failed\""), JobStatus::Failed);
        assert_eq!(parse("\"warming_up\""), JobStatus::Unknown);
    }

    #[test]
    fn test_status_terminal() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(JobStatus::Queued.is_pending());
        assert!(JobStatus::Processing.is_pending());
        assert!(JobStatus::Unknown.is_pending());
    }

    #[test]
    fn test_run_id_is_transparent() {
        let run_id: RunId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(run_id.as_str(), "abc123");
        assert_eq!(serde_json::to_string(&run_id).unwrap(), "\"abc123\"");
    }

    #[test]
    fn test_job_result_map() {
        let result = JobResult {
            run_id: RunId::new("r-1"),
            message: Some("done".to_string()),
            data: 2,
        };

        let mapped = result.map(|n| n * 10);
        assert_eq!(mapped.run_id.as_str(), "r-1");
        assert_eq!(mapped.message.as_deref(), Some("done"));
        assert_eq!(mapped.data, 20);
    }
}
