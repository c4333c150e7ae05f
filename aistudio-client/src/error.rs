//! Error types for the AI Studio client

use aistudio_core::domain::job::RunId;
use aistudio_core::domain::task::TaskKind;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Longest response body kept in an error, in characters
const BODY_EXCERPT_LEN: usize = 512;

/// Errors that can occur when using the AI Studio client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Caller input rejected before any network call
    #[error("Invalid {task} request: {message}")]
    Validation { task: TaskKind, message: String },

    /// Submission call returned a non-success status
    #[error("Failed to submit {task} job (status {status}): {body}")]
    Submission {
        task: TaskKind,
        status: u16,
        body: String,
    },

    /// Status or data call returned a non-pending, non-success status
    #[error("Failed to fetch {task} run {run_id} (status {status}): {body}")]
    Fetch {
        task: TaskKind,
        run_id: RunId,
        status: u16,
        body: String,
    },

    /// The service reported the job as failed
    #[error("{task} run {run_id} failed: {}", .message.as_deref().unwrap_or("no details provided"))]
    JobFailed {
        task: TaskKind,
        run_id: RunId,
        message: Option<String>,
    },

    /// Attempt budget exhausted while the job was still pending
    #[error("{task} run {run_id} timed out after {attempts} poll attempts")]
    Timeout {
        task: TaskKind,
        run_id: RunId,
        attempts: u32,
    },

    /// Prompt-to-schema call returned a non-success status
    #[error("Failed to generate {task} schema (status {status}): {body}")]
    SchemaGeneration {
        task: TaskKind,
        status: u16,
        body: String,
    },

    /// Caller cancelled the job through its cancellation token
    #[error(
        "{task} job cancelled{}",
        .run_id.as_ref().map(|id| format!(" (run {})", id)).unwrap_or_default()
    )]
    Cancelled {
        task: TaskKind,
        run_id: Option<RunId>,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error(
        "Failed to parse {task} response{}: {message}{}",
        .run_id.as_ref().map(|id| format!(" for run {}", id)).unwrap_or_default(),
        .body.as_deref().map(|body| format!(" (body: {})", body)).unwrap_or_default()
    )]
    ParseError {
        task: TaskKind,
        run_id: Option<RunId>,
        message: String,
        /// Excerpt of the undecodable response, when there was one
        body: Option<String>,
    },

    /// Request body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Blocking client could not start its runtime
    #[error("Failed to start blocking runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl ClientError {
    pub fn validation(task: TaskKind, message: impl Into<String>) -> Self {
        Self::Validation {
            task,
            message: message.into(),
        }
    }

    pub fn submission(task: TaskKind, status: u16, body: &str) -> Self {
        Self::Submission {
            task,
            status,
            body: excerpt(body),
        }
    }

    pub fn fetch(task: TaskKind, run_id: RunId, status: u16, body: &str) -> Self {
        Self::Fetch {
            task,
            run_id,
            status,
            body: excerpt(body),
        }
    }

    pub fn schema_generation(task: TaskKind, status: u16, body: &str) -> Self {
        Self::SchemaGeneration {
            task,
            status,
            body: excerpt(body),
        }
    }

    /// Response with a success status whose body could not be decoded
    pub fn parse(
        task: TaskKind,
        run_id: Option<&RunId>,
        message: impl std::fmt::Display,
        body: &str,
    ) -> Self {
        Self::ParseError {
            task,
            run_id: run_id.cloned(),
            message: message.to_string(),
            body: Some(excerpt(body)),
        }
    }

    /// Completed payload that does not fit the task's result type
    pub fn decode(task: TaskKind, run_id: &RunId, message: impl std::fmt::Display) -> Self {
        Self::ParseError {
            task,
            run_id: Some(run_id.clone()),
            message: message.to_string(),
            body: None,
        }
    }

    /// Task the error belongs to, when known
    pub fn task(&self) -> Option<TaskKind> {
        match self {
            Self::Validation { task, .. }
            | Self::Submission { task, .. }
            | Self::Fetch { task, .. }
            | Self::JobFailed { task, .. }
            | Self::Timeout { task, .. }
            | Self::SchemaGeneration { task, .. }
            | Self::Cancelled { task, .. }
            | Self::ParseError { task, .. } => Some(*task),
            _ => None,
        }
    }

    /// Run identifier the error belongs to, when the job was submitted
    pub fn run_id(&self) -> Option<&RunId> {
        match self {
            Self::Fetch { run_id, .. }
            | Self::JobFailed { run_id, .. }
            | Self::Timeout { run_id, .. } => Some(run_id),
            Self::Cancelled { run_id, .. } | Self::ParseError { run_id, .. } => run_id.as_ref(),
            _ => None,
        }
    }

    /// HTTP status code carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Submission { status, .. }
            | Self::Fetch { status, .. }
            | Self::SchemaGeneration { status, .. } => Some(*status),
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(status) if (400..500).contains(&status))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }
}

fn excerpt(body: &str) -> String {
    if body.chars().count() <= BODY_EXCERPT_LEN {
        return body.to_string();
    }
    let mut cut: String = body.chars().take(BODY_EXCERPT_LEN).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context() {
        let err = ClientError::fetch(TaskKind::Crawl, RunId::new("r-9"), 502, "bad gateway");
        assert_eq!(err.task(), Some(TaskKind::Crawl));
        assert_eq!(err.run_id().map(RunId::as_str), Some("r-9"));
        assert_eq!(err.status(), Some(502));
        assert!(err.is_server_error());
        assert!(!err.is_client_error());
        assert_eq!(
            err.to_string(),
            "Failed to fetch crawl run r-9 (status 502): bad gateway"
        );
    }

    #[test]
    fn test_job_failed_message() {
        let err = ClientError::JobFailed {
            task: TaskKind::Scrape,
            run_id: RunId::new("r-1"),
            message: None,
        };
        assert_eq!(err.to_string(), "scrape run r-1 failed: no details provided");
    }

    #[test]
    fn test_cancelled_message() {
        let before_submit = ClientError::Cancelled {
            task: TaskKind::Map,
            run_id: None,
        };
        assert_eq!(before_submit.to_string(), "map job cancelled");

        let during_poll = ClientError::Cancelled {
            task: TaskKind::Map,
            run_id: Some(RunId::new("m-2")),
        };
        assert_eq!(during_poll.to_string(), "map job cancelled (run m-2)");
        assert!(during_poll.is_cancelled());
    }

    #[test]
    fn test_parse_error_context() {
        let err = ClientError::parse(
            TaskKind::Search,
            Some(&RunId::new("abc123")),
            "expected value at line 1 column 1",
            "<html>bad gateway</html>",
        );
        assert_eq!(err.run_id().map(RunId::as_str), Some("abc123"));
        assert_eq!(
            err.to_string(),
            "Failed to parse search response for run abc123: \
             expected value at line 1 column 1 (body: <html>bad gateway</html>)"
        );

        let submit = ClientError::parse(TaskKind::Map, None, "missing field `run_id`", "{}");
        assert!(submit.run_id().is_none());
        assert_eq!(
            submit.to_string(),
            "Failed to parse map response: missing field `run_id` (body: {})"
        );
    }

    #[test]
    fn test_decode_error_has_no_body() {
        let err = ClientError::decode(TaskKind::Crawl, &RunId::new("c-1"), "invalid type");
        assert_eq!(err.run_id().map(RunId::as_str), Some("c-1"));
        assert_eq!(err.to_string(), "Failed to parse crawl response for run c-1: invalid type");
    }

    #[test]
    fn test_body_excerpt_is_bounded() {
        let body = "x".repeat(BODY_EXCERPT_LEN * 2);
        let err = ClientError::submission(TaskKind::Search, 400, &body);
        match err {
            ClientError::Submission { body, .. } => {
                assert_eq!(body.chars().count(), BODY_EXCERPT_LEN + 1);
                assert!(body.ends_with('…'));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
