//! Client configuration
//!
//! Defines the connection settings for the AI Studio API and the poll policy
//! each task uses while waiting for a job to finish.

use std::collections::HashMap;
use std::time::Duration;

use aistudio_core::domain::task::TaskKind;

use crate::error::{ClientError, Result};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OXYLABS_AI_STUDIO_API_KEY";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "OXYLABS_AI_STUDIO_API_URL";

/// Environment variable overriding the per-request HTTP timeout, in seconds
pub const REQUEST_TIMEOUT_ENV: &str = "OXYLABS_AI_STUDIO_TIMEOUT";

pub const DEFAULT_BASE_URL: &str = "https://api-aistudio.oxylabs.io";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Total wait budget and fixed interval for one task's poll loop
///
/// The loop makes at most `timeout / interval` status requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub timeout: Duration,
    pub interval: Duration,
}

impl PollPolicy {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    /// Built-in policy for a task
    pub fn default_for(task: TaskKind) -> Self {
        match task {
            TaskKind::Scrape => Self::new(Duration::from_secs(180), Duration::from_secs(3)),
            TaskKind::Crawl => Self::new(Duration::from_secs(600), Duration::from_secs(3)),
            TaskKind::Map => Self::new(Duration::from_secs(30), Duration::from_secs(3)),
            TaskKind::Search => Self::new(Duration::from_secs(180), Duration::from_secs(2)),
            TaskKind::BrowserAgent => {
                Self::new(Duration::from_secs(600), Duration::from_secs(3))
            }
        }
    }

    /// Number of status requests the loop may make; always at least one
    pub fn max_attempts(&self) -> u32 {
        let interval = self.interval.as_millis().max(1);
        let attempts = self.timeout.as_millis() / interval;
        attempts.clamp(1, u32::MAX as u128) as u32
    }
}

/// Client configuration
///
/// Credentials and endpoint are usually taken from the environment; poll
/// policies default per task and can be tuned individually.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent in the `x-api-key` header
    pub api_key: String,

    /// API base URL (e.g., "https://api-aistudio.oxylabs.io")
    pub base_url: String,

    /// Timeout applied to each individual HTTP request
    pub request_timeout: Duration,

    /// Poll policy overrides keyed by task
    pub poll_policies: HashMap<TaskKind, PollPolicy>,
}

impl ClientConfig {
    /// Creates a new configuration with defaults
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll_policies: HashMap::new(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - OXYLABS_AI_STUDIO_API_KEY (required)
    /// - OXYLABS_AI_STUDIO_API_URL (optional, default: https://api-aistudio.oxylabs.io)
    /// - OXYLABS_AI_STUDIO_TIMEOUT (optional, seconds, default: 30)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            ClientError::Config(format!("{} environment variable not set", API_KEY_ENV))
        })?;

        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let request_timeout = std::env::var(REQUEST_TIMEOUT_ENV)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Ok(Self {
            api_key,
            base_url,
            request_timeout,
            poll_policies: HashMap::new(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Overrides the poll policy for one task
    pub fn with_poll_policy(mut self, task: TaskKind, policy: PollPolicy) -> Self {
        self.poll_policies.insert(task, policy);
        self
    }

    /// Effective poll policy for a task
    pub fn poll_policy(&self, task: TaskKind) -> PollPolicy {
        self.poll_policies
            .get(&task)
            .copied()
            .unwrap_or_else(|| PollPolicy::default_for(task))
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ClientError::Config("API key is required".to_string()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::Config(
                "base_url must start with http:// or https://".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(ClientError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        for (task, policy) in &self.poll_policies {
            if policy.interval.is_zero() {
                return Err(ClientError::Config(format!(
                    "poll interval for {} must be greater than 0",
                    task
                )));
            }
            if policy.timeout < policy.interval {
                return Err(ClientError::Config(format!(
                    "poll timeout for {} must be at least one interval",
                    task
                )));
            }
        }

        Ok(())
    }
}
