//! Configuration module
//!
//! Handles CLI configuration: credentials, endpoint and execution mode.

use std::time::Duration;

use aistudio_client::{CancellationToken, ClientConfig, StudioClient};
use anyhow::{Context, Result};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API key sent with every request
    pub api_key: String,

    /// API base URL
    pub base_url: String,

    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,

    /// Route jobs through the blocking client
    pub blocking: bool,
}

impl Config {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs))
    }

    /// Build a client whose jobs stop when `cancel` fires
    pub fn client(&self, cancel: CancellationToken) -> Result<StudioClient> {
        let client = StudioClient::from_config(self.client_config())
            .context("Failed to create AI Studio client")?;
        Ok(client.with_cancellation(cancel))
    }
}
