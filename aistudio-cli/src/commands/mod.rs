//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod browse;
mod crawl;
mod map;
mod schema;
mod scrape;
mod search;

pub use browse::BrowseArgs;
pub use crawl::CrawlArgs;
pub use map::MapArgs;
pub use schema::SchemaArgs;
pub use scrape::ScrapeArgs;
pub use search::SearchArgs;

use std::path::Path;

use aistudio_client::{BlockingStudioClient, CancellationToken, StudioClient};
use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::Value;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Scrape a single page
    Scrape(ScrapeArgs),
    /// Crawl a site and extract matching pages
    Crawl(CrawlArgs),
    /// Discover URLs on a site
    Map(MapArgs),
    /// Search the web
    Search(SearchArgs),
    /// Drive a browser agent
    Browse(BrowseArgs),
    /// Generate an extraction schema from a prompt
    Schema(SchemaArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
/// * `cancel` - Token fired on Ctrl-C
pub async fn handle_command(
    command: Commands,
    config: &Config,
    cancel: CancellationToken,
) -> Result<()> {
    let studio = Studio {
        client: config.client(cancel)?,
        blocking: config.blocking,
    };

    match command {
        Commands::Scrape(args) => scrape::handle_scrape(args, &studio).await,
        Commands::Crawl(args) => crawl::handle_crawl(args, &studio).await,
        Commands::Map(args) => map::handle_map(args, &studio).await,
        Commands::Search(args) => search::handle_search(args, &studio).await,
        Commands::Browse(args) => browse::handle_browse(args, &studio).await,
        Commands::Schema(args) => schema::handle_schema(args, &studio).await,
    }
}

/// Client plus the execution mode picked on the command line
pub struct Studio {
    pub client: StudioClient,
    pub blocking: bool,
}

impl Studio {
    /// Run `call` through the blocking client on a worker thread
    ///
    /// Shares the async client's token, so Ctrl-C still cancels the job.
    pub async fn run_blocking<T, F>(&self, call: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&BlockingStudioClient) -> aistudio_client::Result<T> + Send + 'static,
    {
        let client = self.client.clone();
        let result = tokio::task::spawn_blocking(move || {
            let blocking = BlockingStudioClient::from_async(client)?;
            call(&blocking)
        })
        .await
        .context("Blocking worker panicked")?;

        Ok(result?)
    }
}

/// Parse a schema given inline as JSON or as a path to a JSON file
pub fn load_schema(arg: &str) -> Result<Value> {
    let trimmed = arg.trim_start();
    if trimmed.starts_with('{') {
        return serde_json::from_str(trimmed).context("Invalid inline schema JSON");
    }

    let path = Path::new(arg);
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid schema JSON in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_inline_schema() {
        let schema = load_schema(r#"{"type": "object"}"#).unwrap();
        assert_eq!(schema, json!({"type": "object"}));
    }

    #[test]
    fn test_load_schema_file() {
        let path =
            std::env::temp_dir().join(format!("aistudio-schema-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"type": "array"}"#).unwrap();

        let schema = load_schema(path.to_str().unwrap()).unwrap();
        assert_eq!(schema, json!({"type": "array"}));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_schema_errors() {
        assert!(load_schema("{not json").is_err());
        assert!(load_schema("/definitely/missing/schema.json").is_err());
    }
}
