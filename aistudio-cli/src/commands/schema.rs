//! Schema command handler

use aistudio_client::TaskKind;
use anyhow::{Result, bail};
use clap::Args;

use super::Studio;
use crate::output::print_schema;

/// Schema generation arguments
#[derive(Args)]
pub struct SchemaArgs {
    /// App to generate the schema for (scrape, crawl or browser-agent)
    pub task: TaskKind,

    /// Description of the fields to extract
    pub prompt: String,
}

/// Handle the schema command
pub async fn handle_schema(args: SchemaArgs, studio: &Studio) -> Result<()> {
    let SchemaArgs { task, prompt } = args;
    if matches!(task, TaskKind::Map | TaskKind::Search) {
        bail!("{} does not support schema generation", task);
    }

    let schema = if studio.blocking {
        studio
            .run_blocking(move |client| match task {
                TaskKind::Scrape => client.generate_scrape_schema(&prompt),
                TaskKind::Crawl => client.generate_crawl_schema(&prompt),
                _ => client.generate_browser_agent_schema(&prompt),
            })
            .await?
    } else {
        match task {
            TaskKind::Scrape => studio.client.generate_scrape_schema(&prompt).await?,
            TaskKind::Crawl => studio.client.generate_crawl_schema(&prompt).await?,
            _ => studio.client.generate_browser_agent_schema(&prompt).await?,
        }
    };

    print_schema(schema.as_ref())
}
