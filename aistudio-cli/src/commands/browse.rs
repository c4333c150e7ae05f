//! Browser agent command handler

use aistudio_client::{BrowserContent, OutputFormat};
use aistudio_core::dto::browser_agent::BrowserAgentRequest;
use anyhow::{Context, Result, bail};
use clap::Args;
use colored::*;
use std::path::PathBuf;

use super::{Studio, load_schema};
use crate::output::{print_header, print_json};

/// Browser agent arguments
#[derive(Args)]
pub struct BrowseArgs {
    /// Starting URL
    pub url: String,

    /// Instructions for the agent
    pub prompt: String,

    /// Output format (json, markdown, html or screenshot)
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,

    /// Extraction schema, inline JSON or a path to a JSON file; implies json output
    #[arg(long, conflicts_with = "schema_prompt")]
    pub schema: Option<String>,

    /// Generate the extraction schema from this prompt first; implies json output
    #[arg(long)]
    pub schema_prompt: Option<String>,

    /// Geolocation for the request
    #[arg(long)]
    pub geo: Option<String>,

    /// Write text content (or the base64 screenshot) to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the browse command
pub async fn handle_browse(args: BrowseArgs, studio: &Studio) -> Result<()> {
    let mut req = BrowserAgentRequest::new(args.url, args.prompt).with_output_format(args.format);

    if let Some(schema) = &args.schema {
        req = req.with_schema(load_schema(schema)?);
    } else if let Some(prompt) = args.schema_prompt.clone() {
        let schema = if studio.blocking {
            studio
                .run_blocking(move |client| client.generate_browser_agent_schema(&prompt))
                .await?
        } else {
            studio.client.generate_browser_agent_schema(&prompt).await?
        };
        let Some(schema) = schema else {
            bail!("The service could not generate a schema for this prompt");
        };
        req = req.with_schema(schema);
    }
    if let Some(geo) = args.geo {
        req = req.with_geo_location(geo);
    }

    let job = if studio.blocking {
        studio.run_blocking(move |client| client.run_browser_agent(req)).await?
    } else {
        studio.client.run_browser_agent(req).await?
    };

    print_header("Browser agent", &job.run_id, job.message.as_deref());

    let Some(data) = job.data else {
        println!("{}", "The agent returned no content.".yellow());
        return Ok(());
    };

    match (data.content, args.output) {
        (Some(BrowserContent::Text(text)), Some(path)) => {
            std::fs::write(&path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("  {} {} written to {}", "✓".green(), data.format, path.display());
            Ok(())
        }
        (Some(BrowserContent::Text(text)), None) => {
            println!("{}", text);
            Ok(())
        }
        (Some(BrowserContent::Structured(document)), _) => print_json(&document),
        (None, _) => {
            println!("{}", "The agent returned no content.".yellow());
            Ok(())
        }
    }
}
