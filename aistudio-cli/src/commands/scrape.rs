//! Scrape command handler

use aistudio_client::OutputFormat;
use aistudio_core::dto::scrape::ScrapeRequest;
use anyhow::{Result, bail};
use clap::Args;
use serde_json::Value;

use super::{Studio, load_schema};
use crate::output::print_job;

/// Scrape arguments
#[derive(Args)]
pub struct ScrapeArgs {
    /// Page URL
    pub url: String,

    /// Output format (json or markdown)
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,

    /// Extraction schema, inline JSON or a path to a JSON file; implies json output
    #[arg(long, conflicts_with = "schema_prompt")]
    pub schema: Option<String>,

    /// Generate the extraction schema from this prompt first; implies json output
    #[arg(long)]
    pub schema_prompt: Option<String>,

    /// Render JavaScript before extracting
    #[arg(long)]
    pub render_js: bool,

    /// Geolocation for the request, e.g. "US" or "Germany"
    #[arg(long)]
    pub geo: Option<String>,
}

/// Handle the scrape command
pub async fn handle_scrape(args: ScrapeArgs, studio: &Studio) -> Result<()> {
    let schema = resolve_schema(&args, studio).await?;

    let mut req = ScrapeRequest::new(args.url)
        .with_output_format(args.format)
        .with_javascript(args.render_js);
    if let Some(schema) = schema {
        req = req.with_schema(schema);
    }
    if let Some(geo) = args.geo {
        req = req.with_geo_location(geo);
    }

    let job = if studio.blocking {
        studio.run_blocking(move |client| client.scrape(req)).await?
    } else {
        studio.client.scrape(req).await?
    };

    print_job("Scrape", &job)
}

async fn resolve_schema(args: &ScrapeArgs, studio: &Studio) -> Result<Option<Value>> {
    if let Some(schema) = &args.schema {
        return load_schema(schema).map(Some);
    }
    let Some(prompt) = args.schema_prompt.clone() else {
        return Ok(None);
    };

    let schema = if studio.blocking {
        studio
            .run_blocking(move |client| client.generate_scrape_schema(&prompt))
            .await?
    } else {
        studio.client.generate_scrape_schema(&prompt).await?
    };

    match schema {
        Some(schema) => Ok(Some(schema)),
        None => bail!("The service could not generate a schema for this prompt"),
    }
}
