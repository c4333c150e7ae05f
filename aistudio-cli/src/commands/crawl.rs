//! Crawl command handler

use aistudio_client::OutputFormat;
use aistudio_core::dto::crawl::CrawlRequest;
use anyhow::{Result, bail};
use clap::Args;
use serde_json::Value;

use super::{Studio, load_schema};
use crate::output::{print_header, print_json};

/// Crawl arguments
#[derive(Args)]
pub struct CrawlArgs {
    /// Starting URL
    pub url: String,

    /// What to look for on the site
    pub prompt: String,

    /// Output format (json or markdown)
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,

    /// Extraction schema, inline JSON or a path to a JSON file; implies json output
    #[arg(long, conflicts_with = "schema_prompt")]
    pub schema: Option<String>,

    /// Generate the extraction schema from this prompt first; implies json output
    #[arg(long)]
    pub schema_prompt: Option<String>,

    /// Maximum number of pages to return
    #[arg(short, long, default_value_t = 25)]
    pub limit: u32,

    /// Render JavaScript before extracting
    #[arg(long)]
    pub render_js: bool,

    /// Geolocation for the request
    #[arg(long)]
    pub geo: Option<String>,
}

/// Handle the crawl command
pub async fn handle_crawl(args: CrawlArgs, studio: &Studio) -> Result<()> {
    let schema = resolve_schema(&args, studio).await?;

    let mut req = CrawlRequest::new(args.url, args.prompt)
        .with_output_format(args.format)
        .with_sources_limit(args.limit)
        .with_javascript(args.render_js);
    if let Some(schema) = schema {
        req = req.with_schema(schema);
    }
    if let Some(geo) = args.geo {
        req = req.with_geo_location(geo);
    }

    let job = if studio.blocking {
        studio.run_blocking(move |client| client.crawl(req)).await?
    } else {
        studio.client.crawl(req).await?
    };

    print_header("Crawl", &job.run_id, job.message.as_deref());
    match &job.data {
        Some(data) => print_json(data),
        None => {
            println!("No pages matched.");
            Ok(())
        }
    }
}

async fn resolve_schema(args: &CrawlArgs, studio: &Studio) -> Result<Option<Value>> {
    if let Some(schema) = &args.schema {
        return load_schema(schema).map(Some);
    }
    let Some(prompt) = args.schema_prompt.clone() else {
        return Ok(None);
    };

    let schema = if studio.blocking {
        studio
            .run_blocking(move |client| client.generate_crawl_schema(&prompt))
            .await?
    } else {
        studio.client.generate_crawl_schema(&prompt).await?
    };

    match schema {
        Some(schema) => Ok(Some(schema)),
        None => bail!("The service could not generate a schema for this prompt"),
    }
}
