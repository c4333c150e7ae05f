//! Search command handler

use aistudio_client::SearchResult;
use aistudio_core::dto::search::SearchRequest;
use anyhow::Result;
use clap::Args;
use colored::*;

use super::Studio;
use crate::output::{count_line, print_header, print_json};

/// Search arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Maximum number of results
    #[arg(short, long, default_value_t = 10)]
    pub limit: u32,

    /// Skip fetching page content for each result
    #[arg(long)]
    pub no_content: bool,

    /// Use the instant endpoint instead of polling
    #[arg(long)]
    pub instant: bool,

    /// Render JavaScript when fetching content
    #[arg(long)]
    pub render_js: bool,

    /// Geolocation for the request
    #[arg(long)]
    pub geo: Option<String>,

    /// Print the raw JSON results only
    #[arg(long)]
    pub json: bool,
}

/// Handle the search command
pub async fn handle_search(args: SearchArgs, studio: &Studio) -> Result<()> {
    let mut req = SearchRequest::new(args.query)
        .with_limit(args.limit)
        .with_content(!args.no_content)
        .with_javascript(args.render_js);
    if let Some(geo) = args.geo {
        req = req.with_geo_location(geo);
    }

    let job = match (studio.blocking, args.instant) {
        (true, true) => studio.run_blocking(move |client| client.search_instant(req)).await?,
        (true, false) => studio.run_blocking(move |client| client.search(req)).await?,
        (false, true) => studio.client.search_instant(req).await?,
        (false, false) => studio.client.search(req).await?,
    };

    if args.json {
        return print_json(&job.data);
    }

    print_header("Search", &job.run_id, job.message.as_deref());
    println!("{}", count_line(job.data.len(), "result"));
    println!();
    for hit in &job.data {
        print_hit(hit);
    }

    Ok(())
}

fn print_hit(hit: &SearchResult) {
    println!("  {} {}", "▸".cyan(), hit.title.bold());
    println!("    {}", hit.url.dimmed());
    if !hit.description.is_empty() {
        println!("    {}", hit.description);
    }
    if let Some(content) = &hit.content {
        println!("    {}", format!("{} chars of content", content.chars().count()).dimmed());
    }
    println!();
}
