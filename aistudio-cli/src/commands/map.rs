//! Map command handler

use aistudio_core::dto::map::MapRequest;
use anyhow::Result;
use clap::Args;

use super::Studio;
use crate::output::{count_line, print_header, print_json};

/// Map arguments
#[derive(Args)]
pub struct MapArgs {
    /// Starting URL
    pub url: String,

    /// Which URLs to look for
    pub prompt: String,

    /// Maximum number of URLs to return
    #[arg(short, long, default_value_t = 25)]
    pub limit: u32,

    /// Maximum link depth
    #[arg(long, default_value_t = 3)]
    pub max_depth: u32,

    /// Seed discovery from the sitemap (true or false); service default when omitted
    #[arg(long)]
    pub sitemap: Option<bool>,

    /// Only return paths matching this regular expression; repeatable
    #[arg(long = "include-path")]
    pub include_paths: Vec<String>,

    /// Render JavaScript while discovering
    #[arg(long)]
    pub render_js: bool,

    /// Geolocation for the request
    #[arg(long)]
    pub geo: Option<String>,
}

impl MapArgs {
    fn request(self) -> MapRequest {
        let mut req = MapRequest::new(self.url, self.prompt)
            .with_sources_limit(self.limit)
            .with_max_depth(self.max_depth)
            .with_javascript(self.render_js);
        if let Some(sitemap) = self.sitemap {
            req = req.with_sitemap(sitemap);
        }
        for path in self.include_paths {
            req = req.with_include_path(path);
        }
        if let Some(geo) = self.geo {
            req = req.with_geo_location(geo);
        }
        req
    }
}

/// Handle the map command
pub async fn handle_map(args: MapArgs, studio: &Studio) -> Result<()> {
    let req = args.request();

    let job = if studio.blocking {
        studio.run_blocking(move |client| client.map(req)).await?
    } else {
        studio.client.map(req).await?
    };

    print_header("Map", &job.run_id, job.message.as_deref());
    println!("{}", count_line(job.data.len(), "URL"));
    print_json(&job.data)
}
