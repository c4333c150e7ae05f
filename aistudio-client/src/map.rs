//! Map app
//!
//! URL discovery. Polled like scrape: status on `/map/run`, payload on
//! `/map/run/data`. The default budget is ten attempts.

use aistudio_core::domain::data::ExtractedData;
use aistudio_core::domain::job::JobResult;
use aistudio_core::domain::task::TaskKind;
use aistudio_core::dto::map::MapRequest;
use tracing::info;

use crate::driver::TaskEndpoints;
use crate::error::Result;
use crate::{StudioClient, decode_extracted, require_non_empty};

pub(crate) const MAP_ENDPOINTS: TaskEndpoints = TaskEndpoints {
    task: TaskKind::Map,
    create: "/map",
    status: "/map/run",
    data: Some("/map/run/data"),
    accepted_is_pending: false,
    schema: None,
};

/// Completed map: usually a list of discovered URLs
pub type MapJob = JobResult<ExtractedData>;

impl StudioClient {
    // =============================================================================
    // Map
    // =============================================================================

    /// Discover URLs on a site that match the prompt
    ///
    /// # Example
    /// ```no_run
    /// # use aistudio_client::StudioClient;
    /// # use aistudio_core::dto::map::MapRequest;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = StudioClient::from_env()?;
    /// let job = client
    ///     .map(
    ///         MapRequest::new("https://example.com", "find product pages")
    ///             .with_sources_limit(10)
    ///             .with_sitemap(false)
    ///             .with_include_path(".*/?products/.*"),
    ///     )
    ///     .await?;
    /// println!("{:?}", job.data);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn map(&self, req: MapRequest) -> Result<MapJob> {
        require_non_empty(TaskKind::Map, "url", &req.url)?;

        info!(url = %req.url, depth = req.max_depth, "Starting map");
        self.run_job(&MAP_ENDPOINTS, &req, decode_extracted).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Call, ScriptedTransport, scripted_client};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_map_urls() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .created("m-1")
                .get_reply(200, json!({"status": "completed"}))
                .get_reply(
                    200,
                    json!({
                        "data": [
                            "https://example.com/products/a",
                            "https://example.com/products/b"
                        ]
                    }),
                ),
        );
        let client = scripted_client(&transport);

        let req = MapRequest::new("https://example.com", "find product pages")
            .with_include_path(".*/?products/.*");
        let job = client.map(req).await.unwrap();

        assert!(matches!(job.data, ExtractedData::Pages(_)));
        assert_eq!(job.data.len(), 2);
        match &transport.calls()[0] {
            Call::Post { path, body } => {
                assert_eq!(path, "/map");
                assert_eq!(body["include_paths"], json!([".*/?products/.*"]));
                assert_eq!(body["max_depth"], json!(3));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_map_times_out_after_ten_attempts() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .created("m-2")
                .get_fallback(200, json!({"status": "processing"})),
        );
        let client = scripted_client(&transport);

        let err = client
            .map(MapRequest::new("https://example.com", "anything"))
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(transport.gets_to("/map/run"), 10);
        assert_eq!(transport.gets_to("/map/run/data"), 0);
    }

    #[tokio::test]
    async fn test_map_requires_url() {
        let transport = Arc::new(ScriptedTransport::new());
        let client = scripted_client(&transport);

        let err = client.map(MapRequest::new("", "anything")).await.unwrap_err();
        assert!(err.is_validation());
        assert!(transport.calls().is_empty());
    }
}
