//! Search app
//!
//! Web search with optional page content. The polled variant reads results
//! inline from `/search/run/data`; the instant variant answers synchronously.

use aistudio_core::domain::data::SearchResult;
use aistudio_core::domain::job::JobResult;
use aistudio_core::domain::task::TaskKind;
use aistudio_core::dto::search::{InstantSearchResponse, SearchRequest};
use serde_json::Value;
use tracing::info;

use crate::driver::TaskEndpoints;
use crate::error::{ClientError, Result};
use crate::{StudioClient, require_non_empty};

pub(crate) const SEARCH_ENDPOINTS: TaskEndpoints = TaskEndpoints {
    task: TaskKind::Search,
    create: "/search/run",
    status: "/search/run/data",
    data: None,
    accepted_is_pending: true,
    schema: None,
};

const INSTANT_SEARCH_PATH: &str = "/search/instant";

/// Completed search: hits in the order the service ranked them
pub type SearchJob = JobResult<Vec<SearchResult>>;

impl StudioClient {
    // =============================================================================
    // Search
    // =============================================================================

    /// Run a web search and wait for the results
    ///
    /// `content` is only filled for hits when `return_content` is set and the
    /// page could be retrieved.
    pub async fn search(&self, req: SearchRequest) -> Result<SearchJob> {
        require_non_empty(TaskKind::Search, "query", &req.query)?;

        info!(query = %req.query, limit = req.limit, "Starting search");
        self.run_job(&SEARCH_ENDPOINTS, &req, decode_results).await
    }

    /// Run a web search without polling
    ///
    /// The instant endpoint returns results in the submission response, so
    /// only one request is made.
    pub async fn search_instant(&self, req: SearchRequest) -> Result<SearchJob> {
        let task = TaskKind::Search;
        require_non_empty(task, "query", &req.query)?;

        info!(query = %req.query, limit = req.limit, "Starting instant search");

        let body = serde_json::to_value(&req)?;
        let response = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                return Err(ClientError::Cancelled { task, run_id: None });
            }
            response = self.transport.post(INSTANT_SEARCH_PATH, &body) => response?,
        };

        if !response.is_success() {
            return Err(ClientError::submission(task, response.status, &response.body));
        }

        let instant: InstantSearchResponse = response
            .json()
            .map_err(|e| ClientError::parse(task, None, e, &response.body))?;
        info!(run_id = %instant.run_id, "Instant search completed");

        Ok(JobResult {
            run_id: instant.run_id,
            message: instant.message,
            data: instant.data.unwrap_or_default(),
        })
    }
}

fn decode_results(data: Option<Value>) -> serde_json::Result<Vec<SearchResult>> {
    match data {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Call, ScriptedTransport, scripted_client};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_search_weather_today() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .created("abc123")
                .get_reply(202, Value::Null)
                .get_reply(
                    200,
                    json!({
                        "status": "completed",
                        "data": [{
                            "url": "https://weather.example",
                            "title": "Weather",
                            "description": "Sunny",
                            "content": null
                        }]
                    }),
                ),
        );
        let client = scripted_client(&transport);

        let job = client
            .search(SearchRequest::new("weather today").with_limit(10))
            .await
            .unwrap();

        assert_eq!(job.run_id.as_str(), "abc123");
        assert_eq!(job.data.len(), 1);
        assert_eq!(job.data[0].title, "Weather");
        assert!(job.data[0].content.is_none());
        assert_eq!(transport.get_count(), 2);

        let calls = transport.calls();
        assert_eq!(
            calls[1],
            Call::Get {
                path: "/search/run/data".to_string(),
                run_id: "abc123".to_string(),
            }
        );
        match &calls[0] {
            Call::Post { path, body } => {
                assert_eq!(path, "/search/run");
                assert_eq!(body["query"], json!("weather today"));
                assert_eq!(body["limit"], json!(10));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_without_results() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .created("s-0")
                .get_reply(200, json!({"status": "completed", "data": null})),
        );
        let client = scripted_client(&transport);

        let job = client.search(SearchRequest::new("nothing")).await.unwrap();
        assert!(job.data.is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected() {
        let transport = Arc::new(ScriptedTransport::new());
        let client = scripted_client(&transport);

        assert!(client.search(SearchRequest::new("  ")).await.unwrap_err().is_validation());
        assert!(
            client
                .search_instant(SearchRequest::new(""))
                .await
                .unwrap_err()
                .is_validation()
        );
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_search_instant() {
        let transport = Arc::new(ScriptedTransport::new().post_reply(
            200,
            json!({
                "run_id": "i-1",
                "data": [{"url": "https://a.example", "title": "A", "description": "first"}]
            }),
        ));
        let client = scripted_client(&transport);

        let job = client
            .search_instant(SearchRequest::new("rust async").with_content(false))
            .await
            .unwrap();

        assert_eq!(job.run_id.as_str(), "i-1");
        assert_eq!(job.data.len(), 1);
        assert_eq!(transport.get_count(), 0);
        match &transport.calls()[0] {
            Call::Post { path, body } => {
                assert_eq!(path, "/search/instant");
                assert_eq!(body["return_content"], json!(false));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_instant_rejected() {
        let transport =
            Arc::new(ScriptedTransport::new().post_reply(429, json!({"detail": "slow down"})));
        let client = scripted_client(&transport);

        let err = client
            .search_instant(SearchRequest::new("rust"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Submission { status: 429, .. }));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_search_instant_cancelled() {
        let transport = Arc::new(ScriptedTransport::new());
        let client = scripted_client(&transport);
        client.cancellation_token().cancel();

        let err = client
            .search_instant(SearchRequest::new("rust"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Cancelled { run_id: None, .. }));
        assert!(transport.calls().is_empty());
    }
}
