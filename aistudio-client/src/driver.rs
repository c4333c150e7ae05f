//! Job driver
//!
//! Every task follows the same protocol: submit a payload, receive a run id,
//! poll a status endpoint at a fixed interval, then decode the completed
//! payload. The driver implements that protocol once; task adapters only
//! supply endpoints, a payload and a decoder.
//!
//! Polling is bounded by [`PollPolicy::max_attempts`]. There is no backoff and
//! no retry: any response other than "still pending" ends the call. The
//! cancellation token is raced against every request and every wait, so a
//! cancelled job returns [`ClientError::Cancelled`] without another request.

use std::future::Future;

use aistudio_core::domain::job::{JobResult, JobStatus, RunId};
use aistudio_core::domain::task::TaskKind;
use aistudio_core::dto::run::{RunCreated, RunDataResponse, RunStatusResponse};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::PollPolicy;
use crate::error::{ClientError, Result};
use crate::transport::Transport;

/// Endpoint set for one task
#[derive(Debug, Clone, Copy)]
pub(crate) struct TaskEndpoints {
    pub task: TaskKind,
    /// POST target for submission
    pub create: &'static str,
    /// GET target polled for status
    pub status: &'static str,
    /// Separate GET target for the payload, when status responses carry none
    pub data: Option<&'static str>,
    /// Whether HTTP 202 from the status endpoint means "not ready yet"
    pub accepted_is_pending: bool,
    /// POST target for prompt-to-schema generation
    pub schema: Option<&'static str>,
}

/// Status and payload of a completed run, before decoding
struct Completion {
    message: Option<String>,
    data: Option<Value>,
}

pub(crate) struct JobDriver<'a> {
    transport: &'a dyn Transport,
    endpoints: &'a TaskEndpoints,
    policy: PollPolicy,
    cancel: &'a CancellationToken,
}

impl<'a> JobDriver<'a> {
    pub(crate) fn new(
        transport: &'a dyn Transport,
        endpoints: &'a TaskEndpoints,
        policy: PollPolicy,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            transport,
            endpoints,
            policy,
            cancel,
        }
    }

    /// Submits `payload`, waits for a terminal state and decodes the result
    ///
    /// `decode` only ever sees the payload of a `completed` run.
    pub(crate) async fn submit_and_await<T, D>(
        &self,
        payload: &Value,
        decode: D,
    ) -> Result<JobResult<T>>
    where
        D: FnOnce(Option<Value>) -> serde_json::Result<T>,
    {
        let run_id = self.submit(payload).await?;
        let completion = self.poll(&run_id).await?;

        let data =
            decode(completion.data).map_err(|e| ClientError::decode(self.task(), &run_id, e))?;

        Ok(JobResult {
            run_id,
            message: completion.message,
            data,
        })
    }

    async fn submit(&self, payload: &Value) -> Result<RunId> {
        let task = self.task();
        let response = self
            .guard(None, self.transport.post(self.endpoints.create, payload))
            .await??;

        if !response.is_success() {
            warn!(task = %task, status = response.status, "Job submission rejected");
            return Err(ClientError::submission(task, response.status, &response.body));
        }

        let created: RunCreated = response
            .json()
            .map_err(|e| ClientError::parse(task, None, e, &response.body))?;
        info!(task = %task, run_id = %created.run_id, "Job submitted");

        Ok(created.run_id)
    }

    async fn poll(&self, run_id: &RunId) -> Result<Completion> {
        let task = self.task();
        let max_attempts = self.policy.max_attempts();

        for attempt in 1..=max_attempts {
            if self.cancel.is_cancelled() {
                return Err(self.cancelled(Some(run_id)));
            }

            let response = self
                .guard(Some(run_id), self.transport.get(self.endpoints.status, run_id))
                .await??;

            if response.is_accepted() && self.endpoints.accepted_is_pending {
                debug!(task = %task, run_id = %run_id, attempt, "Run accepted, not ready");
            } else if !response.is_success() {
                return Err(ClientError::fetch(
                    task,
                    run_id.clone(),
                    response.status,
                    &response.body,
                ));
            } else {
                let report: RunStatusResponse = response
                    .json()
                    .map_err(|e| ClientError::parse(task, Some(run_id), e, &response.body))?;

                match report.status {
                    JobStatus::Completed => {
                        info!(task = %task, run_id = %run_id, attempt, "Job completed");
                        return self.complete(run_id, report).await;
                    }
                    JobStatus::Failed => {
                        warn!(task = %task, run_id = %run_id, attempt, "Job failed");
                        return Err(ClientError::JobFailed {
                            task,
                            run_id: run_id.clone(),
                            message: report.message,
                        });
                    }
                    status => {
                        debug!(
                            task = %task,
                            run_id = %run_id,
                            attempt,
                            %status,
                            "Run still pending"
                        );
                    }
                }
            }

            if attempt < max_attempts {
                self.guard(Some(run_id), tokio::time::sleep(self.policy.interval))
                    .await?;
            }
        }

        warn!(
            task = %task,
            run_id = %run_id,
            attempts = max_attempts,
            "Job did not finish within {:?}",
            self.policy.timeout
        );

        Err(ClientError::Timeout {
            task,
            run_id: run_id.clone(),
            attempts: max_attempts,
        })
    }

    /// Resolves the payload of a completed run
    async fn complete(&self, run_id: &RunId, report: RunStatusResponse) -> Result<Completion> {
        let Some(path) = self.endpoints.data else {
            return Ok(Completion {
                message: report.message,
                data: report.data,
            });
        };

        let task = self.task();
        let response = self
            .guard(Some(run_id), self.transport.get(path, run_id))
            .await??;

        if !response.is_success() {
            return Err(ClientError::fetch(
                task,
                run_id.clone(),
                response.status,
                &response.body,
            ));
        }

        let fetched: RunDataResponse = response
            .json()
            .map_err(|e| ClientError::parse(task, Some(run_id), e, &response.body))?;

        Ok(Completion {
            message: report.message.or(fetched.message),
            data: fetched.data,
        })
    }

    /// Runs `fut` unless the caller cancels first
    async fn guard<F: Future>(&self, run_id: Option<&RunId>, fut: F) -> Result<F::Output> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(self.cancelled(run_id)),
            output = fut => Ok(output),
        }
    }

    fn cancelled(&self, run_id: Option<&RunId>) -> ClientError {
        info!(task = %self.task(), run_id = ?run_id.map(RunId::as_str), "Job cancelled by caller");
        ClientError::Cancelled {
            task: self.task(),
            run_id: run_id.cloned(),
        }
    }

    fn task(&self) -> TaskKind {
        self.endpoints.task
    }
}
