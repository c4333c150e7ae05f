//! Scripted transport for tests
//!
//! Replays queued responses in order and records every call so tests can
//! assert on exact request counts.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use aistudio_core::domain::job::RunId;
use async_trait::async_trait;
use serde_json::Value;

use crate::StudioClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::transport::{RawResponse, Transport};

/// Client whose requests are answered by `transport`
pub(crate) fn scripted_client(transport: &Arc<ScriptedTransport>) -> StudioClient {
    let transport: Arc<dyn Transport> = transport.clone();
    StudioClient::with_transport(ClientConfig::new("test-key"), transport).unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Post { path: String, body: Value },
    Get { path: String, run_id: String },
}

type GetHook = Box<dyn Fn(usize) + Send + Sync>;

#[derive(Default)]
pub(crate) struct ScriptedTransport {
    posts: Mutex<VecDeque<RawResponse>>,
    gets: Mutex<VecDeque<RawResponse>>,
    get_fallback: Option<RawResponse>,
    calls: Mutex<Vec<Call>>,
    on_get: Option<GetHook>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn post_reply(self, status: u16, body: Value) -> Self {
        self.post_raw(status, body.to_string())
    }

    /// Queue a POST reply with a verbatim body
    pub(crate) fn post_raw(self, status: u16, body: impl Into<String>) -> Self {
        self.posts
            .lock()
            .unwrap()
            .push_back(RawResponse::new(status, body));
        self
    }

    pub(crate) fn created(self, run_id: &str) -> Self {
        self.post_reply(200, serde_json::json!({ "run_id": run_id }))
    }

    pub(crate) fn get_reply(self, status: u16, body: Value) -> Self {
        let body = if body.is_null() { String::new() } else { body.to_string() };
        self.get_raw(status, body)
    }

    /// Queue a GET reply with a verbatim body
    pub(crate) fn get_raw(self, status: u16, body: impl Into<String>) -> Self {
        self.gets
            .lock()
            .unwrap()
            .push_back(RawResponse::new(status, body));
        self
    }

    /// Reply used once the queued GET replies run out
    pub(crate) fn get_fallback(mut self, status: u16, body: Value) -> Self {
        self.get_fallback = Some(RawResponse::new(status, body.to_string()));
        self
    }

    /// Called with the 1-based index of every GET before it is answered
    pub(crate) fn on_get(mut self, hook: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_get = Some(Box::new(hook));
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn post_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Post { .. }))
            .count()
    }

    pub(crate) fn get_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Get { .. }))
            .count()
    }

    pub(crate) fn gets_to(&self, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Get { path: p, .. } if p == path))
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, path: &str, body: &Value) -> Result<RawResponse> {
        self.calls.lock().unwrap().push(Call::Post {
            path: path.to_string(),
            body: body.clone(),
        });

        let reply = self.posts.lock().unwrap().pop_front();
        Ok(reply.unwrap_or_else(|| panic!("unexpected POST {}", path)))
    }

    async fn get(&self, path: &str, run_id: &RunId) -> Result<RawResponse> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(Call::Get {
                path: path.to_string(),
                run_id: run_id.to_string(),
            });
            calls
                .iter()
                .filter(|call| matches!(call, Call::Get { .. }))
                .count()
        };

        if let Some(hook) = &self.on_get {
            hook(index);
        }

        let reply = self.gets.lock().unwrap().pop_front();
        Ok(reply
            .or_else(|| self.get_fallback.clone())
            .unwrap_or_else(|| panic!("unexpected GET {}", path)))
    }
}
