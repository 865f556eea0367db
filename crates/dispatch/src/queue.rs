// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The durable-queue wire protocol: `POST <queue>/?url=<target>&method=<verb>`
//! with passthrough-prefixed headers (§6 "Outbound task queue API").

use std::collections::HashMap;

use wfe_core::{Dispatch, EngineError, TransportError};

use crate::backoff;
use crate::client::{HttpClient, PASSTHROUGH_HEADER_PREFIX};
use crate::result::DispatchResult;

/// Submission attempts against the queue itself before giving up. Does not
/// bound retries of the eventual webhook delivery — that is the durable
/// queue's job once it has accepted the task.
const MAX_SUBMIT_ATTEMPTS: u32 = 4;

/// Authentication the queue is configured to forward, e.g. both
/// `ENGINE_API_KEY` and its legacy alias both get stamped so either name
/// reaches the destination (§6A).
#[derive(Clone, Default)]
pub struct PassthroughAuth {
    pub header_names: Vec<String>,
    pub value: Option<String>,
}

impl PassthroughAuth {
    pub fn new(header_names: Vec<String>, value: Option<String>) -> Self {
        Self { header_names, value }
    }
}

#[derive(Clone)]
pub struct QueueClient {
    http: HttpClient,
    queue_url: String,
    auth: PassthroughAuth,
}

impl QueueClient {
    pub fn new(http: HttpClient, queue_url: impl Into<String>, auth: PassthroughAuth) -> Self {
        Self { http, queue_url: queue_url.into(), auth }
    }

    /// Enqueue `dispatch` against `target_base_url`, e.g. the configured
    /// webhooks or engine base URL. Retries the queue-submission call
    /// itself with bounded backoff; the destination webhook's own delivery
    /// retries are the durable queue's responsibility, not ours.
    pub async fn enqueue(&self, target_base_url: &str, dispatch: &Dispatch) -> Result<DispatchResult, EngineError> {
        let target = join_path(target_base_url, &dispatch.path);
        let mut url = reqwest::Url::parse(&self.queue_url)
            .map_err(|e| EngineError::Transport(TransportError { url: self.queue_url.clone(), reason: e.to_string() }))?;
        url.query_pairs_mut().append_pair("url", &target).append_pair("method", &dispatch.method);

        let headers = self.passthrough_headers(dispatch);
        backoff::retry(
            MAX_SUBMIT_ATTEMPTS,
            |_attempt| self.http.post(url.as_str(), &dispatch.path, &dispatch.body, &headers),
            |err| matches!(err, EngineError::Transport(_)),
        )
        .await
    }

    fn passthrough_headers(&self, dispatch: &Dispatch) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        for (name, value) in &dispatch.headers {
            headers.insert(format!("{PASSTHROUGH_HEADER_PREFIX}{name}"), value.clone());
        }
        if let Some(value) = &self.auth.value {
            for name in &self.auth.header_names {
                headers.insert(format!("{PASSTHROUGH_HEADER_PREFIX}{name}"), value.clone());
            }
        }
        headers
    }
}

fn join_path(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_path_avoids_double_slash() {
        assert_eq!(join_path("https://example.com/hooks/", "/started"), "https://example.com/hooks/started");
    }
}
