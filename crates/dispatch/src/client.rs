// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single outbound POST, with the passthrough-header authentication
//! convention used by both the queue client and the channel delivery
//! backends (§4.6).

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use wfe_core::{EngineError, TransportError};

use crate::result::DispatchResult;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Prefix the original's `HookDispatcher`/`WorkEngineClient` use for
/// passthrough authentication headers, e.g. `NTORQUE-PASSTHROUGH-ENGINE-API-KEY`.
pub const PASSTHROUGH_HEADER_PREFIX: &str = "NTORQUE-PASSTHROUGH-";

#[derive(Clone)]
pub struct HttpClient {
    http: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new() -> Self {
        Self { http: Client::new(), timeout: DEFAULT_TIMEOUT }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { http: Client::new(), timeout }
    }

    pub async fn post(
        &self,
        url: &str,
        path: &str,
        body: &serde_json::Value,
        headers: &HashMap<String, String>,
    ) -> Result<DispatchResult, EngineError> {
        let mut builder = self.http.post(url).timeout(self.timeout).json(body);
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder.send().await.map_err(|e| {
            EngineError::Transport(TransportError { url: url.to_string(), reason: e.to_string() })
        })?;

        let status = response.status().as_u16();
        let response_headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let response_body: serde_json::Value = response.json().await.unwrap_or(serde_json::Value::Null);

        Ok(DispatchResult {
            status,
            response: response_body,
            response_headers,
            data: body.clone(),
            url: url.to_string(),
            path: path.to_string(),
        })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
