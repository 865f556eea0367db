// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The outbound task representation produced by subscription handlers
//! (§4.4, §4.6) and consumed by the outbound task client.

use std::collections::HashMap;

/// One outbound HTTP task: `POST <base_url>/<path>` with `body` and
/// `headers` forwarded to the destination (§4.6).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dispatch {
    pub path: String,
    #[serde(default = "default_method")]
    pub method: String,
    pub body: serde_json::Value,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_method() -> String {
    "POST".to_string()
}

impl Dispatch {
    pub fn new(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self { path: path.into(), method: default_method(), body, headers: HashMap::new() }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}
