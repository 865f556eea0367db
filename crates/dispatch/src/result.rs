// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The response shape returned by an outbound call (§4.6), matching the
//! original client's `{data, path, response, response_headers, status,
//! url}` return value.

use std::collections::HashMap;

#[derive(Debug, Clone, serde::Serialize)]
pub struct DispatchResult {
    pub status: u16,
    pub response: serde_json::Value,
    pub response_headers: HashMap<String, String>,
    pub data: serde_json::Value,
    pub url: String,
    pub path: String,
}
