// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Response bodies for the ingress routes (§6) and the shared error
//! envelope returned for non-2xx statuses (§7).

use wfe_core::Dispatch;

/// `200` body for `POST /events/<type>/<id>`: every outbound task a
/// matching subscriber produced. `204` (no match) carries no body.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EventResponse {
    pub handlers: Vec<Dispatch>,
}

/// `200` body for `POST /results/<type>/<id>`. `204` (no binding) carries
/// no body.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ResultResponse {
    pub dispatched: Vec<Dispatch>,
}

/// `200` body for `POST /notifications/dispatch`: how many dispatch rows
/// the periodic sweep sent.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NotificationsDispatchResponse {
    pub sent: usize,
}

/// `{error, detail}` envelope for every non-2xx response (§7).
#[derive(Debug, Clone, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { error: error.into(), detail: detail.into() }
    }
}
