// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! API-key check for every ingress route (§6: "unauthenticated requests
//! receive 401 unless no key is configured").

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use wfe_wire::ErrorResponse;

pub const API_KEY_HEADER: &str = "x-engine-api-key";

pub struct Unauthorized;

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new("unauthorized", "missing or invalid API key"))).into_response()
    }
}

/// Checks `headers` against `configured_key`. A `None` configured key
/// disables the check entirely, matching the original's "no key means no
/// auth" posture for local/dev deployments.
pub fn check(headers: &HeaderMap, configured_key: Option<&str>) -> Result<(), Unauthorized> {
    let Some(expected) = configured_key else { return Ok(()) };
    let provided = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if provided == Some(expected) {
        Ok(())
    } else {
        Err(Unauthorized)
    }
}
