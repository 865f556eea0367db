// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maps [`EngineError`] to the status codes in §6's route table and §7's
//! error taxonomy, wrapped in the shared `{error, detail}` envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use wfe_core::EngineError;
use wfe_wire::ErrorResponse;

pub struct ApiError(pub EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

fn error_tag(err: &EngineError) -> &'static str {
    match err {
        EngineError::Config(_) => "config_error",
        EngineError::InvalidTransition(_) => "invalid_transition",
        EngineError::NotFound(_) => "not_found",
        EngineError::Validation(_) => "validation_error",
        EngineError::Transport(_) => "transport_error",
        EngineError::Storage(_) => "storage_error",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse::new(error_tag(&self.0), self.0.to_string());
        (status, Json(body)).into_response()
    }
}
