// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Route handlers for the ingress surface (§6).

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use wfe_core::{EngineError, NotificationStore, ResourceRef};
use wfe_engine::{notice_kind_from, NotificationExecutor};
use wfe_wire::{
    EventRequest, EventResponse, NotificationsBatchRequest, NotificationsDispatchRequest, NotificationsDispatchResponse,
    NotificationsSingleRequest, ResultRequest, ResultResponse,
};

use crate::auth::{self, Unauthorized};
use crate::error::ApiError;
use crate::state::{AppState, Store};

pub enum RouteError {
    Unauthorized,
    Api(ApiError),
}

impl From<Unauthorized> for RouteError {
    fn from(_: Unauthorized) -> Self {
        Self::Unauthorized
    }
}

impl From<EngineError> for RouteError {
    fn from(err: EngineError) -> Self {
        Self::Api(ApiError::from(err))
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        match self {
            RouteError::Unauthorized => Unauthorized.into_response(),
            RouteError::Api(err) => err.into_response(),
        }
    }
}

pub async fn liveness() -> &'static str {
    "ok"
}

pub async fn dispatch_event<S: Store + 'static>(
    State(state): State<AppState<S>>,
    Path((type_tag, id)): Path<(String, i64)>,
    headers: HeaderMap,
    Json(body): Json<EventRequest>,
) -> Result<Response, RouteError> {
    auth::check(&headers, state.config.api_key.as_deref())?;

    let ctx = ResourceRef::new(type_tag, id);
    let kind = notice_kind_from(body.state, body.action).map_err(EngineError::from)?;
    let event_id = body.event_id.ok_or_else(|| {
        EngineError::from(wfe_core::ValidationError::MissingField("event_id"))
    })?;

    let dispatches = state
        .engine
        .dispatch_event(
            state.store.as_ref(),
            state.store.as_ref(),
            state.store.as_ref(),
            state.addresses.as_ref(),
            &ctx,
            kind,
            event_id,
            Utc::now(),
        )
        .await?;

    if dispatches.is_empty() {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Ok(Json(EventResponse { handlers: dispatches }).into_response())
    }
}

pub async fn apply_result<S: Store + 'static>(
    State(state): State<AppState<S>>,
    Path((type_tag, id)): Path<(String, i64)>,
    headers: HeaderMap,
    Json(body): Json<ResultRequest>,
) -> Result<Response, RouteError> {
    auth::check(&headers, state.config.api_key.as_deref())?;

    let ctx = ResourceRef::new(type_tag, id);
    let outcome = state
        .engine
        .apply_result(state.store.as_ref(), state.store.as_ref(), &ctx, body.operation, body.result, body.event_id, Utc::now())
        .await?;

    match outcome {
        None => Ok(StatusCode::NO_CONTENT.into_response()),
        Some(outcome) => Ok(Json(ResultResponse { dispatched: outcome.dispatches }).into_response()),
    }
}

pub async fn trigger_notifications_dispatch<S: Store + 'static>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Json(_body): Json<NotificationsDispatchRequest>,
) -> Result<Response, RouteError> {
    auth::check(&headers, state.config.api_key.as_deref())?;

    let executor = NotificationExecutor::new(state.delivery.as_ref(), state.views.as_ref());
    let sent = executor.run_periodic(state.store.as_ref(), Utc::now()).await?;
    Ok(Json(NotificationsDispatchResponse { sent }).into_response())
}

pub async fn send_single_notification<S: Store + 'static>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Json(body): Json<NotificationsSingleRequest>,
) -> Result<Response, RouteError> {
    auth::check(&headers, state.config.api_key.as_deref())?;

    let executor = NotificationExecutor::new(state.delivery.as_ref(), state.views.as_ref());
    executor.send_single(body.notification_dispatch_id, state.store.as_ref(), Utc::now()).await?;
    Ok(StatusCode::OK.into_response())
}

pub async fn send_batch_notifications<S: Store + 'static>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Json(body): Json<NotificationsBatchRequest>,
) -> Result<Response, RouteError> {
    auth::check(&headers, state.config.api_key.as_deref())?;

    state.delivery.deliver_batch(body.channel, &body.address, &body.batch_spec, &body.dispatch_ids).await?;
    for id in &body.dispatch_ids {
        state.store.mark_sent(*id, Utc::now()).await?;
    }
    Ok(StatusCode::OK.into_response())
}
