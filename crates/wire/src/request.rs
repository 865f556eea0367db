// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request bodies for the ingress routes (§6).

use wfe_core::{ActionId, Channel, EventId, NotificationDispatchId, OperationId, ResultId, StateId};

/// `POST /events/<type>/<id>`. Exactly one of `state`/`action` selects
/// which notice kind to publish; `event_id` names the triggering event
/// already recorded via the event store.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct EventRequest {
    pub state: Option<StateId>,
    pub action: Option<ActionId>,
    pub event_id: Option<EventId>,
}

/// `POST /results/<type>/<id>`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ResultRequest {
    pub operation: OperationId,
    pub result: ResultId,
    pub event_id: EventId,
}

/// `POST /notifications/dispatch`. Empty body — the route just triggers
/// the periodic executor out of band.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct NotificationsDispatchRequest {}

/// `POST /notifications/single`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NotificationsSingleRequest {
    pub notification_dispatch_id: NotificationDispatchId,
}

/// `POST /notifications/batch`. Payload shape resolved per the Open
/// Question in §9: the set of already-due dispatch rows sharing one
/// user/channel/batch endpoint, mirroring what the periodic executor
/// itself builds for a multi-row group.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NotificationsBatchRequest {
    pub channel: Channel,
    pub address: String,
    pub batch_spec: String,
    pub dispatch_ids: Vec<NotificationDispatchId>,
}
