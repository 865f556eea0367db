// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository interfaces (§9 design note: "ORM + session globals → explicit
//! repository interfaces").
//!
//! The engine nucleus depends only on these traits, never on a concrete
//! database driver. `wfe-storage` provides an in-memory implementation for
//! tests and a `sqlx`-backed Postgres implementation for production.

use crate::error::EngineError;
use crate::event::{ActivityEvent, EventId};
use crate::ns::StateId;
use crate::notification::{
    Channel, Notification, NotificationDispatch, NotificationDispatchId, NotificationId,
    NotificationPreference,
};
use crate::resource::{ResourceRef, UserRef};
use crate::work_status::WorkStatus;
use chrono::{DateTime, Utc};

/// Persists and queries resources' current state.
#[async_trait::async_trait]
pub trait ResourceStore: Send + Sync {
    /// Whether `resource` exists at all (used to distinguish 404 from
    /// "no subscriber" in the binder, §4.5).
    async fn exists(&self, resource: &ResourceRef) -> Result<bool, EngineError>;
}

/// Persists `ActivityEvent` and `WorkStatus` history (§4.3).
#[async_trait::async_trait]
pub trait EventStore: Send + Sync {
    async fn create_event(
        &self,
        parent: ResourceRef,
        user: Option<UserRef>,
        target: &str,
        action: &str,
        data: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Result<ActivityEvent, EngineError>;

    async fn get_event(&self, id: EventId) -> Result<Option<ActivityEvent>, EngineError>;

    /// Appends a new WorkStatus row. Callers are responsible for not
    /// calling this when `to_state = KEEP` (§3 invariant: "every transition
    /// writes exactly one WorkStatus row unless to_state = KEEP").
    async fn set_work_status(
        &self,
        parent: ResourceRef,
        value: StateId,
        event_ref: Option<EventId>,
        now: DateTime<Utc>,
    ) -> Result<WorkStatus, EngineError>;

    async fn current_status(&self, parent: &ResourceRef) -> Result<Option<WorkStatus>, EngineError>;

    /// Resources of `type_tag` whose current status is in `values`
    /// (`negate = true` inverts the match). §4.3's correlated antijoin.
    async fn status_query(
        &self,
        type_tag: &str,
        values: &[StateId],
        negate: bool,
    ) -> Result<Vec<ResourceRef>, EngineError>;
}

/// Persists notifications, dispatches, and per-user channel preferences
/// (§4.7, §4.8).
#[async_trait::async_trait]
pub trait NotificationStore: Send + Sync {
    async fn get_or_create_preference(
        &self,
        user: UserRef,
        channel: Channel,
    ) -> Result<NotificationPreference, EngineError>;

    async fn create_notification(
        &self,
        user: UserRef,
        event_ref: EventId,
        now: DateTime<Utc>,
    ) -> Result<Notification, EngineError>;

    /// Looked up by the executor to group due dispatches by owning user
    /// (§4.8 "Group by user_id, then by channel").
    async fn get_notification(&self, id: NotificationId) -> Result<Option<Notification>, EngineError>;

    #[allow(clippy::too_many_arguments)]
    async fn create_dispatch(
        &self,
        notification_ref: NotificationId,
        channel: Channel,
        address: String,
        view: String,
        single_spec: String,
        batch_spec: String,
        bcc: Vec<String>,
        due: DateTime<Utc>,
    ) -> Result<NotificationDispatch, EngineError>;

    async fn get_dispatch(
        &self,
        id: NotificationDispatchId,
    ) -> Result<Option<NotificationDispatch>, EngineError>;

    /// Unsent dispatches whose notification is unread and whose `due` has
    /// elapsed (§4.8 periodic run).
    async fn due_dispatches(&self, now: DateTime<Utc>) -> Result<Vec<NotificationDispatch>, EngineError>;

    async fn mark_sent(&self, id: NotificationDispatchId, at: DateTime<Utc>) -> Result<(), EngineError>;
}
