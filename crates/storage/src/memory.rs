// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory store, feature-gated behind `test-support`.
//!
//! Unlike the daemon's WAL-backed `MaterializedState` (which exists to
//! project one write-ahead log into several independent read models), the
//! workflow engine's own `ActivityEvent`/`WorkStatus` history already *is*
//! the append-only log — there is no separate projection to maintain, so
//! the in-memory backend is a flat, lock-guarded `Vec` per table.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use wfe_core::{
    current_of, ActivityEvent, Channel, EngineError, EventId, EventStore, Notification,
    NotificationDispatch, NotificationDispatchId, NotificationId, NotificationPreference,
    NotificationStore, ResourceRef, ResourceStore, StateId, UserRef, WorkStatus, WorkStatusId,
};

#[derive(Default)]
pub struct MemoryStore {
    resources: RwLock<HashSet<ResourceRef>>,
    events: RwLock<Vec<ActivityEvent>>,
    statuses: RwLock<Vec<WorkStatus>>,
    preferences: RwLock<Vec<NotificationPreference>>,
    notifications: RwLock<Vec<Notification>>,
    dispatches: RwLock<Vec<NotificationDispatch>>,
    next_id: RwLock<i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `resource` as existing, e.g. after creating it in the
    /// hosting application. Tests that only exercise the FSM/bus can skip
    /// this and rely on a resource-type-agnostic `ResourceStore` instead.
    pub fn insert_resource(&self, resource: ResourceRef) {
        self.resources.write().insert(resource);
    }

    fn next(&self) -> i64 {
        let mut n = self.next_id.write();
        *n += 1;
        *n
    }
}

#[async_trait::async_trait]
impl ResourceStore for MemoryStore {
    async fn exists(&self, resource: &ResourceRef) -> Result<bool, EngineError> {
        Ok(self.resources.read().contains(resource))
    }
}

#[async_trait::async_trait]
impl EventStore for MemoryStore {
    async fn create_event(
        &self,
        parent: ResourceRef,
        user: Option<UserRef>,
        target: &str,
        action: &str,
        data: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Result<ActivityEvent, EngineError> {
        let event = ActivityEvent {
            id: EventId::new(self.next()),
            parent,
            user,
            target: target.into(),
            action: action.into(),
            data,
            created_at: now,
        };
        self.events.write().push(event.clone());
        Ok(event)
    }

    async fn get_event(&self, id: EventId) -> Result<Option<ActivityEvent>, EngineError> {
        Ok(self.events.read().iter().find(|e| e.id == id).cloned())
    }

    async fn set_work_status(
        &self,
        parent: ResourceRef,
        value: StateId,
        event_ref: Option<EventId>,
        now: DateTime<Utc>,
    ) -> Result<WorkStatus, EngineError> {
        let row =
            WorkStatus { id: WorkStatusId::new(self.next()), parent, value, event_ref, created_at: now };
        self.statuses.write().push(row.clone());
        Ok(row)
    }

    async fn current_status(&self, parent: &ResourceRef) -> Result<Option<WorkStatus>, EngineError> {
        Ok(current_of(self.statuses.read().iter().filter(|s| &s.parent == parent)).cloned())
    }

    async fn status_query(
        &self,
        type_tag: &str,
        values: &[StateId],
        negate: bool,
    ) -> Result<Vec<ResourceRef>, EngineError> {
        let statuses = self.statuses.read();
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for parent in statuses.iter().map(|s| &s.parent).filter(|p| p.type_tag == type_tag) {
            if !seen.insert(parent.clone()) {
                continue;
            }
            let Some(current) = current_of(statuses.iter().filter(|s| &s.parent == parent)) else {
                continue;
            };
            let matches = values.contains(&current.value);
            if matches != negate {
                out.push(parent.clone());
            }
        }
        Ok(out)
    }
}

#[async_trait::async_trait]
impl NotificationStore for MemoryStore {
    async fn get_or_create_preference(
        &self,
        user: UserRef,
        channel: Channel,
    ) -> Result<NotificationPreference, EngineError> {
        let mut prefs = self.preferences.write();
        if let Some(existing) = prefs.iter().find(|p| p.user == user && p.channel == channel) {
            return Ok(existing.clone());
        }
        let pref = NotificationPreference::default_for(user, channel);
        prefs.push(pref.clone());
        Ok(pref)
    }

    async fn create_notification(
        &self,
        user: UserRef,
        event_ref: EventId,
        now: DateTime<Utc>,
    ) -> Result<Notification, EngineError> {
        let notification =
            Notification { id: NotificationId::new(self.next()), user, event_ref, read_at: None, created_at: now };
        self.notifications.write().push(notification.clone());
        Ok(notification)
    }

    async fn get_notification(&self, id: NotificationId) -> Result<Option<Notification>, EngineError> {
        Ok(self.notifications.read().iter().find(|n| n.id == id).cloned())
    }

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
    ) -> Result<NotificationDispatch, EngineError> {
        let dispatch = NotificationDispatch {
            id: NotificationDispatchId::new(self.next()),
            notification_ref,
            channel,
            address,
            view,
            single_spec,
            batch_spec,
            bcc,
            due,
            sent: None,
        };
        self.dispatches.write().push(dispatch.clone());
        Ok(dispatch)
    }

    async fn get_dispatch(
        &self,
        id: NotificationDispatchId,
    ) -> Result<Option<NotificationDispatch>, EngineError> {
        Ok(self.dispatches.read().iter().find(|d| d.id == id).cloned())
    }

    async fn due_dispatches(&self, now: DateTime<Utc>) -> Result<Vec<NotificationDispatch>, EngineError> {
        let dispatches = self.dispatches.read();
        let notifications = self.notifications.read();
        Ok(dispatches
            .iter()
            .filter(|d| d.sent.is_none() && d.due <= now)
            .filter(|d| {
                notifications
                    .iter()
                    .find(|n| n.id == d.notification_ref)
                    .map(|n| n.read_at.is_none())
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn mark_sent(&self, id: NotificationDispatchId, at: DateTime<Utc>) -> Result<(), EngineError> {
        if let Some(dispatch) = self.dispatches.write().iter_mut().find(|d| d.id == id) {
            dispatch.sent = Some(at);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfe_core::ns::NamespacedId;

    fn state(symbol: &str) -> StateId {
        StateId::from_symbol(symbol)
    }

    fn now() -> DateTime<Utc> {
        "2024-01-01T00:00:00Z".parse().unwrap()
    }

    #[tokio::test]
    async fn status_query_finds_only_current_matches() {
        let store = MemoryStore::new();
        let r1 = ResourceRef::new("models", 1);
        let r2 = ResourceRef::new("models", 2);
        store.set_work_status(r1.clone(), state("CREATED"), None, now()).await.unwrap();
        store.set_work_status(r1.clone(), state("STARTED"), None, now()).await.unwrap();
        store.set_work_status(r2.clone(), state("CREATED"), None, now()).await.unwrap();

        let started = store.status_query("models", &[state("STARTED")], false).await.unwrap();
        assert_eq!(started, vec![r1.clone()]);

        let not_started = store.status_query("models", &[state("STARTED")], true).await.unwrap();
        assert_eq!(not_started, vec![r2]);
    }

    #[tokio::test]
    async fn due_dispatches_excludes_read_notifications() {
        let store = MemoryStore::new();
        let user = UserRef::new(1);
        let event = store
            .create_event(ResourceRef::new("models", 1), None, "model", "start", serde_json::json!({}), now())
            .await
            .unwrap();
        let notification = store.create_notification(user, event.id, now()).await.unwrap();
        store
            .create_dispatch(
                notification.id,
                Channel::Email,
                "user@example.com".to_string(),
                "view".to_string(),
                "single".to_string(),
                "batch".to_string(),
                vec![],
                now(),
            )
            .await
            .unwrap();

        assert_eq!(store.due_dispatches(now()).await.unwrap().len(), 1);

        if let Some(n) = store.notifications.write().iter_mut().find(|n| n.id == notification.id) {
            n.read_at = Some(now());
        }
        assert!(store.due_dispatches(now()).await.unwrap().is_empty());
    }
}
