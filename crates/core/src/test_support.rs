// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test builders shared across crates (feature `test-support`).

use crate::event::{ActivityEvent, EventId};
use crate::resource::{ResourceRef, UserRef};
use chrono::{DateTime, Utc};

/// Build an [`ActivityEvent`] with sane test defaults.
pub struct EventBuilder {
    id: i64,
    parent: ResourceRef,
    user: Option<UserRef>,
    target: String,
    action: String,
    data: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl EventBuilder {
    pub fn new(parent: ResourceRef) -> Self {
        Self {
            id: 1,
            parent,
            user: None,
            target: "model".to_string(),
            action: "test".to_string(),
            data: serde_json::json!({}),
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    pub fn user(mut self, user: UserRef) -> Self {
        self.user = Some(user);
        self
    }

    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    pub fn build(self) -> ActivityEvent {
        ActivityEvent {
            id: EventId::new(self.id),
            parent: self.parent,
            user: self.user,
            target: self.target.into(),
            action: self.action.into(),
            data: self.data,
            created_at: self.created_at,
        }
    }
}
