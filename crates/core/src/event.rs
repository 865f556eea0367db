// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Activity event history (§3, §4.3).

use crate::id::define_int_id;
use crate::resource::{ResourceRef, UserRef};
use chrono::{DateTime, Utc};
use smol_str::SmolStr;

define_int_id! {
    /// Identifies an `ActivityEvent` row.
    pub struct EventId;
}

/// Immutable record of something that happened to a resource.
///
/// `type_()` is `"<target>:<action>"`, e.g. `"model:started"` for a
/// state-change-derived event or `"model:start"` for an action-happened
/// event. `action` is a free-form local label rather than a qualified
/// [`crate::ns::ActionId`] because the FSM evaluator also synthesises
/// events whose label is a state's local symbol (§4.2 step 3).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActivityEvent {
    pub id: EventId,
    pub parent: ResourceRef,
    pub user: Option<UserRef>,
    pub target: SmolStr,
    pub action: SmolStr,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl ActivityEvent {
    pub fn type_(&self) -> String {
        format!("{}:{}", self.target, self.action)
    }
}
