// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification data model (§3, §4.7, §4.8).

use crate::event::EventId;
use crate::id::define_int_id;
use crate::resource::UserRef;
use chrono::{DateTime, Utc};

define_int_id! {
    /// Identifies a `Notification` row.
    pub struct NotificationId;
}
define_int_id! {
    /// Identifies a `NotificationDispatch` row.
    pub struct NotificationDispatchId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Sms,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's batching preference for one channel. `None` is the wire `null`
/// meaning "no batching, dispatch is due immediately" (§4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Hourly,
    Daily,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub user: UserRef,
    pub event_ref: EventId,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NotificationDispatch {
    pub id: NotificationDispatchId,
    pub notification_ref: NotificationId,
    pub channel: Channel,
    pub address: String,
    pub view: String,
    pub single_spec: String,
    pub batch_spec: String,
    /// Additional recipients, forwarded to the `email` channel only (§3
    /// supplement, grounded in the original's `notification_dispatch.bcc`).
    #[serde(default)]
    pub bcc: Vec<String>,
    pub due: DateTime<Utc>,
    pub sent: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NotificationPreference {
    pub user: UserRef,
    pub channel: Channel,
    pub frequency: Option<Frequency>,
}

impl NotificationPreference {
    pub fn default_for(user: UserRef, channel: Channel) -> Self {
        Self { user, channel, frequency: None }
    }
}
