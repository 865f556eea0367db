// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What `add_notification` registers (§4.7, §3 role-mapping supplement).

use wfe_bus::Selector;
use wfe_core::Channel;

/// One channel's share of a notification: which view to render and which
/// single/batch endpoint paths carry the rendered content (§3:
/// `{channel → {view, single_spec, batch_spec}}`).
#[derive(Debug, Clone)]
pub struct ChannelMapping {
    pub channel: Channel,
    pub view: String,
    pub single_spec: String,
    pub batch_spec: String,
}

impl ChannelMapping {
    pub fn new(
        channel: Channel,
        view: impl Into<String>,
        single_spec: impl Into<String>,
        batch_spec: impl Into<String>,
    ) -> Self {
        Self { channel, view: view.into(), single_spec: single_spec.into(), batch_spec: batch_spec.into() }
    }
}

/// One `add_notification(iface, selectors, role, dispatch_mapping, delay,
/// bcc)` registration (§4.7).
#[derive(Debug, Clone)]
pub struct NotificationSpec {
    pub selector: Selector,
    pub role: String,
    pub dispatch_mapping: Vec<ChannelMapping>,
    pub delay_minutes: i64,
    /// Forwarded to the delivery backend for the `email` channel only (§3).
    pub bcc: Vec<String>,
}

impl NotificationSpec {
    pub fn new(
        selector: impl Into<Selector>,
        role: impl Into<String>,
        dispatch_mapping: Vec<ChannelMapping>,
    ) -> Self {
        Self { selector: selector.into(), role: role.into(), dispatch_mapping, delay_minutes: 0, bcc: Vec::new() }
    }

    pub fn with_delay(mut self, minutes: i64) -> Self {
        self.delay_minutes = minutes;
        self
    }

    pub fn with_bcc(mut self, bcc: Vec<String>) -> Self {
        self.bcc = bcc;
        self
    }
}
