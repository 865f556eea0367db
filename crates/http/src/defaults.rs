// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fallback implementations of the per-application seams (`AddressBook`,
//! `ViewResolver`) that let the server binary link and boot without a
//! hosting application wired in. A deployment that actually sends
//! notifications supplies its own (§1: "per-application resource
//! registration... deliberately excluded").

use wfe_core::{Channel, EngineError, NotificationDispatch, UserRef, ViewResolver};
use wfe_engine::AddressBook;

/// Resolves no addresses for anyone — every dispatch row the factory
/// would create is skipped. Safe default: notifications are still
/// recorded (readable via the data model) even with no delivery
/// configured.
pub struct NullAddressBook;

impl AddressBook for NullAddressBook {
    fn address_for(&self, _user: UserRef, _channel: Channel) -> Option<String> {
        None
    }
}

/// Renders the dispatch's own fields as its view payload. A real
/// deployment swaps this for a resolver backed by its templating system.
pub struct PassthroughViewResolver;

#[async_trait::async_trait]
impl ViewResolver for PassthroughViewResolver {
    async fn render(&self, dispatch: &NotificationDispatch) -> Result<serde_json::Value, EngineError> {
        Ok(serde_json::json!({
            "notification_dispatch_id": dispatch.id.get(),
            "view": dispatch.view,
        }))
    }
}
