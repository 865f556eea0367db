// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The notification factory (§4.7): on a matching notice, resolve
//! interested users via [`RoleRegistry`], materialise one `Notification`
//! plus one `NotificationDispatch` per channel per user, then hand
//! newly-due rows back to the caller for an opportunistic immediate send
//! (mirrors the original's `AddNotification.__call__` followed by
//! `dispatch_notifications`).

use chrono::{DateTime, Utc};
use smol_str::SmolStr;
use wfe_core::{
    ActivityEvent, Channel, EngineError, NoticeKind, NotificationDispatch, NotificationStore, ResourceRef,
    RoleRegistry, UserRef,
};

use super::due;
use super::registry::NotificationRegistry;

/// Resolves a user's delivery address for a channel (an email address, a
/// phone number). Application-specific user-profile lookup — out of scope
/// here (§1) — so this is a seam a caller plugs in, the same way
/// `ViewResolver` stands in for template rendering.
pub trait AddressBook: Send + Sync {
    /// `None` means the user has no known address for `channel`: the
    /// factory skips creating that dispatch row rather than erroring,
    /// since a missing address isn't a configuration failure.
    fn address_for(&self, user: UserRef, channel: Channel) -> Option<String>;
}

pub struct NotificationFactory<'a> {
    registry: &'a NotificationRegistry,
    roles: &'a RoleRegistry,
    addresses: &'a dyn AddressBook,
}

impl<'a> NotificationFactory<'a> {
    pub fn new(registry: &'a NotificationRegistry, roles: &'a RoleRegistry, addresses: &'a dyn AddressBook) -> Self {
        Self { registry, roles, addresses }
    }

    /// Creates rows for every `add_notification` registration matching
    /// `kind` across `capability_chain`. Returns the freshly created
    /// dispatch rows so the caller can attempt the opportunistic send-now
    /// pass (§4.7 step 5) without this type needing to know about delivery.
    pub async fn on_notice(
        &self,
        _ctx: &ResourceRef,
        capability_chain: &[SmolStr],
        kind: &NoticeKind,
        event: &ActivityEvent,
        notifications: &dyn NotificationStore,
        now: DateTime<Utc>,
    ) -> Result<Vec<NotificationDispatch>, EngineError> {
        let mut created = Vec::new();
        for (iface, spec) in self.registry.matching(capability_chain, kind) {
            for user in self.roles.resolve(iface, &spec.role, &event.data) {
                let notification = notifications.create_notification(user, event.id, now).await?;
                for mapping in &spec.dispatch_mapping {
                    let Some(address) = self.addresses.address_for(user, mapping.channel) else {
                        continue;
                    };
                    let preference = notifications.get_or_create_preference(user, mapping.channel).await?;
                    let due = due::normalise(preference.frequency, now) + chrono::Duration::minutes(spec.delay_minutes);
                    let bcc = if mapping.channel == Channel::Email { spec.bcc.clone() } else { Vec::new() };
                    let dispatch = notifications
                        .create_dispatch(
                            notification.id,
                            mapping.channel,
                            address,
                            mapping.view.clone(),
                            mapping.single_spec.clone(),
                            mapping.batch_spec.clone(),
                            bcc,
                            due,
                        )
                        .await?;
                    created.push(dispatch);
                }
            }
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::spec::{ChannelMapping, NotificationSpec};
    use std::sync::Arc;
    use wfe_core::{ns::NamespacedId, ActionId};
    use wfe_storage::MemoryStore;

    struct FixedAddressBook;
    impl AddressBook for FixedAddressBook {
        fn address_for(&self, user: UserRef, channel: Channel) -> Option<String> {
            Some(format!("{}-{}@example.com", user.get(), channel.as_str()))
        }
    }

    fn event(data: serde_json::Value) -> ActivityEvent {
        ActivityEvent {
            id: wfe_core::EventId::new(1),
            parent: ResourceRef::new("models", 1),
            user: None,
            target: "model".into(),
            action: "started".into(),
            data,
            created_at: "2024-03-01T09:15:00Z".parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn creates_one_dispatch_per_channel_per_interested_user() {
        let mut roles = RoleRegistry::new();
        roles.register(
            "IModel",
            "owner",
            Arc::new(|data: &serde_json::Value| {
                data.get("owner_id").and_then(|v| v.as_i64()).map(|id| vec![UserRef::new(id)]).unwrap_or_default()
            }),
        );
        let mut registry = NotificationRegistry::new();
        registry.add_notification(
            "IModel",
            NotificationSpec::new(
                ActionId::from_symbol("START"),
                "owner",
                vec![
                    ChannelMapping::new(Channel::Email, "started", "/email/single", "/email/batch"),
                    ChannelMapping::new(Channel::Sms, "started", "/sms/single", "/sms/batch"),
                ],
            ),
        );
        let addresses = FixedAddressBook;
        let factory = NotificationFactory::new(&registry, &roles, &addresses);
        let store = MemoryStore::new();
        let chain = vec![SmolStr::new("IModel")];
        let kind = NoticeKind::Happened(ActionId::from_symbol("START"));
        let now = "2024-03-01T09:15:00Z".parse().unwrap();

        let created = factory
            .on_notice(&ResourceRef::new("models", 1), &chain, &kind, &event(serde_json::json!({"owner_id": 7})), &store, now)
            .await
            .unwrap();

        assert_eq!(created.len(), 2);
        assert!(created.iter().any(|d| d.channel == Channel::Email && d.address == "7-email@example.com"));
        assert!(created.iter().any(|d| d.channel == Channel::Sms && d.address == "7-sms@example.com"));
    }

    #[tokio::test]
    async fn unresolved_role_creates_nothing() {
        let roles = RoleRegistry::new();
        let mut registry = NotificationRegistry::new();
        registry.add_notification(
            "IModel",
            NotificationSpec::new(
                ActionId::from_symbol("START"),
                "owner",
                vec![ChannelMapping::new(Channel::Email, "started", "/single", "/batch")],
            ),
        );
        let addresses = FixedAddressBook;
        let factory = NotificationFactory::new(&registry, &roles, &addresses);
        let store = MemoryStore::new();
        let chain = vec![SmolStr::new("IModel")];
        let kind = NoticeKind::Happened(ActionId::from_symbol("START"));
        let now = "2024-03-01T09:15:00Z".parse().unwrap();

        let created = factory
            .on_notice(&ResourceRef::new("models", 1), &chain, &kind, &event(serde_json::json!({})), &store, now)
            .await
            .unwrap();
        assert!(created.is_empty());
    }
}
