// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `DeliveryBackend` (§1, §4.8): the channel delivery seam. Notification
//! delivery is just another outbound hook in the original — the single and
//! batch endpoints live behind the same webhooks base URL and passthrough
//! auth as every other dispatch (§4.6), so the default implementation
//! reuses [`QueueClient`] rather than inventing a separate transport.

use wfe_core::{Channel, Dispatch, EngineError, NotificationDispatch, NotificationDispatchId};

use crate::dispatcher::dispatch_now;
use crate::queue::QueueClient;

#[async_trait::async_trait]
pub trait DeliveryBackend: Send + Sync {
    /// Deliver one dispatch row, `rendered` having already been produced
    /// by a `ViewResolver`.
    async fn deliver_single(
        &self,
        dispatch: &NotificationDispatch,
        rendered: serde_json::Value,
    ) -> Result<(), EngineError>;

    /// Deliver a batch of dispatches sharing `(user, channel)`, per the
    /// `{dispatch_ids, channel, address}` payload shape (resolved Open
    /// Question, see DESIGN.md). `batch_spec` is taken from the first row
    /// in the group — a notification type's dispatch mapping configures
    /// one batch endpoint per channel, so rows destined for the same group
    /// share it.
    async fn deliver_batch(
        &self,
        channel: Channel,
        address: &str,
        batch_spec: &str,
        dispatch_ids: &[NotificationDispatchId],
    ) -> Result<(), EngineError>;
}

pub struct HttpDeliveryBackend {
    queue: QueueClient,
    webhooks_base_url: String,
}

impl HttpDeliveryBackend {
    pub fn new(queue: QueueClient, webhooks_base_url: impl Into<String>) -> Self {
        Self { queue, webhooks_base_url: webhooks_base_url.into() }
    }
}

#[async_trait::async_trait]
impl DeliveryBackend for HttpDeliveryBackend {
    async fn deliver_single(
        &self,
        dispatch: &NotificationDispatch,
        rendered: serde_json::Value,
    ) -> Result<(), EngineError> {
        let task = Dispatch::new(dispatch.single_spec.clone(), single_body(dispatch, rendered));
        dispatch_now(&self.queue, &self.webhooks_base_url, task).await
    }

    async fn deliver_batch(
        &self,
        channel: Channel,
        address: &str,
        batch_spec: &str,
        dispatch_ids: &[NotificationDispatchId],
    ) -> Result<(), EngineError> {
        let task = Dispatch::new(batch_spec.to_string(), batch_body(channel, address, dispatch_ids));
        dispatch_now(&self.queue, &self.webhooks_base_url, task).await
    }
}

fn batch_body(channel: Channel, address: &str, dispatch_ids: &[NotificationDispatchId]) -> serde_json::Value {
    serde_json::json!({
        "dispatch_ids": dispatch_ids.iter().map(|id| id.get()).collect::<Vec<_>>(),
        "channel": channel.as_str(),
        "address": address,
    })
}

/// Builds the single-send payload. `bcc` is forwarded only for the `email`
/// channel (§3 supplement, §8: "bcc addresses reaching the delivery backend
/// only for the email channel").
fn single_body(dispatch: &NotificationDispatch, rendered: serde_json::Value) -> serde_json::Value {
    let mut body = serde_json::json!({
        "notification_dispatch_id": dispatch.id.get(),
        "channel": dispatch.channel.as_str(),
        "address": dispatch.address,
        "view": rendered,
    });
    if dispatch.channel == Channel::Email && !dispatch.bcc.is_empty() {
        body["bcc"] = serde_json::json!(dispatch.bcc);
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfe_core::NotificationId;

    fn dispatch(channel: Channel, bcc: Vec<String>) -> NotificationDispatch {
        NotificationDispatch {
            id: NotificationDispatchId::new(1),
            notification_ref: NotificationId::new(1),
            channel,
            address: "user@example.com".into(),
            view: "model-started".into(),
            single_spec: "/email/single".into(),
            batch_spec: "/email/batch".into(),
            bcc,
            due: chrono::Utc::now(),
            sent: None,
        }
    }

    #[test]
    fn bcc_is_carried_for_email() {
        let d = dispatch(Channel::Email, vec!["cc@example.com".into()]);
        let body = single_body(&d, serde_json::json!({"subject": "hi"}));
        assert_eq!(body["bcc"], serde_json::json!(["cc@example.com"]));
    }

    #[test]
    fn bcc_is_dropped_for_sms() {
        let d = dispatch(Channel::Sms, vec!["cc@example.com".into()]);
        let body = single_body(&d, serde_json::json!({}));
        assert!(body.get("bcc").is_none());
    }

    #[test]
    fn batch_body_carries_ids_channel_and_address() {
        let ids = vec![NotificationDispatchId::new(1), NotificationDispatchId::new(2)];
        let body = batch_body(Channel::Sms, "+15555550100", &ids);
        assert_eq!(body["dispatch_ids"], serde_json::json!([1, 2]));
        assert_eq!(body["channel"], "sms");
        assert_eq!(body["address"], "+15555550100");
    }
}
