// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The notification executor (§4.8): periodic batch run and single send,
//! sharing one delivery path (mirrors the original's
//! `send_from_notification_dispatch`, called both from the periodic
//! `dispatch_notifications` sweep and the `/notifications/single` view).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::warn;
use wfe_core::{EngineError, NotFoundError, NotificationDispatch, NotificationDispatchId, NotificationStore, ViewResolver};
use wfe_dispatch::DeliveryBackend;

pub struct NotificationExecutor<'a> {
    delivery: &'a dyn DeliveryBackend,
    views: &'a dyn ViewResolver,
}

impl<'a> NotificationExecutor<'a> {
    pub fn new(delivery: &'a dyn DeliveryBackend, views: &'a dyn ViewResolver) -> Self {
        Self { delivery, views }
    }

    /// Resolve `id`, render its view, deliver, and stamp `sent` on success.
    /// Already-sent rows are a no-op — at-least-once delivery means a
    /// caller (e.g. the opportunistic send from the factory, racing the
    /// periodic sweep) may ask twice (§4.8).
    pub async fn send_single(
        &self,
        id: NotificationDispatchId,
        notifications: &dyn NotificationStore,
        now: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        let dispatch = notifications
            .get_dispatch(id)
            .await?
            .ok_or(NotFoundError::Dispatch(id.get()))?;
        if dispatch.sent.is_some() {
            return Ok(());
        }
        let rendered = self.views.render(&dispatch).await?;
        self.delivery.deliver_single(&dispatch, rendered).await?;
        notifications.mark_sent(id, now).await
    }

    /// The periodic sweep (§4.8): due, unsent, unread dispatches grouped by
    /// `(user, channel)`; singles go to the single endpoint, groups of more
    /// than one to the batch endpoint. Returns the count successfully sent.
    pub async fn run_periodic(&self, notifications: &dyn NotificationStore, now: DateTime<Utc>) -> Result<usize, EngineError> {
        let due = notifications.due_dispatches(now).await?;
        let mut groups: HashMap<(wfe_core::UserRef, wfe_core::Channel), Vec<NotificationDispatch>> = HashMap::new();
        for dispatch in due {
            let Some(notification) = notifications.get_notification(dispatch.notification_ref).await? else {
                continue;
            };
            groups.entry((notification.user, dispatch.channel)).or_default().push(dispatch);
        }

        let mut sent = 0;
        for ((_, channel), rows) in groups {
            if rows.len() == 1 {
                let row = &rows[0];
                match self.send_single(row.id, notifications, now).await {
                    Ok(()) => sent += 1,
                    Err(err) => warn!(dispatch_id = %row.id, error = %err, "single send failed, will retry next pass"),
                }
                continue;
            }

            let address = rows[0].address.clone();
            let batch_spec = rows[0].batch_spec.clone();
            let ids: Vec<NotificationDispatchId> = rows.iter().map(|d| d.id).collect();
            match self.delivery.deliver_batch(channel, &address, &batch_spec, &ids).await {
                Ok(()) => {
                    for id in &ids {
                        notifications.mark_sent(*id, now).await?;
                    }
                    sent += ids.len();
                }
                Err(err) => warn!(channel = %channel, address = %address, error = %err, "batch send failed, will retry next pass"),
            }
        }
        Ok(sent)
    }
}
