// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sqlx`-backed Postgres store. Queries are plain `sqlx::query`/`query_as`
//! calls rather than the compile-time-checked `query!` macros, so this
//! crate builds without a live `DATABASE_URL` (mirrors the repository
//! pattern used elsewhere in the pack for optional database backends).

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use tracing::instrument;
use wfe_core::{
    ActivityEvent, Channel, EngineError, EventId, EventStore, Frequency, NamespacedId, Notification,
    NotificationDispatch, NotificationDispatchId, NotificationId, NotificationPreference,
    NotificationStore, ResourceRef, ResourceStore, StateId, UserRef, WorkStatus, WorkStatusId,
};

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, EngineError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| EngineError::Storage(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), EngineError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| EngineError::Storage(e.to_string()))
    }
}

fn storage_err(e: sqlx::Error) -> EngineError {
    EngineError::Storage(e.to_string())
}

#[async_trait::async_trait]
impl ResourceStore for PostgresStore {
    #[instrument(skip(self))]
    async fn exists(&self, resource: &ResourceRef) -> Result<bool, EngineError> {
        let row = sqlx::query("SELECT 1 FROM resources WHERE type_tag = $1 AND id = $2")
            .bind(resource.type_tag.as_str())
            .bind(resource.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(row.is_some())
    }
}

fn event_from_row(row: &sqlx::postgres::PgRow) -> Result<ActivityEvent, sqlx::Error> {
    Ok(ActivityEvent {
        id: EventId::new(row.try_get("id")?),
        parent: ResourceRef::new(row.try_get::<String, _>("type_tag")?, row.try_get("resource_id")?),
        user: row.try_get::<Option<i64>, _>("user_id")?.map(UserRef::new),
        target: row.try_get::<String, _>("target")?.into(),
        action: row.try_get::<String, _>("action")?.into(),
        data: row.try_get("data")?,
        created_at: row.try_get("created_at")?,
    })
}

fn status_from_row(row: &sqlx::postgres::PgRow) -> Result<WorkStatus, sqlx::Error> {
    Ok(WorkStatus {
        id: WorkStatusId::new(row.try_get("id")?),
        parent: ResourceRef::new(row.try_get::<String, _>("type_tag")?, row.try_get("resource_id")?),
        value: StateId::from_qualified(&row.try_get::<String, _>("value")?)
            .unwrap_or_else(|| StateId::from_symbol(&row.try_get::<String, _>("value").unwrap_or_default())),
        event_ref: row.try_get::<Option<i64>, _>("event_id")?.map(EventId::new),
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait::async_trait]
impl EventStore for PostgresStore {
    #[instrument(skip(self, data))]
    async fn create_event(
        &self,
        parent: ResourceRef,
        user: Option<UserRef>,
        target: &str,
        action: &str,
        data: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Result<ActivityEvent, EngineError> {
        let row = sqlx::query(
            "INSERT INTO activity_events (type_tag, resource_id, user_id, target, action, data, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, type_tag, resource_id, user_id, target, action, data, created_at",
        )
        .bind(parent.type_tag.as_str())
        .bind(parent.id)
        .bind(user.map(|u| u.get()))
        .bind(target)
        .bind(action)
        .bind(&data)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;
        event_from_row(&row).map_err(storage_err)
    }

    #[instrument(skip(self))]
    async fn get_event(&self, id: EventId) -> Result<Option<ActivityEvent>, EngineError> {
        let row = sqlx::query(
            "SELECT id, type_tag, resource_id, user_id, target, action, data, created_at \
             FROM activity_events WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;
        row.as_ref().map(event_from_row).transpose().map_err(storage_err)
    }

    #[instrument(skip(self))]
    async fn set_work_status(
        &self,
        parent: ResourceRef,
        value: StateId,
        event_ref: Option<EventId>,
        now: DateTime<Utc>,
    ) -> Result<WorkStatus, EngineError> {
        let row = sqlx::query(
            "INSERT INTO work_status (type_tag, resource_id, value, event_id, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, type_tag, resource_id, value, event_id, created_at",
        )
        .bind(parent.type_tag.as_str())
        .bind(parent.id)
        .bind(value.as_str())
        .bind(event_ref.map(|e| e.get()))
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;
        status_from_row(&row).map_err(storage_err)
    }

    #[instrument(skip(self))]
    async fn current_status(&self, parent: &ResourceRef) -> Result<Option<WorkStatus>, EngineError> {
        // The correlated antijoin of §4.3, expressed directly: the row for
        // this resource with no later `(created_at, id)` row beside it.
        let row = sqlx::query(
            "SELECT id, type_tag, resource_id, value, event_id, created_at FROM work_status s1 \
             WHERE type_tag = $1 AND resource_id = $2 \
             AND NOT EXISTS ( \
                 SELECT 1 FROM work_status s2 \
                 WHERE s2.type_tag = s1.type_tag AND s2.resource_id = s1.resource_id \
                 AND (s2.created_at, s2.id) > (s1.created_at, s1.id) \
             )",
        )
        .bind(parent.type_tag.as_str())
        .bind(parent.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;
        row.as_ref().map(status_from_row).transpose().map_err(storage_err)
    }

    #[instrument(skip(self, values))]
    async fn status_query(
        &self,
        type_tag: &str,
        values: &[StateId],
        negate: bool,
    ) -> Result<Vec<ResourceRef>, EngineError> {
        let wanted: Vec<String> = values.iter().map(|v| v.as_str().to_string()).collect();
        let rows = sqlx::query(
            "SELECT resource_id FROM work_status s1 \
             WHERE type_tag = $1 \
             AND NOT EXISTS ( \
                 SELECT 1 FROM work_status s2 \
                 WHERE s2.type_tag = s1.type_tag AND s2.resource_id = s1.resource_id \
                 AND (s2.created_at, s2.id) > (s1.created_at, s1.id) \
             ) \
             AND (value = ANY($2) != $3)",
        )
        .bind(type_tag)
        .bind(&wanted)
        .bind(negate)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;
        rows.into_iter()
            .map(|row| row.try_get::<i64, _>("resource_id").map(|id| ResourceRef::new(type_tag, id)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(storage_err)
    }
}

fn preference_from_row(row: &sqlx::postgres::PgRow) -> Result<NotificationPreference, sqlx::Error> {
    let frequency: Option<String> = row.try_get("frequency")?;
    Ok(NotificationPreference {
        user: UserRef::new(row.try_get("user_id")?),
        channel: channel_from_str(&row.try_get::<String, _>("channel")?),
        frequency: frequency.as_deref().map(frequency_from_str),
    })
}

fn channel_from_str(s: &str) -> Channel {
    match s {
        "sms" => Channel::Sms,
        _ => Channel::Email,
    }
}

fn frequency_from_str(s: &str) -> Frequency {
    match s {
        "daily" => Frequency::Daily,
        _ => Frequency::Hourly,
    }
}

#[async_trait::async_trait]
impl NotificationStore for PostgresStore {
    #[instrument(skip(self))]
    async fn get_or_create_preference(
        &self,
        user: UserRef,
        channel: Channel,
    ) -> Result<NotificationPreference, EngineError> {
        let row = sqlx::query(
            "INSERT INTO notification_preferences (user_id, channel, frequency) VALUES ($1, $2, NULL) \
             ON CONFLICT (user_id, channel) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING user_id, channel, frequency",
        )
        .bind(user.get())
        .bind(channel.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;
        preference_from_row(&row).map_err(storage_err)
    }

    #[instrument(skip(self))]
    async fn create_notification(
        &self,
        user: UserRef,
        event_ref: EventId,
        now: DateTime<Utc>,
    ) -> Result<Notification, EngineError> {
        let row = sqlx::query(
            "INSERT INTO notifications (user_id, event_id, created_at) VALUES ($1, $2, $3) \
             RETURNING id, user_id, event_id, read_at, created_at",
        )
        .bind(user.get())
        .bind(event_ref.get())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;
        Ok(Notification {
            id: NotificationId::new(row.try_get("id").map_err(storage_err)?),
            user: UserRef::new(row.try_get("user_id").map_err(storage_err)?),
            event_ref: EventId::new(row.try_get("event_id").map_err(storage_err)?),
            read_at: row.try_get("read_at").map_err(storage_err)?,
            created_at: row.try_get("created_at").map_err(storage_err)?,
        })
    }

    #[instrument(skip(self))]
    async fn get_notification(&self, id: NotificationId) -> Result<Option<Notification>, EngineError> {
        let row = sqlx::query("SELECT id, user_id, event_id, read_at, created_at FROM notifications WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?;
        row.as_ref()
            .map(|row| {
                Ok::<_, sqlx::Error>(Notification {
                    id: NotificationId::new(row.try_get("id")?),
                    user: UserRef::new(row.try_get("user_id")?),
                    event_ref: EventId::new(row.try_get("event_id")?),
                    read_at: row.try_get("read_at")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .transpose()
            .map_err(storage_err)
    }

    #[instrument(skip(self, view, single_spec, batch_spec, bcc))]
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
        let row = sqlx::query(
            "INSERT INTO notification_dispatches \
             (notification_id, channel, address, view, single_spec, batch_spec, bcc, due) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, notification_id, channel, address, view, single_spec, batch_spec, bcc, due, sent",
        )
        .bind(notification_ref.get())
        .bind(channel.as_str())
        .bind(&address)
        .bind(&view)
        .bind(&single_spec)
        .bind(&batch_spec)
        .bind(&bcc)
        .bind(due)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;
        dispatch_from_row(&row).map_err(storage_err)
    }

    #[instrument(skip(self))]
    async fn get_dispatch(
        &self,
        id: NotificationDispatchId,
    ) -> Result<Option<NotificationDispatch>, EngineError> {
        let row = sqlx::query(
            "SELECT id, notification_id, channel, address, view, single_spec, batch_spec, bcc, due, sent \
             FROM notification_dispatches WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;
        row.as_ref().map(dispatch_from_row).transpose().map_err(storage_err)
    }

    #[instrument(skip(self))]
    async fn due_dispatches(&self, now: DateTime<Utc>) -> Result<Vec<NotificationDispatch>, EngineError> {
        let rows = sqlx::query(
            "SELECT d.id, d.notification_id, d.channel, d.address, d.view, d.single_spec, \
                    d.batch_spec, d.bcc, d.due, d.sent \
             FROM notification_dispatches d \
             JOIN notifications n ON n.id = d.notification_id \
             WHERE d.sent IS NULL AND d.due <= $1 AND n.read_at IS NULL",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;
        rows.iter().map(dispatch_from_row).collect::<Result<Vec<_>, _>>().map_err(storage_err)
    }

    #[instrument(skip(self))]
    async fn mark_sent(&self, id: NotificationDispatchId, at: DateTime<Utc>) -> Result<(), EngineError> {
        sqlx::query("UPDATE notification_dispatches SET sent = $1 WHERE id = $2")
            .bind(at)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(())
    }
}

fn dispatch_from_row(row: &sqlx::postgres::PgRow) -> Result<NotificationDispatch, sqlx::Error> {
    Ok(NotificationDispatch {
        id: NotificationDispatchId::new(row.try_get("id")?),
        notification_ref: NotificationId::new(row.try_get("notification_id")?),
        channel: channel_from_str(&row.try_get::<String, _>("channel")?),
        address: row.try_get("address")?,
        view: row.try_get("view")?,
        single_spec: row.try_get("single_spec")?,
        batch_spec: row.try_get("batch_spec")?,
        bcc: row.try_get("bcc")?,
        due: row.try_get("due")?,
        sent: row.try_get("sent")?,
    })
}
