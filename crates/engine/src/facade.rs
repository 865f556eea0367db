// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Composes the FSM evaluator, subscription bus, transition binder, and
//! notification factory behind one service object handed to the ingress
//! layer (§9 design note: "two-phase configuration → explicit builder" —
//! callers assemble a `WorkflowEngine` once at start-up and treat it as
//! immutable thereafter).

use chrono::{DateTime, Utc};
use smol_str::SmolStr;
use wfe_bus::SubscriptionBus;
use wfe_core::{
    ActionId, Dispatch, EngineError, EventId, EventStore, NoticeKind, NoticePublisher, NotFoundError,
    NotificationStore, OperationId, ResourceRef, ResourceRegistry, ResourceStore, ResultId, RoleRegistry, StateId,
};
use wfe_fsm::{Engine as FsmEngine, PerformOutcome, StateChanger};

use crate::binder::TransitionBinder;
use crate::notify::{AddressBook, NotificationFactory, NotificationRegistry};

pub struct WorkflowEngine {
    pub resources: ResourceRegistry,
    pub fsm: FsmEngine,
    pub bus: SubscriptionBus,
    pub binder: TransitionBinder,
    pub notifications: NotificationRegistry,
    pub roles: RoleRegistry,
}

impl WorkflowEngine {
    pub fn new(
        resources: ResourceRegistry,
        fsm: FsmEngine,
        bus: SubscriptionBus,
        binder: TransitionBinder,
        notifications: NotificationRegistry,
        roles: RoleRegistry,
    ) -> Self {
        Self { resources, fsm, bus, binder, notifications, roles }
    }

    pub fn capability_chain(&self, type_tag: &str) -> Vec<SmolStr> {
        self.resources.capability_chain(type_tag)
    }

    /// `POST /events/<type>/<id>` (§6): publish the notice named by `kind`
    /// to matching subscription handlers and, independently, materialise
    /// any matching notification rows. Returns the handlers' outbound
    /// tasks; notification rows are a side effect recorded in storage, not
    /// part of this response (§4.7's own delivery path owns sending them).
    #[allow(clippy::too_many_arguments)]
    pub async fn dispatch_event(
        &self,
        resources: &dyn ResourceStore,
        events: &dyn EventStore,
        notifications: &dyn NotificationStore,
        addresses: &dyn AddressBook,
        ctx: &ResourceRef,
        kind: NoticeKind,
        event_id: EventId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Dispatch>, EngineError> {
        if !resources.exists(ctx).await? {
            return Err(NotFoundError::Resource { type_tag: ctx.type_tag.to_string(), id: ctx.id }.into());
        }
        let event = events.get_event(event_id).await?.ok_or(NotFoundError::Event(event_id.get()))?;
        let chain = self.capability_chain(&ctx.type_tag);

        let dispatches = self.bus.publish(ctx, &chain, kind.clone(), &event, None).await;

        let factory = NotificationFactory::new(&self.notifications, &self.roles, addresses);
        factory.on_notice(ctx, &chain, &kind, &event, notifications, now).await?;

        Ok(dispatches)
    }

    /// `POST /results/<type>/<id>` (§6): forwards to the transition binder,
    /// which performs the bound action and publishes its own notices via
    /// `self.bus`.
    pub async fn apply_result(
        &self,
        resources: &dyn ResourceStore,
        events: &dyn EventStore,
        ctx: &ResourceRef,
        operation: OperationId,
        result: ResultId,
        event_id: EventId,
        now: DateTime<Utc>,
    ) -> Result<Option<PerformOutcome>, EngineError> {
        if !resources.exists(ctx).await? {
            return Err(NotFoundError::Resource { type_tag: ctx.type_tag.to_string(), id: ctx.id }.into());
        }
        let chain = self.capability_chain(&ctx.type_tag);
        let changer = StateChanger::new(&self.fsm, resources, events, &self.bus as &dyn NoticePublisher);
        self.binder.apply(&changer, events, ctx, &chain, operation, result, event_id, now).await
    }
}

/// Builds the `NoticeKind` a `/events` request names — exactly one of
/// `state`/`action` must be present (§6).
pub fn notice_kind_from(state: Option<StateId>, action: Option<ActionId>) -> Result<NoticeKind, wfe_core::ValidationError> {
    match (state, action) {
        (Some(state), None) => Ok(NoticeKind::Changed(state)),
        (None, Some(action)) => Ok(NoticeKind::Happened(action)),
        (None, None) => Err(wfe_core::ValidationError::MissingField("state or action")),
        (Some(_), Some(_)) => {
            Err(wfe_core::ValidationError::InvalidValue { field: "state/action", reason: "exactly one of state or action is required".to_string() })
        }
    }
}
