// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The compiled rule set plus the `state_changer.perform(...)` evaluator
//! (§4.2).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use smol_str::SmolStr;
use tracing::{debug, instrument};
use wfe_core::{
    ActionId, ActivityEvent, Dispatch, EngineError, EventStore, NoticeKind, NoticePublisher,
    NotFoundError, InvalidTransition, ResourceRef, ResourceStore, StateId,
};

use crate::compiled::CompiledMachine;
use crate::rule::ToState;

/// Rules compiled by [`crate::builder::EngineBuilder::build`]. Stateless and
/// cheap to share (e.g. behind an `Arc`) across requests.
#[derive(Debug, Default, Clone)]
pub struct Engine {
    machines: HashMap<String, CompiledMachine>,
}

/// The outcome of a successful `perform` (§4.2 step 5).
#[derive(Debug, Clone)]
pub struct PerformOutcome {
    pub next_state: StateId,
    pub changed: bool,
    pub dispatches: Vec<Dispatch>,
}

impl Engine {
    pub(crate) fn new(machines: HashMap<String, CompiledMachine>) -> Self {
        Self { machines }
    }

    /// Most-specific-first lookup of the machine exposing `action` across
    /// `capability_chain` (§4.2 "Lookup").
    fn resolve_to(
        &self,
        capability_chain: &[SmolStr],
        action: &ActionId,
        current: &StateId,
    ) -> Option<ToState> {
        for iface in capability_chain {
            if let Some(machine) = self.machines.get(iface.as_str()) {
                if let Some(compiled) = machine.actions.get(action) {
                    if let Some(to) = compiled.resolve(current) {
                        return Some(to);
                    }
                }
            }
        }
        None
    }
}

/// Request-scoped facade binding a compiled [`Engine`] to concrete stores
/// and a notice publisher. Mirrors the original's `request.state_changer`:
/// stateless itself, constructed fresh per call.
pub struct StateChanger<'a> {
    engine: &'a Engine,
    resources: &'a dyn ResourceStore,
    events: &'a dyn EventStore,
    notices: &'a dyn NoticePublisher,
}

impl<'a> StateChanger<'a> {
    pub fn new(
        engine: &'a Engine,
        resources: &'a dyn ResourceStore,
        events: &'a dyn EventStore,
        notices: &'a dyn NoticePublisher,
    ) -> Self {
        Self { engine, resources, events, notices }
    }

    /// True iff a machine matches `action` for `ctx` and its current state
    /// appears in the rule's from-set (or the rule matches `ANY`).
    pub async fn can_perform(
        &self,
        ctx: &ResourceRef,
        capability_chain: &[SmolStr],
        action: &ActionId,
    ) -> Result<bool, EngineError> {
        let Some(current) = self.events.current_status(ctx).await? else {
            return Ok(false);
        };
        Ok(self.engine.resolve_to(capability_chain, action, &current.value).is_some())
    }

    /// Atomic transition step (§4.2's numbered contract).
    #[instrument(skip(self, event), fields(ctx = %ctx, action = %action))]
    pub async fn perform(
        &self,
        ctx: &ResourceRef,
        capability_chain: &[SmolStr],
        action: ActionId,
        event: &ActivityEvent,
        now: DateTime<Utc>,
    ) -> Result<PerformOutcome, EngineError> {
        if !self.resources.exists(ctx).await? {
            return Err(NotFoundError::Resource { type_tag: ctx.type_tag.to_string(), id: ctx.id }.into());
        }

        let current = self
            .events
            .current_status(ctx)
            .await?
            .ok_or_else(|| InvalidTransition {
                resource: ctx.to_string(),
                action: action.to_string(),
                state: None,
            })?;

        let to = self.engine.resolve_to(capability_chain, &action, &current.value).ok_or_else(|| {
            InvalidTransition {
                resource: ctx.to_string(),
                action: action.to_string(),
                state: Some(current.value.to_string()),
            }
        })?;

        let next_state = match to {
            ToState::Keep => current.value.clone(),
            ToState::State(state) => state,
        };
        let changed = next_state != current.value;

        let mut dispatches = Vec::new();

        if changed {
            let derived_action = next_state.local().to_ascii_lowercase();
            let derived = self
                .events
                .create_event(
                    ctx.clone(),
                    event.user,
                    ctx.type_tag.as_str(),
                    &derived_action,
                    serde_json::json!({}),
                    now,
                )
                .await?;
            self.events.set_work_status(ctx.clone(), next_state.clone(), Some(derived.id), now).await?;
            debug!(to = %next_state, "state changed");
            dispatches.extend(
                self.notices.publish(ctx, capability_chain, NoticeKind::Changed(next_state.clone()), &derived, None).await,
            );
        }

        dispatches.extend(
            self.notices.publish(ctx, capability_chain, NoticeKind::Happened(action), event, None).await,
        );

        Ok(PerformOutcome { next_state, changed, dispatches })
    }
}
