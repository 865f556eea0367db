// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The operation→result→action transition binder (§4.5).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use smol_str::SmolStr;
use wfe_core::{ActionId, ActivityEvent, ConfigError, EventId, EventStore, NotFoundError, OperationId, ResourceRef, ResultId};
use wfe_fsm::{PerformOutcome, StateChanger};

/// Registration key: `(iface, operation, result)`. Bindings are looked up
/// by walking the capability chain most-specific first, mirroring the FSM
/// rule lookup of §4.2.
#[derive(Debug, Default, Clone)]
pub struct TransitionBinder {
    bindings: HashMap<String, HashMap<(OperationId, ResultId), ActionId>>,
}

impl TransitionBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `after(iface, operation, result, action)`. Registering the
    /// same `(iface, operation, result)` twice is a [`ConfigError`] — the
    /// binder has the same "no silent overwrite" discipline as the FSM rule
    /// compiler (§4.2).
    pub fn after(
        &mut self,
        iface: &str,
        operation: OperationId,
        result: ResultId,
        action: ActionId,
    ) -> Result<&mut Self, ConfigError> {
        let by_iface = self.bindings.entry(iface.to_string()).or_default();
        let key = (operation.clone(), result.clone());
        if let Some(existing) = by_iface.get(&key) {
            if *existing != action {
                return Err(ConfigError::DuplicateRule {
                    iface: iface.to_string(),
                    action: format!("{operation}/{result}"),
                    from_state: String::new(),
                    existing: existing.to_string(),
                    new: action.to_string(),
                });
            }
        }
        by_iface.insert(key, action);
        Ok(self)
    }

    fn resolve(&self, capability_chain: &[SmolStr], operation: &OperationId, result: &ResultId) -> Option<ActionId> {
        for iface in capability_chain {
            if let Some(by_iface) = self.bindings.get(iface.as_str()) {
                if let Some(action) = by_iface.get(&(operation.clone(), result.clone())) {
                    return Some(action.clone());
                }
            }
        }
        None
    }

    /// Applies `POST /results/<type>/<id>` (§4.5): find the first matching
    /// binding walking the capability chain and perform the bound action
    /// against the referenced event. `Ok(None)` means "no binding" — the
    /// caller maps that to `204`, distinct from the `404`s that `perform`
    /// itself can raise.
    #[allow(clippy::too_many_arguments)]
    pub async fn apply(
        &self,
        state_changer: &StateChanger<'_>,
        events: &dyn EventStore,
        ctx: &ResourceRef,
        capability_chain: &[SmolStr],
        operation: OperationId,
        result: ResultId,
        event_id: EventId,
        now: DateTime<Utc>,
    ) -> Result<Option<PerformOutcome>, wfe_core::EngineError> {
        let Some(action) = self.resolve(capability_chain, &operation, &result) else {
            return Ok(None);
        };
        let event = events
            .get_event(event_id)
            .await?
            .ok_or(NotFoundError::Event(event_id.get()))?;
        let outcome = state_changer.perform(ctx, capability_chain, action, &event, now).await?;
        Ok(Some(outcome))
    }
}
