// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The seam between the FSM evaluator and the subscription bus (§4.2, §4.4).
//!
//! `wfe-fsm` depends only on [`NoticePublisher`]; `wfe-bus` implements it.
//! Keeping the trait here (rather than in either crate) is what lets the
//! evaluator publish notices without depending on the bus's selector
//! matching, and lets the bus be built and tested without the FSM.

use crate::event::ActivityEvent;
use crate::ns::{ActionId, OperationId, StateId};
use crate::resource::ResourceRef;
use crate::dispatch::Dispatch;
use smol_str::SmolStr;

/// What triggered a notice: a resource settling into a new state, or an
/// action having been performed (which may or may not have changed state,
/// e.g. a `KEEP` transition still "happened").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    Changed(StateId),
    Happened(ActionId),
}

impl NoticeKind {
    /// The bus selector this notice satisfies, e.g. `"state:approved"` or
    /// `"action:submit"` (§4.4).
    pub fn selector(&self) -> String {
        match self {
            NoticeKind::Changed(state) => format!("state:{}", state.local()),
            NoticeKind::Happened(action) => format!("action:{}", action.local()),
        }
    }
}

/// Capability-chain-ordered dispatch of a notice to subscribed handlers.
#[async_trait::async_trait]
pub trait NoticePublisher: Send + Sync {
    /// Invoke every handler subscribed to `kind` (or `*`) across
    /// `capability_chain`, most-specific interface first. Handler failures
    /// are isolated by the implementation and never propagate here —
    /// `perform` must not fail because a subscriber did (§4.4 invariant).
    ///
    /// `operation` is set when the notice follows ingestion of an operation
    /// result (§4.5), so bound handlers can key off it.
    async fn publish(
        &self,
        context: &ResourceRef,
        capability_chain: &[SmolStr],
        kind: NoticeKind,
        event: &ActivityEvent,
        operation: Option<OperationId>,
    ) -> Vec<Dispatch>;
}
