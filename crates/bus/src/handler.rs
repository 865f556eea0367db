// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The handler contract invoked by the subscription bus (§4.4).

use wfe_core::{ActivityEvent, Dispatch, HandlerError, OperationId, ResourceRef};

/// Dispatches produced by a handler, grouped by the operation they belong
/// to (operations without a grouping use `None`). An `Err` is isolated by
/// the bus: logged and treated as an empty outcome (§4.4, §7).
pub type HandlerOutcome = Result<Vec<(Option<OperationId>, Vec<Dispatch>)>, HandlerError>;

/// A subscription bus handler. Synchronous: a handler only *describes* the
/// outbound tasks a notice should produce (§4.6 owns actually sending
/// them), mirroring the original's subscribers, which build hook payloads
/// rather than perform I/O themselves.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &ResourceRef, event: &ActivityEvent, operation: Option<OperationId>) -> HandlerOutcome;

    /// A short name used in logs when this handler fails (§7).
    fn name(&self) -> &str;
}

/// Wrap a plain closure as a [`Handler`].
pub struct FnHandler<F> {
    name: String,
    f: F,
}

impl<F> FnHandler<F>
where
    F: Fn(&ResourceRef, &ActivityEvent, Option<OperationId>) -> HandlerOutcome + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F> Handler for FnHandler<F>
where
    F: Fn(&ResourceRef, &ActivityEvent, Option<OperationId>) -> HandlerOutcome + Send + Sync,
{
    fn handle(&self, ctx: &ResourceRef, event: &ActivityEvent, operation: Option<OperationId>) -> HandlerOutcome {
        (self.f)(ctx, event, operation)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
