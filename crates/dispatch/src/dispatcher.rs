// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The two delivery modes of §4.6/§5: buffer-until-commit vs. direct.

use parking_lot::Mutex;
use wfe_core::{Dispatch, EngineError};

use crate::queue::QueueClient;

/// Buffers dispatches for a single request's transaction. The caller is
/// responsible for calling [`Self::drain`] after a successful commit (and
/// handing the result to [`QueueClient::enqueue`]) or [`Self::discard`] on
/// rollback — mirrors the original's `AfterCommitDispatcher`, which hooks
/// Pyramid's transaction manager to do the same.
#[derive(Default)]
pub struct TaskBuffer {
    pending: Mutex<Vec<(String, Dispatch)>>,
}

impl TaskBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, target_base_url: impl Into<String>, dispatch: Dispatch) {
        self.pending.lock().push((target_base_url.into(), dispatch));
    }

    /// Takes every buffered dispatch, clearing the buffer. Call after a
    /// successful commit.
    pub fn drain(&self) -> Vec<(String, Dispatch)> {
        std::mem::take(&mut self.pending.lock())
    }

    /// Drops every buffered dispatch without delivering them. Call on
    /// rollback.
    pub fn discard(&self) {
        self.pending.lock().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

/// Delivers every buffered dispatch to the queue. Call once per request,
/// after the enclosing transaction has committed.
pub async fn flush(queue: &QueueClient, buffer: &TaskBuffer) -> Vec<Result<(), EngineError>> {
    let pending = buffer.drain();
    let mut results = Vec::with_capacity(pending.len());
    for (target, dispatch) in pending {
        let outcome = queue.enqueue(&target, &dispatch).await.map(|_| ());
        if let Err(err) = &outcome {
            tracing::warn!(target = %target, path = %dispatch.path, error = %err, "after-commit dispatch failed");
        }
        results.push(outcome);
    }
    results
}

/// Sends `dispatch` to the queue immediately, bypassing the buffer —
/// used only by the inline notification executor (§5).
pub async fn dispatch_now(queue: &QueueClient, target_base_url: &str, dispatch: Dispatch) -> Result<(), EngineError> {
    queue.enqueue(target_base_url, &dispatch).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_buffer() {
        let buffer = TaskBuffer::new();
        buffer.push("https://example.com", Dispatch::new("/x", serde_json::json!({})));
        assert!(!buffer.is_empty());
        let drained = buffer.drain();
        assert_eq!(drained.len(), 1);
        assert!(buffer.is_empty());
    }

    #[test]
    fn discard_drops_without_returning() {
        let buffer = TaskBuffer::new();
        buffer.push("https://example.com", Dispatch::new("/x", serde_json::json!({})));
        buffer.discard();
        assert!(buffer.is_empty());
    }
}
