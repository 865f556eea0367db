// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The view-rendering seam (§1: "email rendering... deliberately excluded").
//!
//! `ViewResolver` turns a `NotificationDispatch`'s `view` spec into the
//! JSON payload handed to the channel's single/batch endpoint. The engine
//! nucleus never interprets `view` itself — a caller supplies a resolver
//! backed by whatever templating system the application already uses.

use crate::error::EngineError;
use crate::notification::NotificationDispatch;

#[async_trait::async_trait]
pub trait ViewResolver: Send + Sync {
    async fn render(&self, dispatch: &NotificationDispatch) -> Result<serde_json::Value, EngineError>;
}
