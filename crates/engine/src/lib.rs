// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wfe-engine: the pieces that sit above the FSM evaluator and
//! subscription bus — the operation→result→action transition binder
//! (§4.5) and per-user notification batching (§4.7, §4.8). Neither crate
//! below knows about the other; this is where they're wired together.

pub mod binder;
pub mod facade;
pub mod notify;

pub use binder::TransitionBinder;
pub use facade::{notice_kind_from, WorkflowEngine};
pub use notify::{AddressBook, ChannelMapping, NotificationExecutor, NotificationFactory, NotificationRegistry, NotificationSpec};
