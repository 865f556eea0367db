// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wfe-dispatch: the outbound task client (§4.6) — a single HTTP POST
//! helper, the durable-queue wire protocol, after-commit buffering vs.
//! direct dispatch, bounded backoff for queue submission, and the channel
//! delivery backend used by the notification executor (§4.8).

pub mod backoff;
pub mod client;
pub mod delivery;
pub mod dispatcher;
pub mod queue;
pub mod result;

pub use client::{HttpClient, PASSTHROUGH_HEADER_PREFIX};
pub use delivery::{DeliveryBackend, HttpDeliveryBackend};
pub use dispatcher::{dispatch_now, flush, TaskBuffer};
pub use queue::{PassthroughAuth, QueueClient};
pub use result::DispatchResult;
