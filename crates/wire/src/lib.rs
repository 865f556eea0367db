// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wfe-wire: JSON request/response bodies for the ingress HTTP surface
//! (§6). Kept separate from `wfe-http` so the wire shapes can be reused
//! by a client without pulling in `axum`.

mod request;
mod response;

pub use request::{
    EventRequest, NotificationsBatchRequest, NotificationsDispatchRequest, NotificationsSingleRequest, ResultRequest,
};
pub use response::{ErrorResponse, EventResponse, NotificationsDispatchResponse, ResultResponse};
