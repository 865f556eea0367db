// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wfe-core: data model, identifier namespaces, error taxonomy, and
//! repository interfaces shared by every other `wfe-*` crate.

pub mod macros;

pub mod clock;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod id;
pub mod notice;
pub mod notification;
pub mod ns;
pub mod resource;
pub mod role;
pub mod store;
pub mod view;
pub mod work_status;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use dispatch::Dispatch;
pub use error::{ConfigError, EngineError, HandlerError, InvalidTransition, NotFoundError, ValidationError};
pub use event::{ActivityEvent, EventId};
pub use notice::{NoticeKind, NoticePublisher};
pub use notification::{
    Channel, Frequency, Notification, NotificationDispatch, NotificationDispatchId, NotificationId,
    NotificationPreference,
};
pub use ns::{ActionId, Namespace, NamespacedId, OperationId, ResultId, StateId, ANY_SYMBOL, KEEP_SYMBOL};
pub use resource::{ResourceRef, ResourceRegistry, UserRef};
pub use role::{RoleRegistry, RoleSelector};
pub use store::{EventStore, NotificationStore, ResourceStore};
pub use view::ViewResolver;
pub use work_status::{current_of, WorkStatus, WorkStatusId};
