// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-user notification batching (§4.7, §4.8): registration, role/address
//! resolution, due-time normalisation, and the periodic/single send paths.

pub mod due;
pub mod executor;
pub mod factory;
pub mod registry;
pub mod spec;

pub use executor::NotificationExecutor;
pub use factory::{AddressBook, NotificationFactory};
pub use registry::NotificationRegistry;
pub use spec::{ChannelMapping, NotificationSpec};
