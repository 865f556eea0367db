// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared request state (§5: resources are shared across the request
//! task and the background executor loop, hence everything is behind
//! `Arc`).

use std::sync::Arc;

use wfe_core::{EventStore, NotificationStore, ResourceStore};
use wfe_dispatch::DeliveryBackend;
use wfe_engine::{AddressBook, WorkflowEngine};

use crate::config::EngineConfig;

pub struct AppState<S> {
    pub store: Arc<S>,
    pub engine: Arc<WorkflowEngine>,
    pub delivery: Arc<dyn DeliveryBackend>,
    pub views: Arc<dyn wfe_core::ViewResolver>,
    pub addresses: Arc<dyn AddressBook>,
    pub config: Arc<EngineConfig>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            engine: self.engine.clone(),
            delivery: self.delivery.clone(),
            views: self.views.clone(),
            addresses: self.addresses.clone(),
            config: self.config.clone(),
        }
    }
}

/// Bound satisfied by any store implementing all three repository seams
/// (both `wfe-storage` backends do).
pub trait Store: ResourceStore + EventStore + NotificationStore {}
impl<T: ResourceStore + EventStore + NotificationStore> Store for T {}
