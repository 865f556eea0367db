// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Role mapping, supplemented from the original's `add_roles_mapping` /
//! `get_roles_mapping` directives (§3).
//!
//! A role selector plucks the interested users for a role out of the
//! triggering event's JSON payload rather than re-querying storage — the
//! original resolves roles from already-loaded ORM relations (`context`),
//! and the nearest equivalent here is the event `data` the handler already
//! has in hand.

use crate::resource::UserRef;
use smol_str::SmolStr;
use std::collections::HashMap;
use std::sync::Arc;

pub type RoleSelector = Arc<dyn Fn(&serde_json::Value) -> Vec<UserRef> + Send + Sync>;

/// Per-interface, per-role user selectors, registered once at start-up.
#[derive(Default, Clone)]
pub struct RoleRegistry {
    roles: HashMap<(SmolStr, SmolStr), RoleSelector>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, iface: &str, role: &str, selector: RoleSelector) {
        self.roles.insert((SmolStr::new(iface), SmolStr::new(role)), selector);
    }

    /// Resolve the users interested via `role` for `iface`, given the
    /// triggering event's data. Unregistered (iface, role) pairs resolve to
    /// an empty list rather than an error — a missing role mapping just
    /// means nobody gets notified, not a configuration failure.
    pub fn resolve(&self, iface: &str, role: &str, data: &serde_json::Value) -> Vec<UserRef> {
        match self.roles.get(&(SmolStr::new(iface), SmolStr::new(role))) {
            Some(selector) => selector(data),
            None => Vec::new(),
        }
    }
}
