// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-interface `add_notification` registrations, matched the same way
//! the subscription bus matches handlers (§4.4, §4.7): capability chain
//! most specific first, registration order within an interface.

use std::collections::HashMap;

use smol_str::SmolStr;
use wfe_core::NoticeKind;

use super::spec::NotificationSpec;

#[derive(Debug, Default)]
pub struct NotificationRegistry {
    by_iface: HashMap<String, Vec<NotificationSpec>>,
}

impl NotificationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_notification(&mut self, iface: &str, spec: NotificationSpec) {
        self.by_iface.entry(iface.to_string()).or_default().push(spec);
    }

    /// Every registered spec whose selector matches `kind`, walking
    /// `capability_chain` most-specific first and preserving per-interface
    /// registration order within each step. Paired with the interface it
    /// was registered against, since role resolution is keyed on that
    /// interface too (§3's `get_roles_mapping(iface)`).
    pub fn matching<'a>(&'a self, capability_chain: &[SmolStr], kind: &NoticeKind) -> Vec<(&'a str, &'a NotificationSpec)> {
        let mut out = Vec::new();
        for iface in capability_chain {
            if let Some(specs) = self.by_iface.get(iface.as_str()) {
                out.extend(specs.iter().filter(|spec| spec.selector.matches(kind)).map(|spec| (iface.as_str(), spec)));
            }
        }
        out
    }
}
