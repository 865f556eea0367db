// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The compiled form of a set of `allow(...)` rules (§4.2): per-iface,
//! per-action maps from concrete from-state to to-state, plus an optional
//! wildcard fallback. Concrete rules always win over the wildcard.

use std::collections::HashMap;
use wfe_core::{ActionId, StateId};

use crate::rule::ToState;

#[derive(Debug, Default, Clone)]
pub(crate) struct CompiledAction {
    pub(crate) concrete: HashMap<StateId, ToState>,
    pub(crate) wildcard: Option<ToState>,
}

impl CompiledAction {
    /// The rule's effective target from `current`, if the action is
    /// permitted at all from that state.
    pub(crate) fn resolve(&self, current: &StateId) -> Option<ToState> {
        self.concrete.get(current).cloned().or_else(|| self.wildcard.clone())
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct CompiledMachine {
    pub(crate) actions: HashMap<ActionId, CompiledAction>,
}
