// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Selectors, grounded in the original's `ParamAwareSubscriber` (matches
//! one concrete value) and `AsterixSubscriber` (matches everything).

use wfe_core::{ActionId, NoticeKind, StateId};

/// What a subscription is registered against (§4.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    State(StateId),
    Action(ActionId),
    Any,
}

impl Selector {
    pub fn matches(&self, kind: &NoticeKind) -> bool {
        match (self, kind) {
            (Selector::Any, _) => true,
            (Selector::State(want), NoticeKind::Changed(got)) => want == got,
            (Selector::Action(want), NoticeKind::Happened(got)) => want == got,
            _ => false,
        }
    }
}

impl From<StateId> for Selector {
    fn from(state: StateId) -> Self {
        Selector::State(state)
    }
}

impl From<ActionId> for Selector {
    fn from(action: ActionId) -> Self {
        Selector::Action(action)
    }
}
