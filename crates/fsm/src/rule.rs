// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The declarative shape of an `allow(...)` rule, before compilation.

use wfe_core::StateId;

/// The `from_states` argument to `allow(...)`: a concrete set, or the `ANY`
/// wildcard.
#[derive(Debug, Clone)]
pub enum FromStates {
    Any,
    Set(Vec<StateId>),
}

impl FromStates {
    pub fn one(state: StateId) -> Self {
        FromStates::Set(vec![state])
    }
}

impl From<StateId> for FromStates {
    fn from(state: StateId) -> Self {
        FromStates::one(state)
    }
}

impl From<Vec<StateId>> for FromStates {
    fn from(states: Vec<StateId>) -> Self {
        FromStates::Set(states)
    }
}

/// The `to_state` argument: a concrete target, or `KEEP` (no-op).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToState {
    Keep,
    State(StateId),
}

impl From<StateId> for ToState {
    fn from(state: StateId) -> Self {
        ToState::State(state)
    }
}

impl std::fmt::Display for ToState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToState::Keep => write!(f, "KEEP"),
            ToState::State(state) => write!(f, "{state}"),
        }
    }
}
