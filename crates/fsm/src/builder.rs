// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Accumulates `allow(...)` rules and compiles them into an [`Engine`].

use std::collections::HashMap;
use wfe_core::{ActionId, ConfigError, StateId};

use crate::compiled::{CompiledAction, CompiledMachine};
use crate::engine::Engine;
use crate::rule::{FromStates, ToState};

#[derive(Default)]
pub struct EngineBuilder {
    machines: HashMap<String, CompiledMachine>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one `allow(iface, action, from_states, to_state)` rule.
    /// Fails with [`ConfigError::DuplicateRule`] if `(iface, action,
    /// concrete-from-state)` has already been mapped to a different
    /// `to_state` (§4.2 "compilation rule").
    pub fn allow(
        &mut self,
        iface: &str,
        action: ActionId,
        from: impl Into<FromStates>,
        to: impl Into<ToState>,
    ) -> Result<&mut Self, ConfigError> {
        let to = to.into();
        let machine = self.machines.entry(iface.to_string()).or_default();
        let compiled = machine.actions.entry(action.clone()).or_default();

        match from.into() {
            FromStates::Any => {
                // Re-registering a wildcard for the same (iface, action) is
                // always a conflict, even if the to-state is identical
                // (§4.2 "compilation rule" — registering the same rule
                // twice still fails compilation).
                if let Some(existing) = &compiled.wildcard {
                    return Err(ConfigError::DuplicateRule {
                        iface: iface.to_string(),
                        action: action.to_string(),
                        from_state: "*".to_string(),
                        existing: existing.to_string(),
                        new: to.to_string(),
                    });
                }
                compiled.wildcard = Some(to);
            }
            FromStates::Set(states) => {
                for state in states {
                    insert_concrete(compiled, iface, &action, state, to.clone())?;
                }
            }
        }
        Ok(self)
    }

    pub fn build(self) -> Engine {
        Engine::new(self.machines)
    }
}

fn insert_concrete(
    compiled: &mut CompiledAction,
    iface: &str,
    action: &ActionId,
    state: StateId,
    to: ToState,
) -> Result<(), ConfigError> {
    match compiled.concrete.get(&state) {
        // Re-registering the same (iface, action, concrete-from-state) is a
        // conflict even when `to` matches the existing rule exactly (§4.2,
        // §8 scenario 5: registering the identical rule twice still fails).
        Some(existing) => Err(ConfigError::DuplicateRule {
            iface: iface.to_string(),
            action: action.to_string(),
            from_state: state.to_string(),
            existing: existing.to_string(),
            new: to.to_string(),
        }),
        None => {
            compiled.concrete.insert(state, to);
            Ok(())
        }
    }
}
