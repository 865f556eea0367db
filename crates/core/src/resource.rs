// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource type registry (§3, §4.1 "Resource registry").
//!
//! A resource is identified by its `type_tag` (table name) and an integer
//! `id`. Its capability chain is an ordered list of interface tags, most
//! specific first, looked up by the FSM evaluator and the subscription bus
//! to find the most specific compiled machine / handler for a context.

use crate::error::ConfigError;
use crate::id::define_int_id;
use smol_str::SmolStr;
use std::collections::HashMap;

define_int_id! {
    /// Identifies a user known to the hosting application.
    pub struct UserRef;
}

/// A reference to a resource instance: its type tag and integer id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ResourceRef {
    pub type_tag: SmolStr,
    pub id: i64,
}

impl ResourceRef {
    pub fn new(type_tag: impl Into<SmolStr>, id: i64) -> Self {
        Self { type_tag: type_tag.into(), id }
    }
}

impl std::fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.type_tag, self.id)
    }
}

/// Per-type-tag configuration: its capability chain (most specific first).
#[derive(Debug, Clone)]
pub struct ResourceTypeConfig {
    pub type_tag: SmolStr,
    pub capabilities: Vec<SmolStr>,
}

/// Maps resource type tags to their declared capability chains.
///
/// Built once at configuration time and treated as immutable thereafter
/// (§5 "Shared resources").
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    types: HashMap<SmolStr, ResourceTypeConfig>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource type with its capability chain, most-specific
    /// interface first. Registering the same `type_tag` twice is a
    /// [`ConfigError`].
    pub fn register(&mut self, type_tag: &str, capabilities: &[&str]) -> Result<(), ConfigError> {
        if self.types.contains_key(type_tag) {
            return Err(ConfigError::DuplicateResourceType(type_tag.to_string()));
        }
        self.types.insert(
            SmolStr::new(type_tag),
            ResourceTypeConfig {
                type_tag: SmolStr::new(type_tag),
                capabilities: capabilities.iter().map(|&s| SmolStr::new(s)).collect(),
            },
        );
        Ok(())
    }

    /// The capability chain for a type tag, most specific first. Unknown
    /// type tags resolve to a chain containing only themselves, so ad-hoc
    /// resource types used only in tests still dispatch on their own tag.
    pub fn capability_chain(&self, type_tag: &str) -> Vec<SmolStr> {
        match self.types.get(type_tag) {
            Some(cfg) => cfg.capabilities.clone(),
            None => vec![SmolStr::new(type_tag)],
        }
    }

    pub fn is_registered(&self, type_tag: &str) -> bool {
        self.types.contains_key(type_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_chain_most_specific_first() {
        let mut reg = ResourceRegistry::new();
        reg.register("foos", &["IFoo", "IModel"]).unwrap();
        assert_eq!(
            reg.capability_chain("foos"),
            vec![SmolStr::new("IFoo"), SmolStr::new("IModel")]
        );
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut reg = ResourceRegistry::new();
        reg.register("foos", &["IFoo"]).unwrap();
        assert!(reg.register("foos", &["IFoo"]).is_err());
    }

    #[test]
    fn unregistered_type_falls_back_to_itself() {
        let reg = ResourceRegistry::new();
        assert_eq!(reg.capability_chain("bars"), vec![SmolStr::new("bars")]);
    }
}
