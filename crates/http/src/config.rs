// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the HTTP server (§6A).
//!
//! Mirrors the original's `util.get_var(canonical, legacy)`: the canonical
//! name wins when both are set, otherwise the legacy name is tried second.

/// Parsed once at start-up and treated as immutable thereafter.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// `None` disables the auth check entirely (§6: "unauthenticated
    /// requests receive 401 unless no key is configured").
    pub api_key: Option<String>,
    pub engine_url: String,
    pub torque_api_key: Option<String>,
    pub torque_url: String,
    pub webhooks_api_key: Option<String>,
    pub webhooks_url: String,
    pub database_url: String,
    pub default_state: wfe_core::StateId,
}

fn get_var(canonical: &str, legacy: &str) -> Option<String> {
    std::env::var(canonical).ok().or_else(|| std::env::var(legacy).ok()).filter(|s| !s.is_empty())
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, EnvError> {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| EnvError::Missing("DATABASE_URL"))?;
        let default_state = std::env::var("ENGINE_DEFAULT_STATE")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|raw| parse_qualified_state(&raw))
            .unwrap_or_else(|| Ok(wfe_core::StateId::from_symbol("CREATED")))?;

        Ok(Self {
            api_key: get_var("ENGINE_API_KEY", "WORKFLOW_ENGINE_API_KEY"),
            engine_url: get_var("ENGINE_URL", "WORKFLOW_ENGINE_URL").unwrap_or_else(|| "/engine".to_string()),
            torque_api_key: std::env::var("TORQUE_API_KEY").ok().filter(|s| !s.is_empty()),
            torque_url: std::env::var("TORQUE_URL").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| "/ntorque".to_string()),
            webhooks_api_key: get_var("WEBHOOKS_API_KEY", "FABBED_HOOKS_API_KEY"),
            webhooks_url: get_var("WEBHOOKS_URL", "FABBED_HOOKS_URL").unwrap_or_else(|| "/hooks".to_string()),
            database_url,
            default_state,
        })
    }
}

fn parse_qualified_state(raw: &str) -> Result<wfe_core::StateId, EnvError> {
    use wfe_core::NamespacedId;
    wfe_core::StateId::from_qualified(raw).ok_or(EnvError::InvalidDefaultState(raw.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("ENGINE_DEFAULT_STATE {0:?} is not a qualified state symbol (expected \"state:SYMBOL\")")]
    InvalidDefaultState(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_all() {
        for key in [
            "ENGINE_API_KEY",
            "WORKFLOW_ENGINE_API_KEY",
            "ENGINE_URL",
            "WORKFLOW_ENGINE_URL",
            "TORQUE_API_KEY",
            "TORQUE_URL",
            "WEBHOOKS_API_KEY",
            "FABBED_HOOKS_API_KEY",
            "WEBHOOKS_URL",
            "FABBED_HOOKS_URL",
            "DATABASE_URL",
            "ENGINE_DEFAULT_STATE",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn canonical_name_wins_over_legacy() {
        clear_all();
        std::env::set_var("DATABASE_URL", "postgres://x");
        std::env::set_var("ENGINE_API_KEY", "canonical");
        std::env::set_var("WORKFLOW_ENGINE_API_KEY", "legacy");
        let cfg = EngineConfig::from_env().unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("canonical"));
        clear_all();
    }

    #[test]
    #[serial]
    fn legacy_name_used_when_canonical_absent() {
        clear_all();
        std::env::set_var("DATABASE_URL", "postgres://x");
        std::env::set_var("WORKFLOW_ENGINE_URL", "/legacy-engine");
        let cfg = EngineConfig::from_env().unwrap();
        assert_eq!(cfg.engine_url, "/legacy-engine");
        clear_all();
    }

    #[test]
    #[serial]
    fn missing_api_key_disables_auth() {
        clear_all();
        std::env::set_var("DATABASE_URL", "postgres://x");
        let cfg = EngineConfig::from_env().unwrap();
        assert!(cfg.api_key.is_none());
        clear_all();
    }

    #[test]
    #[serial]
    fn missing_database_url_is_an_error() {
        clear_all();
        assert!(matches!(EngineConfig::from_env().unwrap_err(), EnvError::Missing("DATABASE_URL")));
    }
}
