// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy (§7).
//!
//! `ConfigError` is fatal at start-up. `InvalidTransition`, `NotFoundError`
//! and `ValidationError` are surfaced to the caller with the status codes
//! in §6's route table via [`EngineError::status_code`]. `TransportError`
//! is logged and returned to the caller; the durable queue owns retries.
//! `HandlerError` never reaches `EngineError` — it is isolated inside the
//! subscription bus and only ever logged (§4.4, §7).

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("namespace {namespace} is finalised, cannot register new symbol {symbol:?}")]
    NamespaceFinalised { namespace: &'static str, symbol: String },

    #[error("unknown symbol {symbol:?} in namespace {namespace}")]
    UnknownSymbol { namespace: &'static str, symbol: String },

    #[error(
        "duplicate rule for ({iface}, {action}, {from_state}): \
         already maps to {existing}, cannot also map to {new}"
    )]
    DuplicateRule { iface: String, action: String, from_state: String, existing: String, new: String },

    #[error("resource type {0:?} already registered")]
    DuplicateResourceType(String),

    #[error("rule references unknown from-state {0:?}")]
    UnknownFromState(String),

    #[error("rule references unknown to-state {0:?}")]
    UnknownToState(String),
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("action {action} not permitted for {resource} in state {state:?}")]
pub struct InvalidTransition {
    pub resource: String,
    pub action: String,
    pub state: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("resource {type_tag}/{id} not found")]
    Resource { type_tag: String, id: i64 },

    #[error("event {0} not found")]
    Event(i64),

    #[error("notification dispatch {0} not found")]
    Dispatch(i64),

    #[error("no binding registered for ({iface}, {operation}, {result})")]
    NoBinding { iface: String, operation: String, result: String },
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("malformed json: {0}")]
    MalformedJson(String),

    #[error("missing field {0:?}")]
    MissingField(&'static str),

    #[error("invalid value for {field:?}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, thiserror::Error, Clone)]
#[error("transport error calling {url}: {reason}")]
pub struct TransportError {
    pub url: String,
    pub reason: String,
}

#[derive(Debug, thiserror::Error, Clone)]
#[error("handler {handler} failed: {reason}")]
pub struct HandlerError {
    pub handler: String,
    pub reason: String,
}

/// Aggregate error returned by engine operations, mapped to an HTTP status
/// by the ingress layer. Deliberately excludes [`HandlerError`], which is
/// isolated per-handler and never propagates past the subscription bus.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("storage error: {0}")]
    Storage(String),
}

impl EngineError {
    /// HTTP status code per §6's route table / §7's propagation policy.
    pub fn status_code(&self) -> u16 {
        match self {
            EngineError::Config(_) => 500,
            EngineError::InvalidTransition(_) => 400,
            EngineError::NotFound(_) => 404,
            EngineError::Validation(_) => 400,
            EngineError::Transport(_) => 502,
            EngineError::Storage(_) => 500,
        }
    }
}
