// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier namespaces (§4.1).
//!
//! Each namespace (`state`, `action`, `operation`, `result`) maps a short
//! symbol to the fully-qualified wire value `"<ns>:<SYMBOL>"`.
//! Registrations are append-only until [`Namespace::finalise`] is called;
//! re-registering an existing symbol is a no-op, and registering a new
//! symbol after finalisation is a [`ConfigError`].

use crate::error::ConfigError;
use smol_str::SmolStr;
use std::collections::HashSet;
use std::marker::PhantomData;

/// Sentinel written as `*` in rule definitions: matches any from-state.
pub const ANY_SYMBOL: &str = "*";
/// Sentinel meaning "do not change the current state".
pub const KEEP_SYMBOL: &str = "KEEP";

/// A qualified identifier belonging to a specific namespace.
pub trait NamespacedId: Sized + Clone + std::fmt::Debug {
    const NS: &'static str;

    fn from_symbol(symbol: &str) -> Self;
}

/// Define a qualified id type for one namespace.
///
/// ```ignore
/// define_ns_id! { pub struct StateId("state"); }
/// ```
#[macro_export]
macro_rules! define_ns_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($ns:literal);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(smol_str::SmolStr);

        impl $name {
            pub const NS: &'static str = $ns;

            /// Parse an already-qualified wire value, e.g. `"state:CREATED"`.
            pub fn from_qualified(qualified: &str) -> Option<Self> {
                let (ns, _local) = qualified.split_once(':')?;
                if ns == Self::NS {
                    Some(Self(smol_str::SmolStr::new(qualified)))
                } else {
                    None
                }
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }

            /// The unqualified local symbol, e.g. `"CREATED"`.
            pub fn local(&self) -> &str {
                self.0.split_once(':').map(|(_, s)| s).unwrap_or(self.0.as_str())
            }
        }

        impl $crate::ns::NamespacedId for $name {
            const NS: &'static str = $ns;

            fn from_symbol(symbol: &str) -> Self {
                Self(smol_str::SmolStr::new(format!("{}:{}", $ns, symbol)))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_qualified(s).ok_or_else(|| format!("not a {} id: {:?}", $ns, s))
            }
        }
    };
}

define_ns_id! {
    /// A qualified state symbol, e.g. `"state:CREATED"`.
    pub struct StateId("state");
}
define_ns_id! {
    /// A qualified action symbol, e.g. `"action:START"`.
    pub struct ActionId("action");
}
define_ns_id! {
    /// A qualified operation symbol, e.g. `"operation:DOIT"`.
    pub struct OperationId("operation");
}
define_ns_id! {
    /// A qualified result symbol, e.g. `"result:SUCCESS"`.
    pub struct ResultId("result");
}

/// An append-only-until-finalised registry of symbols for one namespace.
#[derive(Debug)]
pub struct Namespace<T> {
    finalised: bool,
    symbols: HashSet<SmolStr>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for Namespace<T> {
    fn default() -> Self {
        Self { finalised: false, symbols: HashSet::new(), _marker: PhantomData }
    }
}

impl<T: NamespacedId> Namespace<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register symbols. Re-registering an existing symbol is a no-op;
    /// registering a new symbol after [`finalise`](Self::finalise) fails.
    pub fn register(&mut self, symbols: &[&str]) -> Result<(), ConfigError> {
        for &symbol in symbols {
            if self.symbols.contains(symbol) {
                continue;
            }
            if self.finalised {
                return Err(ConfigError::NamespaceFinalised {
                    namespace: T::NS,
                    symbol: symbol.to_string(),
                });
            }
            self.symbols.insert(SmolStr::new(symbol));
        }
        Ok(())
    }

    pub fn finalise(&mut self) {
        self.finalised = true;
    }

    pub fn is_finalised(&self) -> bool {
        self.finalised
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn lookup(&self, symbol: &str) -> Result<T, ConfigError> {
        if self.symbols.contains(symbol) {
            Ok(T::from_symbol(symbol))
        } else {
            Err(ConfigError::UnknownSymbol { namespace: T::NS, symbol: symbol.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent() {
        let mut ns: Namespace<StateId> = Namespace::new();
        ns.register(&["CREATED"]).unwrap();
        ns.register(&["CREATED"]).unwrap();
        assert!(ns.contains("CREATED"));
    }

    #[test]
    fn register_after_finalise_fails_for_new_symbol() {
        let mut ns: Namespace<StateId> = Namespace::new();
        ns.register(&["CREATED"]).unwrap();
        ns.finalise();
        // Re-registering an already-known symbol is still a no-op.
        assert!(ns.register(&["CREATED"]).is_ok());
        // A genuinely new symbol is rejected.
        let err = ns.register(&["STARTED"]).unwrap_err();
        assert!(matches!(err, ConfigError::NamespaceFinalised { .. }));
    }

    #[test]
    fn lookup_unknown_symbol_fails() {
        let ns: Namespace<StateId> = Namespace::new();
        let err = ns.lookup("NOPE").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSymbol { .. }));
    }

    #[test]
    fn qualified_round_trip() {
        let mut ns: Namespace<StateId> = Namespace::new();
        ns.register(&["CREATED"]).unwrap();
        let id = ns.lookup("CREATED").unwrap();
        assert_eq!(id.as_str(), "state:CREATED");
        assert_eq!(id.local(), "CREATED");
        assert_eq!(StateId::from_qualified("state:CREATED").unwrap(), id);
    }
}
