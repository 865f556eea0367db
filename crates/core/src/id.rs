// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Integer identifier newtypes for append-only history rows.
//!
//! `ActivityEvent`, `WorkStatus`, `Notification` and `NotificationDispatch`
//! rows are all identified by a database-assigned `i64`. Wrapping each in
//! its own type keeps e.g. an event id from being passed where a dispatch
//! id is expected.

/// Define a newtype identifier wrapping `i64`.
///
/// Generates `Display`, `From<i64>`, `Serialize`/`Deserialize` (transparent),
/// and ordering so that rows can be sorted by id as a tiebreaker.
///
/// ```ignore
/// define_int_id! {
///     /// Doc comment for the ID type.
///     pub struct EventId;
/// }
/// ```
#[macro_export]
macro_rules! define_int_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::define_int_id! {
        /// Test id type.
        pub struct TestId;
    }

    #[test]
    fn orders_by_value() {
        let mut ids = vec![TestId::new(3), TestId::new(1), TestId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![TestId::new(1), TestId::new(2), TestId::new(3)]);
    }

    #[test]
    fn displays_as_integer() {
        assert_eq!(TestId::new(42).to_string(), "42");
    }
}
