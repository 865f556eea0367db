// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work status history (§3, §4.3).
//!
//! WorkStatus rows are append-only; the *current* status of a resource is
//! the row with the greatest `(created_at, id)`. Because `id` is part of
//! the ordering key and ids are unique, this is already a total order —
//! there is no separate tiebreak step to get wrong.

use crate::event::EventId;
use crate::id::define_int_id;
use crate::ns::StateId;
use crate::resource::ResourceRef;
use chrono::{DateTime, Utc};

define_int_id! {
    /// Identifies a `WorkStatus` row.
    pub struct WorkStatusId;
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorkStatus {
    pub id: WorkStatusId,
    pub parent: ResourceRef,
    pub value: StateId,
    pub event_ref: Option<EventId>,
    pub created_at: DateTime<Utc>,
}

impl WorkStatus {
    /// Ordering key used to find the current status: `(created_at, id)`.
    pub fn order_key(&self) -> (DateTime<Utc>, i64) {
        (self.created_at, self.id.get())
    }
}

/// The current status among a resource's WorkStatus rows: the one with the
/// greatest `(created_at, id)` (§4.3's "correlated antijoin").
pub fn current_of<'a, I>(rows: I) -> Option<&'a WorkStatus>
where
    I: IntoIterator<Item = &'a WorkStatus>,
{
    rows.into_iter().max_by_key(|row| row.order_key())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceRef;

    fn row(id: i64, created_at: &str, state: &str) -> WorkStatus {
        WorkStatus {
            id: WorkStatusId::new(id),
            parent: ResourceRef::new("models", 1),
            value: StateId::from_qualified(&format!("state:{state}")).unwrap(),
            event_ref: None,
            created_at: created_at.parse().unwrap(),
        }
    }

    #[test]
    fn current_is_greatest_created_at() {
        let rows = vec![
            row(1, "2024-01-01T00:00:00Z", "CREATED"),
            row(2, "2024-01-02T00:00:00Z", "STARTED"),
        ];
        assert_eq!(current_of(&rows).unwrap().value.local(), "STARTED");
    }

    #[test]
    fn ties_break_by_greatest_id() {
        let rows = vec![
            row(5, "2024-01-01T00:00:00Z", "A"),
            row(9, "2024-01-01T00:00:00Z", "B"),
            row(7, "2024-01-01T00:00:00Z", "C"),
        ];
        assert_eq!(current_of(&rows).unwrap().id.get(), 9);
    }

    #[test]
    fn empty_history_has_no_current() {
        let rows: Vec<WorkStatus> = vec![];
        assert!(current_of(&rows).is_none());
    }
}
