// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wfe-fsm: the `allow(...)` rule compiler and `state_changer.perform(...)`
//! evaluator (§4.2).

mod builder;
mod compiled;
mod engine;
mod rule;

pub use builder::EngineBuilder;
pub use engine::{Engine, PerformOutcome, StateChanger};
pub use rule::{FromStates, ToState};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use wfe_core::*;

    struct NoopPublisher;

    #[async_trait::async_trait]
    impl NoticePublisher for NoopPublisher {
        async fn publish(
            &self,
            _ctx: &ResourceRef,
            _capability_chain: &[smol_str::SmolStr],
            _kind: NoticeKind,
            _event: &ActivityEvent,
            _operation: Option<OperationId>,
        ) -> Vec<Dispatch> {
            Vec::new()
        }
    }

    struct AlwaysExists;

    #[async_trait::async_trait]
    impl ResourceStore for AlwaysExists {
        async fn exists(&self, _resource: &ResourceRef) -> Result<bool, EngineError> {
            Ok(true)
        }
    }

    /// Minimal in-memory `EventStore` sufficient for these tests, so the
    /// fsm crate can be exercised without wfe-storage.
    #[derive(Default)]
    struct MemEvents {
        events: Mutex<Vec<ActivityEvent>>,
        statuses: Mutex<Vec<WorkStatus>>,
        next_id: Mutex<i64>,
    }

    impl MemEvents {
        fn seed(&self, parent: ResourceRef, value: StateId, now: chrono::DateTime<chrono::Utc>) {
            self.statuses.lock().unwrap().push(WorkStatus {
                id: WorkStatusId::new(0),
                parent,
                value,
                event_ref: None,
                created_at: now,
            });
        }

        fn next(&self) -> i64 {
            let mut n = self.next_id.lock().unwrap();
            *n += 1;
            *n
        }
    }

    #[async_trait::async_trait]
    impl EventStore for MemEvents {
        async fn create_event(
            &self,
            parent: ResourceRef,
            user: Option<UserRef>,
            target: &str,
            action: &str,
            data: serde_json::Value,
            now: chrono::DateTime<chrono::Utc>,
        ) -> Result<ActivityEvent, EngineError> {
            let event = ActivityEvent {
                id: EventId::new(self.next()),
                parent,
                user,
                target: target.into(),
                action: action.into(),
                data,
                created_at: now,
            };
            self.events.lock().unwrap().push(event.clone());
            Ok(event)
        }

        async fn get_event(&self, id: EventId) -> Result<Option<ActivityEvent>, EngineError> {
            Ok(self.events.lock().unwrap().iter().find(|e| e.id == id).cloned())
        }

        async fn set_work_status(
            &self,
            parent: ResourceRef,
            value: StateId,
            event_ref: Option<EventId>,
            now: chrono::DateTime<chrono::Utc>,
        ) -> Result<WorkStatus, EngineError> {
            let row =
                WorkStatus { id: WorkStatusId::new(self.next()), parent, value, event_ref, created_at: now };
            self.statuses.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn current_status(&self, parent: &ResourceRef) -> Result<Option<WorkStatus>, EngineError> {
            Ok(current_of(self.statuses.lock().unwrap().iter().filter(|s| &s.parent == parent)).cloned())
        }

        async fn status_query(
            &self,
            _type_tag: &str,
            _values: &[StateId],
            _negate: bool,
        ) -> Result<Vec<ResourceRef>, EngineError> {
            unimplemented!("not exercised by these tests")
        }
    }

    fn state(symbol: &str) -> StateId {
        StateId::from_symbol(symbol)
    }

    fn action(symbol: &str) -> ActionId {
        ActionId::from_symbol(symbol)
    }

    fn now() -> chrono::DateTime<chrono::Utc> {
        "2024-01-01T00:00:00Z".parse().unwrap()
    }

    #[tokio::test]
    async fn happy_path_transition_writes_status_and_derived_event() {
        let mut builder = EngineBuilder::new();
        builder.allow("IModel", action("START"), state("CREATED"), state("STARTED")).unwrap();
        let engine = builder.build();

        let ctx = ResourceRef::new("model", 1);
        let events = MemEvents::default();
        events.seed(ctx.clone(), state("CREATED"), now());
        let resources = AlwaysExists;
        let notices = NoopPublisher;
        let changer = StateChanger::new(&engine, &resources, &events, &notices);

        let triggering = events
            .create_event(ctx.clone(), None, "model", "start", serde_json::json!({}), now())
            .await
            .unwrap();

        let outcome = changer
            .perform(&ctx, &["IModel".into()], action("START"), &triggering, now())
            .await
            .unwrap();

        assert!(outcome.changed);
        assert_eq!(outcome.next_state, state("STARTED"));
        let current = events.current_status(&ctx).await.unwrap().unwrap();
        assert_eq!(current.value, state("STARTED"));
        assert!(events.events.lock().unwrap().iter().any(|e| e.type_() == "model:started"));
    }

    #[tokio::test]
    async fn keep_sentinel_does_not_write_a_new_status_row() {
        let mut builder = EngineBuilder::new();
        builder.allow("IModel", action("POKE"), FromStates::Any, ToState::Keep).unwrap();
        let engine = builder.build();

        let ctx = ResourceRef::new("model", 1);
        let events = MemEvents::default();
        events.seed(ctx.clone(), state("CREATED"), now());
        let resources = AlwaysExists;
        let notices = NoopPublisher;
        let changer = StateChanger::new(&engine, &resources, &events, &notices);

        let triggering = events
            .create_event(ctx.clone(), None, "model", "poke", serde_json::json!({}), now())
            .await
            .unwrap();
        let before = events.statuses.lock().unwrap().len();

        let outcome = changer
            .perform(&ctx, &["IModel".into()], action("POKE"), &triggering, now())
            .await
            .unwrap();

        assert!(!outcome.changed);
        assert_eq!(outcome.next_state, state("CREATED"));
        assert_eq!(events.statuses.lock().unwrap().len(), before);
    }

    #[tokio::test]
    async fn interface_specificity_picks_most_specific_machine() {
        let mut builder = EngineBuilder::new();
        builder.allow("IModel", action("PUBLISH"), state("DRAFTED"), state("PUBLISHED")).unwrap();
        builder.allow("IFoo", action("PUBLISH"), state("DRAFTED"), state("PENDING_MODERATION")).unwrap();
        let engine = builder.build();

        let ctx = ResourceRef::new("foos", 1);
        let events = MemEvents::default();
        events.seed(ctx.clone(), state("DRAFTED"), now());
        let resources = AlwaysExists;
        let notices = NoopPublisher;
        let changer = StateChanger::new(&engine, &resources, &events, &notices);
        let triggering = events
            .create_event(ctx.clone(), None, "foos", "publish", serde_json::json!({}), now())
            .await
            .unwrap();

        let outcome = changer
            .perform(&ctx, &["IFoo".into(), "IModel".into()], action("PUBLISH"), &triggering, now())
            .await
            .unwrap();

        assert_eq!(outcome.next_state, state("PENDING_MODERATION"));
    }

    #[tokio::test]
    async fn disallowed_action_is_invalid_transition() {
        let mut builder = EngineBuilder::new();
        builder.allow("IModel", action("START"), state("CREATED"), state("STARTED")).unwrap();
        let engine = builder.build();

        let ctx = ResourceRef::new("model", 1);
        let events = MemEvents::default();
        events.seed(ctx.clone(), state("STARTED"), now());
        let resources = AlwaysExists;
        let notices = NoopPublisher;
        let changer = StateChanger::new(&engine, &resources, &events, &notices);
        let triggering = events
            .create_event(ctx.clone(), None, "model", "start", serde_json::json!({}), now())
            .await
            .unwrap();

        let err = changer
            .perform(&ctx, &["IModel".into()], action("START"), &triggering, now())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition(_)));
    }

    #[test]
    fn duplicate_concrete_rule_is_a_config_error() {
        let mut builder = EngineBuilder::new();
        builder.allow("IModel", action("START"), state("CREATED"), state("STARTED")).unwrap();
        let err = builder.allow("IModel", action("START"), state("CREATED"), state("CANCELLED")).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRule { .. }));
    }

    #[test]
    fn registering_the_identical_rule_twice_is_still_a_config_error() {
        let mut builder = EngineBuilder::new();
        builder.allow("IModel", action("START"), state("CREATED"), state("STARTED")).unwrap();
        let err = builder.allow("IModel", action("START"), state("CREATED"), state("STARTED")).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRule { .. }));
    }

    #[test]
    fn registering_the_identical_wildcard_rule_twice_is_still_a_config_error() {
        let mut builder = EngineBuilder::new();
        builder.allow("IModel", action("POKE"), FromStates::Any, ToState::Keep).unwrap();
        let err = builder.allow("IModel", action("POKE"), FromStates::Any, ToState::Keep).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRule { .. }));
    }
}
