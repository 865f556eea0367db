// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wfe-bus: the selector-based subscription bus (§4.4).

mod bus;
mod handler;
mod selector;

pub use bus::SubscriptionBus;
pub use handler::{FnHandler, Handler, HandlerOutcome};
pub use selector::Selector;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use wfe_core::*;

    fn ctx() -> ResourceRef {
        ResourceRef::new("foos", 1)
    }

    fn event() -> ActivityEvent {
        ActivityEvent {
            id: EventId::new(1),
            parent: ctx(),
            user: None,
            target: "foos".into(),
            action: "started".into(),
            data: serde_json::json!({}),
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn dispatches_to_matching_state_selector_only() {
        let mut bus = SubscriptionBus::new();
        bus.on(
            "IFoo",
            StateId::from_symbol("STARTED"),
            Arc::new(FnHandler::new("notify", |_ctx, _event, _op| {
                Ok(vec![(None, vec![Dispatch::new("/hooks/started", serde_json::json!({}))])])
            })),
        );
        bus.on(
            "IFoo",
            StateId::from_symbol("STOPPED"),
            Arc::new(FnHandler::new("other", |_ctx, _event, _op| Ok(vec![(None, vec![Dispatch::new("/hooks/stopped", serde_json::json!({}))])]))),
        );

        let dispatches = bus
            .publish(&ctx(), &["IFoo".into()], NoticeKind::Changed(StateId::from_symbol("STARTED")), &event(), None)
            .await;
        assert_eq!(dispatches.len(), 1);
        assert_eq!(dispatches[0].path, "/hooks/started");
    }

    #[tokio::test]
    async fn wildcard_runs_for_both_notice_kinds() {
        let mut bus = SubscriptionBus::new();
        let calls = Arc::new(Mutex::new(0));
        let counted = calls.clone();
        bus.on(
            "IFoo",
            Selector::Any,
            Arc::new(FnHandler::new("audit", move |_ctx, _event, _op| {
                *counted.lock().unwrap() += 1;
                Ok(vec![])
            })),
        );

        bus.publish(&ctx(), &["IFoo".into()], NoticeKind::Changed(StateId::from_symbol("STARTED")), &event(), None).await;
        bus.publish(&ctx(), &["IFoo".into()], NoticeKind::Happened(ActionId::from_symbol("START")), &event(), None).await;

        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn handler_failure_is_isolated() {
        let mut bus = SubscriptionBus::new();
        bus.on(
            "IFoo",
            Selector::Any,
            Arc::new(FnHandler::new("flaky", |_ctx, _event, _op| {
                Err(HandlerError { handler: "flaky".to_string(), reason: "boom".to_string() })
            })),
        );
        bus.on(
            "IFoo",
            Selector::Any,
            Arc::new(FnHandler::new("reliable", |_ctx, _event, _op| {
                Ok(vec![(None, vec![Dispatch::new("/hooks/ok", serde_json::json!({}))])])
            })),
        );

        let dispatches = bus
            .publish(&ctx(), &["IFoo".into()], NoticeKind::Changed(StateId::from_symbol("STARTED")), &event(), None)
            .await;
        assert_eq!(dispatches.len(), 1);
    }

    #[tokio::test]
    async fn unregistered_iface_in_chain_is_skipped() {
        let mut bus = SubscriptionBus::new();
        bus.on(
            "IFoo",
            Selector::Any,
            Arc::new(FnHandler::new("audit", |_ctx, _event, _op| Ok(vec![(None, vec![])]))),
        );
        let dispatches = bus
            .publish(&ctx(), &["IBar".into(), "IFoo".into()], NoticeKind::Happened(ActionId::from_symbol("X")), &event(), None)
            .await;
        assert!(dispatches.is_empty());
    }
}
