// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end scenarios spanning the FSM, subscription bus, and
//! transition binder together, exercised against `MemoryStore`.

#![allow(clippy::unwrap_used)]

use chrono::Utc;
use wfe_bus::SubscriptionBus;
use wfe_core::test_support::EventBuilder;
use wfe_core::{ActionId, EventStore, NamespacedId, OperationId, ResourceRef, ResultId, StateId};
use wfe_engine::TransitionBinder;
use wfe_fsm::{EngineBuilder, FromStates, StateChanger, ToState};
use wfe_storage::MemoryStore;

fn model(id: i64) -> ResourceRef {
    ResourceRef::new("models", id)
}

fn foo(id: i64) -> ResourceRef {
    ResourceRef::new("foos", id)
}

async fn seed(store: &MemoryStore, ctx: ResourceRef, state: StateId) {
    store.insert_resource(ctx.clone());
    store.set_work_status(ctx, state, None, Utc::now()).await.unwrap();
}

#[tokio::test]
async fn happy_path_transition() {
    let store = MemoryStore::new();
    let ctx = model(1);
    seed(&store, ctx.clone(), StateId::from_symbol("CREATED")).await;

    let mut builder = EngineBuilder::new();
    builder
        .allow("IModel", ActionId::from_symbol("START"), vec![StateId::from_symbol("CREATED")], StateId::from_symbol("STARTED"))
        .unwrap();
    let fsm = builder.build();

    let bus = SubscriptionBus::new();
    let changer = StateChanger::new(&fsm, &store, &store, &bus);
    let chain = vec![smol_str::SmolStr::new("IModel")];
    let event = EventBuilder::new(ctx.clone()).action("start").build();

    let outcome = changer.perform(&ctx, &chain, ActionId::from_symbol("START"), &event, Utc::now()).await.unwrap();

    assert_eq!(outcome.next_state, StateId::from_symbol("STARTED"));
    assert!(outcome.changed);
    assert_eq!(store.current_status(&ctx).await.unwrap().unwrap().value, StateId::from_symbol("STARTED"));
}

#[tokio::test]
async fn keep_sentinel_leaves_state_unchanged() {
    let store = MemoryStore::new();
    let ctx = model(1);
    seed(&store, ctx.clone(), StateId::from_symbol("CREATED")).await;

    let mut builder = EngineBuilder::new();
    builder.allow("IModel", ActionId::from_symbol("POKE"), FromStates::Any, ToState::Keep).unwrap();
    let fsm = builder.build();

    let bus = SubscriptionBus::new();
    let changer = StateChanger::new(&fsm, &store, &store, &bus);
    let chain = vec![smol_str::SmolStr::new("IModel")];
    let event = EventBuilder::new(ctx.clone()).action("poke").build();

    let outcome = changer.perform(&ctx, &chain, ActionId::from_symbol("POKE"), &event, Utc::now()).await.unwrap();

    assert_eq!(outcome.next_state, StateId::from_symbol("CREATED"));
    assert!(!outcome.changed);
    assert_eq!(store.current_status(&ctx).await.unwrap().unwrap().value, StateId::from_symbol("CREATED"));
}

#[tokio::test]
async fn interface_specificity_lets_the_narrower_interface_win() {
    let store = MemoryStore::new();
    let model_ctx = model(1);
    let foo_ctx = foo(2);
    seed(&store, model_ctx.clone(), StateId::from_symbol("DRAFTED")).await;
    seed(&store, foo_ctx.clone(), StateId::from_symbol("DRAFTED")).await;

    let mut builder = EngineBuilder::new();
    builder
        .allow(
            "IModel",
            ActionId::from_symbol("PUBLISH"),
            vec![StateId::from_symbol("DRAFTED")],
            StateId::from_symbol("PUBLISHED"),
        )
        .unwrap();
    builder
        .allow(
            "IFoo",
            ActionId::from_symbol("PUBLISH"),
            vec![StateId::from_symbol("DRAFTED")],
            StateId::from_symbol("PENDING_MODERATION"),
        )
        .unwrap();
    let fsm = builder.build();

    let bus = SubscriptionBus::new();
    let changer = StateChanger::new(&fsm, &store, &store, &bus);

    let model_chain = vec![smol_str::SmolStr::new("IModel")];
    let model_event = EventBuilder::new(model_ctx.clone()).action("publish").build();
    let model_outcome =
        changer.perform(&model_ctx, &model_chain, ActionId::from_symbol("PUBLISH"), &model_event, Utc::now()).await.unwrap();
    assert_eq!(model_outcome.next_state, StateId::from_symbol("PUBLISHED"));

    let foo_chain = vec![smol_str::SmolStr::new("IFoo"), smol_str::SmolStr::new("IModel")];
    let foo_event = EventBuilder::new(foo_ctx.clone()).action("publish").build();
    let foo_outcome =
        changer.perform(&foo_ctx, &foo_chain, ActionId::from_symbol("PUBLISH"), &foo_event, Utc::now()).await.unwrap();
    assert_eq!(foo_outcome.next_state, StateId::from_symbol("PENDING_MODERATION"));
}

#[tokio::test]
async fn result_binding_drives_the_bound_action() {
    let store = MemoryStore::new();
    let ctx = model(1);
    seed(&store, ctx.clone(), StateId::from_symbol("STARTED")).await;
    let event = store.create_event(ctx.clone(), None, "models", "doit", serde_json::json!({}), Utc::now()).await.unwrap();

    let mut fsm_builder = EngineBuilder::new();
    fsm_builder
        .allow(
            "IModel",
            ActionId::from_symbol("FINISH"),
            vec![StateId::from_symbol("STARTED")],
            StateId::from_symbol("FINISHED"),
        )
        .unwrap();
    let fsm = fsm_builder.build();

    let mut binder = TransitionBinder::new();
    binder
        .after("IModel", OperationId::from_symbol("DOIT"), ResultId::from_symbol("SUCCESS"), ActionId::from_symbol("FINISH"))
        .unwrap();

    let bus = SubscriptionBus::new();
    let changer = StateChanger::new(&fsm, &store, &store, &bus);
    let chain = vec![smol_str::SmolStr::new("IModel")];

    let outcome = binder
        .apply(
            &changer,
            &store,
            &ctx,
            &chain,
            OperationId::from_symbol("DOIT"),
            ResultId::from_symbol("SUCCESS"),
            event.id,
            Utc::now(),
        )
        .await
        .unwrap();

    let outcome = outcome.expect("a binding was registered");
    assert_eq!(outcome.next_state, StateId::from_symbol("FINISHED"));
    assert_eq!(store.current_status(&ctx).await.unwrap().unwrap().value, StateId::from_symbol("FINISHED"));
}

#[tokio::test]
async fn duplicate_rule_registration_fails_compilation() {
    let mut builder = EngineBuilder::new();
    builder
        .allow("IModel", ActionId::from_symbol("START"), vec![StateId::from_symbol("CREATED")], StateId::from_symbol("STARTED"))
        .unwrap();
    let err = builder
        .allow(
            "IModel",
            ActionId::from_symbol("START"),
            vec![StateId::from_symbol("CREATED")],
            StateId::from_symbol("CANCELLED"),
        )
        .unwrap_err();
    assert!(matches!(err, wfe_core::ConfigError::DuplicateRule { .. }));
}

#[tokio::test]
async fn registering_the_same_rule_twice_fails_compilation() {
    let mut builder = EngineBuilder::new();
    builder
        .allow("IModel", ActionId::from_symbol("START"), vec![StateId::from_symbol("CREATED")], StateId::from_symbol("STARTED"))
        .unwrap();
    let err = builder
        .allow("IModel", ActionId::from_symbol("START"), vec![StateId::from_symbol("CREATED")], StateId::from_symbol("STARTED"))
        .unwrap_err();
    assert!(matches!(err, wfe_core::ConfigError::DuplicateRule { .. }));
}

#[tokio::test]
async fn replaying_a_permitted_action_fails_once_the_rule_no_longer_matches() {
    let store = MemoryStore::new();
    let ctx = model(1);
    seed(&store, ctx.clone(), StateId::from_symbol("S1")).await;

    let mut builder = EngineBuilder::new();
    builder.allow("IFoo", ActionId::from_symbol("A"), vec![StateId::from_symbol("S1")], StateId::from_symbol("S2")).unwrap();
    let fsm = builder.build();

    let bus = SubscriptionBus::new();
    let changer = StateChanger::new(&fsm, &store, &store, &bus);
    let chain = vec![smol_str::SmolStr::new("IFoo")];
    let event = EventBuilder::new(ctx.clone()).action("a").build();

    let outcome = changer.perform(&ctx, &chain, ActionId::from_symbol("A"), &event, Utc::now()).await.unwrap();
    assert_eq!(outcome.next_state, StateId::from_symbol("S2"));

    let replay_event = EventBuilder::new(ctx.clone()).id(2).action("a").build();
    let err = changer.perform(&ctx, &chain, ActionId::from_symbol("A"), &replay_event, Utc::now()).await.unwrap_err();
    assert!(matches!(err, wfe_core::EngineError::InvalidTransition(_)));
}
