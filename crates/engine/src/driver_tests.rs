// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::EngineError;
use lpg_adapters::{ApiCall, FakeDeliveryApi, WireOrder};
use lpg_core::test_support::{onway_order, purchase_order};
use lpg_core::{DeliveryAction, DeliveryStatus, Order, TransitionError};
use lpg_storage::{MemoryStore, OrderStore};

fn run_with(orders: Vec<Order>) -> (DriverRun<MemoryStore, FakeDeliveryApi>, MemoryStore, FakeDeliveryApi) {
    let store = MemoryStore::with_orders(orders);
    let api = FakeDeliveryApi::new();
    (DriverRun::new(store.clone(), api.clone()), store, api)
}

#[tokio::test]
async fn pull_replaces_cache_with_normalized_orders() {
    let (mut run, store, api) = run_with(vec![onway_order("99", "Old", "000000")]);
    api.set_orders(vec![
        WireOrder::from(&onway_order("1", "12 Ring Road", "111111")),
        WireOrder::from(&onway_order("2", "Osu", "222222")),
    ]);

    assert_eq!(run.pull().await.unwrap(), 2);
    let cached = store.load().unwrap();
    assert_eq!(cached.len(), 2);
    assert_eq!(cached[0].id, "1");
}

#[tokio::test]
async fn route_plans_over_cached_orders() {
    let (run, _store, _api) = run_with(vec![
        onway_order("5", "B Street", "111111"),
        onway_order("1", "A Street", "222222"),
    ]);
    let plan = run.route().unwrap();
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.next_stop().unwrap().order.id, "5");
}

#[tokio::test]
async fn apply_transitions_and_persists() {
    let (mut run, store, _api) = run_with(vec![purchase_order("1", "A Street")]);

    let next = run.apply(&"1".into(), &DeliveryAction::StartDelivery).await.unwrap();
    assert_eq!(next, DeliveryStatus::OnWay);
    assert_eq!(store.load().unwrap()[0].status, DeliveryStatus::OnWay);
}

#[tokio::test]
async fn apply_rejection_changes_nothing() {
    let (mut run, store, api) = run_with(vec![onway_order("1", "A Street", "111111")]);

    let err = run.apply(&"1".into(), &DeliveryAction::ConfirmDelivery("222222".into())).await;
    assert!(matches!(err, Err(EngineError::Transition(TransitionError::CodeMismatch))));
    assert_eq!(store.load().unwrap()[0].status, DeliveryStatus::OnWay);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn apply_unknown_order_is_an_error() {
    let (mut run, _store, _api) = run_with(Vec::new());
    let err = run.apply(&"404".into(), &DeliveryAction::StartDelivery).await;
    assert!(matches!(err, Err(EngineError::UnknownOrder(_))));
}

#[tokio::test]
async fn push_sends_only_non_pending_orders() {
    let (mut run, _store, api) = run_with(vec![
        purchase_order("1", "A"),
        onway_order("2", "B", "111111"),
        Order::builder().id("3").status(DeliveryStatus::Delivered).build(),
    ]);

    assert_eq!(run.push().await.unwrap(), 2);
    match &api.calls()[0] {
        ApiCall::PushUpdates { updates } => {
            let ids: Vec<&str> = updates.iter().map(|u| u.order_id.as_str()).collect();
            assert_eq!(ids, ["2", "3"]);
        }
        other => panic!("expected push, got {other:?}"),
    }
}

#[tokio::test]
async fn push_replaces_cache_with_server_list() {
    let (mut run, store, api) = run_with(vec![onway_order("1", "A", "111111")]);
    let mut delivered = onway_order("1", "A", "111111");
    delivered.status = DeliveryStatus::Delivered;
    api.set_orders(vec![WireOrder::from(&delivered)]);

    run.push().await.unwrap();
    assert_eq!(store.load().unwrap()[0].status, DeliveryStatus::Delivered);
}

#[tokio::test]
async fn push_with_empty_server_return_keeps_cache() {
    let (mut run, store, _api) = run_with(vec![onway_order("1", "A", "111111")]);
    run.push().await.unwrap();
    assert_eq!(store.load().unwrap().len(), 1);
}

#[tokio::test]
async fn failed_push_leaves_cache_for_retry() {
    let (mut run, store, api) = run_with(vec![onway_order("1", "A", "111111")]);
    api.fail_next("connection reset");

    assert!(run.push().await.is_err());
    assert_eq!(store.load().unwrap().len(), 1);

    // Re-trigger succeeds; the push is idempotent on the server's side
    assert_eq!(run.push().await.unwrap(), 1);
}

#[tokio::test]
async fn immediate_mode_pushes_after_each_transition() {
    let (mut run, _store, api) = run_with(vec![purchase_order("1", "A")]);
    run = run.with_sync_mode(SyncMode::Immediate);

    run.apply(&"1".into(), &DeliveryAction::StartDelivery).await.unwrap();
    assert!(api.calls().iter().any(|c| matches!(c, ApiCall::PushUpdates { .. })));
}

#[tokio::test]
async fn batched_mode_defers_sync() {
    let (mut run, _store, api) = run_with(vec![purchase_order("1", "A")]);
    run.apply(&"1".into(), &DeliveryAction::StartDelivery).await.unwrap();
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn delivery_drops_stop_from_route() {
    let (mut run, _store, _api) = run_with(vec![
        onway_order("1", "X", "111111"),
        onway_order("2", "X", "222222"),
    ]);
    assert_eq!(run.route().unwrap().len(), 2);

    run.apply(&"1".into(), &DeliveryAction::ConfirmDelivery("111111".into())).await.unwrap();
    let plan = run.route().unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan.next_stop().unwrap().order.id, "2");
}
