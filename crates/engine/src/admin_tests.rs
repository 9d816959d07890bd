// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::EngineError;
use lpg_adapters::{ApiCall, FakeDeliveryApi};
use lpg_core::test_support::located_order;
use lpg_storage::MemoryStore;

fn console_with(
    orders: Vec<lpg_core::Order>,
) -> (AdminConsole<MemoryStore, FakeDeliveryApi>, FakeDeliveryApi) {
    let api = FakeDeliveryApi::new();
    let console = AdminConsole::new(MemoryStore::with_orders(orders), api.clone());
    (console, api)
}

#[test]
fn clusters_recompute_from_store_snapshot() {
    let (console, _api) = console_with(vec![
        located_order("1", "A", 5.68, -0.16),
        located_order("2", "B", 5.68, -0.16),
        located_order("3", "C", 5.75, -0.16),
    ]);
    let clusters = console.clusters().unwrap();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].len(), 2);
}

#[test]
fn empty_store_yields_no_clusters() {
    let (console, _api) = console_with(Vec::new());
    assert!(console.clusters().unwrap().is_empty());
}

#[tokio::test]
async fn assign_posts_order_ids_then_records_claim() {
    let (mut console, api) = console_with(vec![
        located_order("1", "A", 5.68, -0.16),
        located_order("2", "B", 5.68, -0.16),
    ]);
    let clusters = console.clusters().unwrap();

    console.assign(&clusters[0], "kofi@drivers.example").await.unwrap();

    assert_eq!(
        api.calls(),
        vec![ApiCall::Assign {
            driver_email: "kofi@drivers.example".to_string(),
            order_ids: vec!["1".to_string(), "2".to_string()],
        }]
    );
    assert_eq!(console.assigned_driver(&clusters[0]), Some("kofi@drivers.example"));
}

#[tokio::test]
async fn assign_twice_is_idempotent() {
    let (mut console, _api) = console_with(vec![located_order("1", "A", 5.68, -0.16)]);
    let clusters = console.clusters().unwrap();

    console.assign(&clusters[0], "kofi@drivers.example").await.unwrap();
    console.assign(&clusters[0], "kofi@drivers.example").await.unwrap();

    assert_eq!(console.ledger().len(), 1);
    assert_eq!(console.assigned_driver(&clusters[0]), Some("kofi@drivers.example"));
}

#[tokio::test]
async fn rejected_assignment_leaves_ledger_untouched() {
    let (mut console, api) = console_with(vec![located_order("1", "A", 5.68, -0.16)]);
    let clusters = console.clusters().unwrap();
    api.reject_next("driver not found");

    let err = console.assign(&clusters[0], "ghost@drivers.example").await.unwrap_err();
    assert!(matches!(err, EngineError::Api(_)));
    assert!(console.ledger().is_empty());

    // Retry after the failure succeeds; the operation is idempotent
    console.assign(&clusters[0], "ghost@drivers.example").await.unwrap();
    assert_eq!(console.assigned_driver(&clusters[0]), Some("ghost@drivers.example"));
}

#[tokio::test]
async fn claim_survives_reclustering_with_same_membership() {
    let (mut console, _api) = console_with(vec![
        located_order("1", "A", 5.68, -0.16),
        located_order("2", "B", 5.75, -0.16),
    ]);
    let before = console.clusters().unwrap();
    console.assign(&before[1], "kofi@drivers.example").await.unwrap();

    // A recomputation that reorders the cluster list does not move the claim
    let after = console.clusters().unwrap();
    assert_eq!(console.assigned_driver(&after[1]), Some("kofi@drivers.example"));
    assert_eq!(console.assigned_driver(&after[0]), None);
}

#[tokio::test]
async fn unassign_clears_claim_idempotently() {
    let (mut console, _api) = console_with(vec![located_order("1", "A", 5.68, -0.16)]);
    let clusters = console.clusters().unwrap();
    console.assign(&clusters[0], "kofi@drivers.example").await.unwrap();

    console.unassign(&clusters[0]);
    console.unassign(&clusters[0]);
    assert_eq!(console.assigned_driver(&clusters[0]), None);
}

#[tokio::test]
async fn empty_cluster_is_rejected_locally() {
    let (mut console, api) = console_with(Vec::new());
    let empty = lpg_dispatch::Cluster {
        cell: lpg_dispatch::CellKey { lat: 0, lng: 0 },
        orders: Vec::new(),
    };
    let err = console.assign(&empty, "kofi@drivers.example").await.unwrap_err();
    assert!(matches!(err, EngineError::EmptyCluster));
    assert!(api.calls().is_empty());
}
