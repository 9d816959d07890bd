// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace-level integration tests: the full admin → driver → customer
//! path over in-memory fixtures and the recording fake backend.

use lpg_adapters::{ApiCall, FakeDeliveryApi, WireOrder};
use lpg_core::{DeliveryAction, DeliveryStatus, GeoPoint, Order, OrderKind};
use lpg_dispatch::{cluster_undelivered, plan_route, SnapPrecision};
use lpg_engine::{AdminConsole, DriverRun, EngineError};
use lpg_storage::{MemoryStore, OrderStore};

fn onway(id: &str, address: &str, code: &str) -> Order {
    Order::builder()
        .id(id)
        .address(address)
        .code(code)
        .kind(OrderKind::Refill)
        .status(DeliveryStatus::OnWay)
        .location(GeoPoint::new(5.68, -0.16))
        .build()
}

// The end-to-end scenario: two on-way orders at one address and one cell.
// Clustering yields one cluster of two; sequencing yields one group
// ordered [A, B]; the wrong code fails delivery, the right one lands it,
// and the delivered stop drops from the recomputed route.
#[test]
fn cluster_sequence_deliver_resequence() {
    let mut orders = vec![onway("1", "X", "111111"), onway("2", "X", "222222")];

    let clusters = cluster_undelivered(&orders, SnapPrecision::default());
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].len(), 2);

    let plan = plan_route(&orders);
    assert_eq!(plan.groups.len(), 1);
    let ids: Vec<&str> = plan.groups[0].stops.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, ["1", "2"]);

    // Wrong code: rejected, status unchanged
    let err = lpg_core::advance(&mut orders[0], &DeliveryAction::ConfirmDelivery("222222".into()));
    assert!(err.is_err());
    assert_eq!(orders[0].status, DeliveryStatus::OnWay);

    // Right code: delivered, and the stop drops out on recomputation
    lpg_core::advance(&mut orders[0], &DeliveryAction::ConfirmDelivery("111111".into())).unwrap();
    let plan = plan_route(&orders);
    assert_eq!(plan.len(), 1);
    assert_eq!(plan.next_stop().unwrap().order.id, "2");
}

#[tokio::test]
async fn admin_assignment_reaches_driver_pull() {
    // Admin side: cluster and assign to a driver
    let admin_store = MemoryStore::with_orders(vec![onway("1", "X", "111111"), onway("2", "X", "222222")]);
    let backend = FakeDeliveryApi::new();
    let mut admin = AdminConsole::new(admin_store, backend.clone());

    let clusters = admin.clusters().unwrap();
    admin.assign(&clusters[0], "kofi@drivers.example").await.unwrap();

    // The backend recorded concrete order ids, not a cluster position
    assert_eq!(
        backend.calls(),
        vec![ApiCall::Assign {
            driver_email: "kofi@drivers.example".to_string(),
            order_ids: vec!["1".to_string(), "2".to_string()],
        }]
    );

    // Driver side: pull the assigned orders into an empty local cache
    backend.set_orders(vec![
        WireOrder::from(&onway("1", "X", "111111")),
        WireOrder::from(&onway("2", "X", "222222")),
    ]);
    let driver_store = MemoryStore::new();
    let mut driver = DriverRun::new(driver_store.clone(), backend.clone());
    assert_eq!(driver.pull().await.unwrap(), 2);
    assert_eq!(driver.route().unwrap().len(), 2);
}

#[tokio::test]
async fn assignment_is_idempotent_end_to_end() {
    let store = MemoryStore::with_orders(vec![onway("1", "X", "111111")]);
    let backend = FakeDeliveryApi::new();
    let mut admin = AdminConsole::new(store, backend.clone());
    let clusters = admin.clusters().unwrap();

    admin.assign(&clusters[0], "kofi@drivers.example").await.unwrap();
    admin.assign(&clusters[0], "kofi@drivers.example").await.unwrap();

    // Same ledger end-state as assigning once
    assert_eq!(admin.ledger().len(), 1);
    assert_eq!(admin.assigned_driver(&clusters[0]), Some("kofi@drivers.example"));
    // The server saw the same idempotent order_ids payload both times
    assert_eq!(backend.calls().len(), 2);
}

#[tokio::test]
async fn driver_works_a_full_route_and_syncs() {
    let store = MemoryStore::with_orders(vec![
        Order::builder()
            .id("1")
            .address("X")
            .code("111111")
            .kind(OrderKind::Refill)
            .build(),
        Order::builder()
            .id("2")
            .address("Y")
            .code("222222")
            .kind(OrderKind::CylinderPurchase)
            .build(),
    ]);
    let backend = FakeDeliveryApi::new();
    let mut driver = DriverRun::new(store.clone(), backend.clone());

    // Refill: pending → pickedup → onway → delivered
    driver.apply(&"1".into(), &DeliveryAction::StartPickup).await.unwrap();
    driver.apply(&"1".into(), &DeliveryAction::StartDelivery).await.unwrap();
    driver.apply(&"1".into(), &DeliveryAction::ConfirmDelivery("111111".into())).await.unwrap();

    // Purchase skips pickup: pending → onway → failed (with note)
    driver.apply(&"2".into(), &DeliveryAction::StartDelivery).await.unwrap();
    let err = driver.apply(&"2".into(), &DeliveryAction::MarkFailed("  ".into())).await;
    assert!(matches!(err, Err(EngineError::Transition(_))));
    driver.apply(&"2".into(), &DeliveryAction::MarkFailed("kiosk closed".into())).await.unwrap();

    // Both terminal: the route is empty and the batch push carries both
    assert!(driver.route().unwrap().is_empty());
    assert_eq!(driver.push().await.unwrap(), 2);

    let cached = store.load().unwrap();
    assert_eq!(cached[1].failed_note.as_deref(), Some("kiosk closed"));
}
