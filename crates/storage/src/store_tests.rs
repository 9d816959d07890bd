// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use lpg_core::test_support::located_order;
use lpg_core::DeliveryStatus;
use lpg_dispatch::ClusterFingerprint;

fn fingerprint(ids: &[&str]) -> ClusterFingerprint {
    ClusterFingerprint::of_members(ids.iter().copied())
}

#[test]
fn missing_file_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonOrderStore::new(dir.path().join("orders.json"));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn replace_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonOrderStore::new(dir.path().join("orders.json"));

    let orders =
        vec![located_order("1", "12 Ring Road", 5.68, -0.16), located_order("2", "Osu", 5.55, -0.18)];
    store.replace(&orders).unwrap();
    assert_eq!(store.load().unwrap(), orders);
}

#[test]
fn replace_overwrites_the_whole_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonOrderStore::new(dir.path().join("orders.json"));

    store.replace(&[located_order("1", "A", 5.68, -0.16)]).unwrap();
    let mut updated = located_order("1", "A", 5.68, -0.16);
    updated.status = DeliveryStatus::Delivered;
    store.replace(&[updated.clone()]).unwrap();

    assert_eq!(store.load().unwrap(), vec![updated]);
}

#[test]
fn replace_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");
    let store = JsonOrderStore::new(&path);
    store.replace(&[located_order("1", "A", 5.68, -0.16)]).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn corrupt_file_surfaces_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");
    std::fs::write(&path, b"{not json").unwrap();

    let store = JsonOrderStore::new(&path);
    assert!(matches!(store.load(), Err(StoreError::Parse { .. })));
}

#[test]
fn ledger_store_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonLedgerStore::new(dir.path().join("assignments.json"));

    assert!(store.load().unwrap().is_empty());

    let mut ledger = lpg_dispatch::AssignmentLedger::new();
    ledger.assign(fingerprint(&["1", "2"]), "kofi@drivers.example");
    store.replace(&ledger).unwrap();

    let restored = store.load().unwrap();
    assert_eq!(restored.driver_for(&fingerprint(&["1", "2"])), Some("kofi@drivers.example"));
}

#[test]
fn memory_store_round_trips() {
    let store = MemoryStore::new();
    assert!(store.load().unwrap().is_empty());

    let orders = vec![located_order("1", "A", 5.68, -0.16)];
    store.replace(&orders).unwrap();
    assert_eq!(store.load().unwrap(), orders);
}
