// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::order::{DeliveryStatus, GeoPoint, Order, OrderKind};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core delivery types.
pub mod strategies {
    use crate::lifecycle::DeliveryAction;
    use crate::order::{DeliveryStatus, GeoPoint, OrderKind};
    use proptest::prelude::*;

    pub fn arb_status() -> impl Strategy<Value = DeliveryStatus> {
        prop_oneof![
            Just(DeliveryStatus::Pending),
            Just(DeliveryStatus::PickedUp),
            Just(DeliveryStatus::OnWay),
            Just(DeliveryStatus::Delivered),
            Just(DeliveryStatus::Failed),
        ]
    }

    pub fn arb_kind() -> impl Strategy<Value = OrderKind> {
        prop_oneof![Just(OrderKind::Refill), Just(OrderKind::CylinderPurchase)]
    }

    pub fn arb_action() -> impl Strategy<Value = DeliveryAction> {
        prop_oneof![
            Just(DeliveryAction::StartPickup),
            Just(DeliveryAction::StartDelivery),
            "[0-9]{4,8}".prop_map(DeliveryAction::ConfirmDelivery),
            prop_oneof![Just(String::new()), Just("customer not home".to_string())]
                .prop_map(DeliveryAction::MarkFailed),
        ]
    }

    /// Coordinates roughly within the Accra service area.
    pub fn arb_geo() -> impl Strategy<Value = GeoPoint> {
        (5.4f64..5.9, -0.4f64..0.1).prop_map(|(lat, lng)| GeoPoint { lat, lng })
    }
}

// ── Order factory functions ─────────────────────────────────────────────

/// A located, pending refill order: the common clustering fixture.
pub fn located_order(id: &str, address: &str, lat: f64, lng: f64) -> Order {
    Order::builder().id(id).address(address).location(GeoPoint::new(lat, lng)).build()
}

/// An order with no geolocation (excluded from clustering).
pub fn unlocated_order(id: &str, address: &str) -> Order {
    Order::builder().id(id).address(address).build()
}

/// An on-way order with a known confirmation code.
pub fn onway_order(id: &str, address: &str, code: &str) -> Order {
    Order::builder().id(id).address(address).code(code).status(DeliveryStatus::OnWay).build()
}

/// A pending cylinder-purchase order (skips the pickup leg).
pub fn purchase_order(id: &str, address: &str) -> Order {
    Order::builder().id(id).address(address).kind(OrderKind::CylinderPurchase).build()
}
