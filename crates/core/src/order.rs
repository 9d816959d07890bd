// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Order record: identity, classification, geolocation, and delivery status.

use crate::clock::Clock;
use crate::code::ConfirmCode;
use crate::window::TimeWindow;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Externally assigned order identifier.
///
/// Unique among server-confirmed orders and immutable after creation.
/// Locally created orders that have not been confirmed yet carry an empty
/// id and are excluded from clustering, sequencing, and listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub SmolStr);

impl OrderId {
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the id is an empty string (unconfirmed local order).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric value used for route-stop ordering.
    ///
    /// Non-numeric identifiers sort as 0, matching the sequencing contract.
    pub fn numeric(&self) -> u64 {
        self.0.trim().parse().unwrap_or(0)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for OrderId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for OrderId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A delivery coordinate.
///
/// `(0.0, 0.0)` is the wire sentinel for "no location" and is normalized
/// to `None` at the ingestion boundary; it never reaches the clusterer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether this is the `(0, 0)` missing-location sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }
}

/// Service classification, tagged explicitly at order creation.
///
/// Replaces the free-text `cylinderType` substring check: refills pass
/// through the pickup leg, cylinder purchases go straight out for delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    Refill,
    CylinderPurchase,
}

impl OrderKind {
    /// Classify a free-text service descriptor, once, at the ingestion edge.
    pub fn classify(descriptor: &str) -> Self {
        if descriptor.to_ascii_lowercase().contains("cylinder") {
            OrderKind::CylinderPurchase
        } else {
            OrderKind::Refill
        }
    }
}

crate::simple_display! {
    OrderKind {
        Refill => "refill",
        CylinderPurchase => "cylinder purchase",
    }
}

/// How the empty cylinder reaches us for a refill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    PickupFromHome,
    DropAtKiosk,
}

crate::simple_display! {
    ServiceType {
        PickupFromHome => "pickup from home",
        DropAtKiosk => "drop at kiosk",
    }
}

/// Delivery lifecycle status. `Delivered` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Pending,
    PickedUp,
    OnWay,
    Delivered,
    Failed,
}

impl DeliveryStatus {
    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered | DeliveryStatus::Failed)
    }

    /// Active orders are the ones still on the driver's route.
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

crate::simple_display! {
    DeliveryStatus {
        Pending => "pending",
        PickedUp => "pickedup",
        OnWay => "onway",
        Delivered => "delivered",
        Failed => "failed",
    }
}

/// Configuration for creating a new order
#[derive(Debug, Clone)]
pub struct OrderConfig {
    pub id: OrderId,
    pub kind: OrderKind,
    pub descriptor: String,
    pub address: String,
    pub location: Option<GeoPoint>,
    pub service_type: ServiceType,
    pub time_slot: TimeWindow,
    pub delivery_window: TimeWindow,
}

impl OrderConfig {
    pub fn builder(
        id: impl Into<OrderId>,
        kind: OrderKind,
        address: impl Into<String>,
    ) -> OrderConfigBuilder {
        OrderConfigBuilder {
            id: id.into(),
            kind,
            descriptor: String::new(),
            address: address.into(),
            location: None,
            service_type: ServiceType::PickupFromHome,
            time_slot: TimeWindow::Morning,
            delivery_window: TimeWindow::Afternoon,
        }
    }
}

pub struct OrderConfigBuilder {
    id: OrderId,
    kind: OrderKind,
    descriptor: String,
    address: String,
    location: Option<GeoPoint>,
    service_type: ServiceType,
    time_slot: TimeWindow,
    delivery_window: TimeWindow,
}

impl OrderConfigBuilder {
    crate::setters! {
        into {
            descriptor: String,
        }
        set {
            service_type: ServiceType,
            time_slot: TimeWindow,
            delivery_window: TimeWindow,
        }
        option {
            location: GeoPoint,
        }
    }

    pub fn build(self) -> OrderConfig {
        OrderConfig {
            id: self.id,
            kind: self.kind,
            descriptor: self.descriptor,
            address: self.address,
            location: self.location,
            service_type: self.service_type,
            time_slot: self.time_slot,
            delivery_window: self.delivery_window,
        }
    }
}

/// An order record: the unit of work for clustering, sequencing, and the
/// delivery state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub kind: OrderKind,
    /// Free-text service descriptor as entered at order creation (display only)
    #[serde(default)]
    pub descriptor: String,
    /// Trimmed delivery address; the route-sequencing group key
    pub address: String,
    /// Missing location excludes the order from clustering and map display
    pub location: Option<GeoPoint>,
    pub status: DeliveryStatus,
    /// Sole credential for delivery confirmation; immutable once set
    pub code: ConfirmCode,
    /// Present only when `status` is `Failed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_note: Option<String>,
    pub service_type: ServiceType,
    pub time_slot: TimeWindow,
    pub delivery_window: TimeWindow,
    #[serde(default)]
    pub created_at_ms: u64,
}

impl Order {
    /// Create a new pending order with a freshly generated confirmation code.
    pub fn new(config: OrderConfig, clock: &impl Clock) -> Self {
        Self::with_code(config, ConfirmCode::generate(), clock.epoch_ms())
    }

    /// Create an order with an explicit code and timestamp (server-confirmed
    /// orders arrive with their code already assigned).
    pub fn with_code(config: OrderConfig, code: ConfirmCode, epoch_ms: u64) -> Self {
        Self {
            id: config.id,
            kind: config.kind,
            descriptor: config.descriptor,
            address: config.address.trim().to_string(),
            location: config.location.filter(|p| !p.is_sentinel()),
            status: DeliveryStatus::Pending,
            code,
            failed_note: None,
            service_type: config.service_type,
            time_slot: config.time_slot,
            delivery_window: config.delivery_window,
            created_at_ms: epoch_ms,
        }
    }

    /// Whether this order participates in clustering: undelivered, with a
    /// real geolocation.
    pub fn is_clusterable(&self) -> bool {
        self.status != DeliveryStatus::Delivered
            && self.location.is_some_and(|p| !p.is_sentinel())
    }

    /// Whether this order participates in route sequencing: a confirmed id
    /// and a non-terminal status.
    pub fn is_routable(&self) -> bool {
        !self.id.is_empty() && self.status.is_active()
    }
}

crate::builder! {
    pub struct OrderBuilder => Order {
        into {
            id: OrderId = "1",
            descriptor: String = "14.2kg refill",
            address: String = "12 Ring Road",
            code: ConfirmCode = "111111",
        }
        set {
            kind: OrderKind = OrderKind::Refill,
            status: DeliveryStatus = DeliveryStatus::Pending,
            service_type: ServiceType = ServiceType::PickupFromHome,
            time_slot: TimeWindow = TimeWindow::Morning,
            delivery_window: TimeWindow = TimeWindow::Afternoon,
            created_at_ms: u64 = 1_000_000,
        }
        option {
            location: GeoPoint = None,
            failed_note: String = None,
        }
    }
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod tests;
