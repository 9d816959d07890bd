// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire-shape normalization.
//!
//! The backend emits a mix of snake_case and camelCase field names
//! depending on the endpoint, and geolocation arrives either nested or as
//! flat `location_lat`/`location_lng` pairs, defaulting to `(0, 0)` when
//! absent. All of that is absorbed here, once, at the ingestion edge; the
//! rest of the workspace only ever sees the canonical [`Order`].

use lpg_core::{
    ConfirmCode, DeliveryStatus, GeoPoint, Order, OrderId, OrderKind, ServiceType, TimeWindow,
};
use serde::{Deserialize, Serialize};

fn default_service_type() -> ServiceType {
    ServiceType::PickupFromHome
}

fn default_time_slot() -> TimeWindow {
    TimeWindow::Morning
}

fn default_delivery_window() -> TimeWindow {
    TimeWindow::Afternoon
}

fn default_status() -> DeliveryStatus {
    DeliveryStatus::Pending
}

/// An order as the backend sends it. Field mapping table:
///
/// | wire (either spelling)            | canonical                |
/// |-----------------------------------|--------------------------|
/// | `order_id` / `orderId`            | `id`                     |
/// | `cylinder_type` / `cylinderType`  | `descriptor` + `kind`    |
/// | `unique_code` / `uniqueCode`      | `code`                   |
/// | `failed_note` / `failedNote`      | `failed_note`            |
/// | `service_type` / `serviceType`    | `service_type`           |
/// | `time_slot` / `timeSlot`          | `time_slot`              |
/// | `delivery_window`/`deliveryWindow`| `delivery_window`        |
/// | `location` or `location_lat`+`location_lng` | `location`     |
/// | `status`, `address`               | as-is                    |
///
/// Missing geolocation defaults to `(0, 0)` on the wire; that sentinel
/// becomes `None` here and never reaches the clusterer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOrder {
    #[serde(alias = "order_id", default)]
    pub order_id: String,
    #[serde(alias = "cylinder_type", default)]
    pub cylinder_type: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub location: Option<WireLocation>,
    #[serde(alias = "location_lat", default, skip_serializing_if = "Option::is_none")]
    pub location_lat: Option<f64>,
    #[serde(alias = "location_lng", default, skip_serializing_if = "Option::is_none")]
    pub location_lng: Option<f64>,
    #[serde(default = "default_status")]
    pub status: DeliveryStatus,
    #[serde(alias = "unique_code", default)]
    pub unique_code: String,
    #[serde(alias = "failed_note", default, skip_serializing_if = "Option::is_none")]
    pub failed_note: Option<String>,
    #[serde(alias = "service_type", default = "default_service_type")]
    pub service_type: ServiceType,
    #[serde(alias = "time_slot", default = "default_time_slot")]
    pub time_slot: TimeWindow,
    #[serde(alias = "delivery_window", default = "default_delivery_window")]
    pub delivery_window: TimeWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireLocation {
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
}

impl WireOrder {
    /// Resolve the location from whichever shape the wire used, mapping
    /// the `(0, 0)` sentinel (and absence) to `None`.
    fn resolved_location(&self) -> Option<GeoPoint> {
        let point = match (self.location, self.location_lat, self.location_lng) {
            (Some(nested), _, _) => GeoPoint::new(nested.lat, nested.lng),
            (None, Some(lat), Some(lng)) => GeoPoint::new(lat, lng),
            _ => GeoPoint::new(0.0, 0.0),
        };
        (!point.is_sentinel()).then_some(point)
    }

    /// Normalize into the canonical order shape.
    pub fn into_order(self) -> Order {
        let location = self.resolved_location();
        Order {
            id: OrderId::new(self.order_id.trim()),
            kind: OrderKind::classify(&self.cylinder_type),
            descriptor: self.cylinder_type,
            address: self.address.trim().to_string(),
            location,
            status: self.status,
            code: ConfirmCode::from(self.unique_code),
            failed_note: self.failed_note,
            service_type: self.service_type,
            time_slot: self.time_slot,
            delivery_window: self.delivery_window,
            created_at_ms: 0,
        }
    }
}

impl From<&Order> for WireOrder {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id.as_str().to_string(),
            cylinder_type: order.descriptor.clone(),
            address: order.address.clone(),
            location: order.location.map(|p| WireLocation { lat: p.lat, lng: p.lng }),
            location_lat: None,
            location_lng: None,
            status: order.status,
            unique_code: order.code.as_str().to_string(),
            failed_note: order.failed_note.clone(),
            service_type: order.service_type,
            time_slot: order.time_slot,
            delivery_window: order.delivery_window,
        }
    }
}

/// Normalize a fetched batch.
pub fn normalize_orders(orders: Vec<WireOrder>) -> Vec<Order> {
    orders.into_iter().map(WireOrder::into_order).collect()
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
