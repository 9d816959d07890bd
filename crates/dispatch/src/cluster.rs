// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Proximity clustering by coarse grid snap.
//!
//! Latitude and longitude are snapped independently to a grid cell;
//! two orders cluster together iff their snapped pairs are identical.
//! Single-pass bucketing: no adjacent-cell merging, no size bounds.

use crate::ledger::ClusterFingerprint;
use indexmap::IndexMap;
use lpg_core::Order;

/// Grid snap factor. The default (×100) gives ~0.01° cells, roughly
/// 1.1 km of latitude at the equator.
///
/// Tunable, but the default matches the service's established cell size;
/// change it only against a confirmed delivery radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPrecision(pub f64);

impl Default for SnapPrecision {
    fn default() -> Self {
        Self(100.0)
    }
}

/// A snapped grid cell: `(round(lat * p), round(lng * p))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub lat: i64,
    pub lng: i64,
}

impl CellKey {
    pub fn snap(lat: f64, lng: f64, precision: SnapPrecision) -> Self {
        Self {
            lat: (lat * precision.0).round() as i64,
            lng: (lng * precision.0).round() as i64,
        }
    }
}

/// A non-empty group of undelivered, geolocated orders sharing one cell.
///
/// The unit of admin-to-driver assignment. Its position in the cluster
/// list is display-only; identity for the assignment ledger comes from
/// [`Cluster::fingerprint`].
#[derive(Debug, Clone)]
pub struct Cluster {
    pub cell: CellKey,
    pub orders: Vec<Order>,
}

impl Cluster {
    /// Content-addressed identity: stable across re-clustering runs as
    /// long as membership is unchanged.
    pub fn fingerprint(&self) -> ClusterFingerprint {
        ClusterFingerprint::of_members(self.orders.iter().map(|o| o.id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Partition undelivered, geolocated orders into grid-cell clusters.
///
/// Orders with `status == Delivered` or no real location are silently
/// excluded. Bucket order is the order in which each cell's first member
/// was encountered in the input; an empty input yields an empty list.
pub fn cluster_undelivered(orders: &[Order], precision: SnapPrecision) -> Vec<Cluster> {
    let mut buckets: IndexMap<CellKey, Vec<Order>> = IndexMap::new();

    for order in orders.iter().filter(|o| o.is_clusterable()) {
        if let Some(point) = order.location {
            let cell = CellKey::snap(point.lat, point.lng, precision);
            buckets.entry(cell).or_default().push(order.clone());
        }
    }

    buckets
        .into_iter()
        .map(|(cell, orders)| Cluster { cell, orders })
        .collect()
}

#[cfg(test)]
#[path = "cluster_tests.rs"]
mod tests;
