// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Route sequencing for a driver's active orders.
//!
//! Stops are grouped by exact trimmed-address string match (not by
//! geolocation; differently formatted text for the same place makes
//! separate groups, a compatibility contract). Within a group, stops sort
//! ascending by numeric order id; groups concatenate in first-encounter
//! order, and the first flattened stop is the designated next stop. No
//! claim is made that the next stop is geographically nearest.

use indexmap::IndexMap;
use lpg_core::Order;

/// One order within a route group's sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub order: Order,
    /// Index of the owning group in the plan
    pub group: usize,
    /// Position within the owning group
    pub position: usize,
}

/// A driver's active orders sharing one address string.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGroup {
    pub address: String,
    pub stops: Vec<Order>,
}

/// A sequenced route: groups plus the flattened stop list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutePlan {
    pub groups: Vec<RouteGroup>,
}

impl RoutePlan {
    /// Flattened stop sequence across all groups.
    pub fn stops(&self) -> Vec<Stop> {
        self.groups
            .iter()
            .enumerate()
            .flat_map(|(group, g)| {
                g.stops
                    .iter()
                    .enumerate()
                    .map(move |(position, order)| Stop { order: order.clone(), group, position })
            })
            .collect()
    }

    /// The designated next stop: first in the flattened sequence.
    pub fn next_stop(&self) -> Option<Stop> {
        self.stops().into_iter().next()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of stops across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.stops.len()).sum()
    }
}

/// Build the route plan from a driver's orders.
///
/// Terminal orders and orders without a confirmed id are excluded; they
/// drop out of the plan on the recomputation that follows a delivery or
/// failure.
pub fn plan_route(orders: &[Order]) -> RoutePlan {
    let mut groups: IndexMap<String, Vec<Order>> = IndexMap::new();

    for order in orders.iter().filter(|o| o.is_routable()) {
        groups.entry(order.address.trim().to_string()).or_default().push(order.clone());
    }

    let groups = groups
        .into_iter()
        .map(|(address, mut stops)| {
            stops.sort_by_key(|o| o.id.numeric());
            RouteGroup { address, stops }
        })
        .collect();

    RoutePlan { groups }
}

#[cfg(test)]
#[path = "route_tests.rs"]
mod tests;
