// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lpg-dispatch: clustering, route sequencing, and the assignment ledger.
//!
//! Everything here is a pure, synchronous function over a snapshot of the
//! order store. Clusters and route plans are ephemeral: recomputed fresh
//! on every request, never persisted.

pub mod cluster;
pub mod ledger;
pub mod route;

pub use cluster::{cluster_undelivered, CellKey, Cluster, SnapPrecision};
pub use ledger::{AssignmentLedger, ClusterFingerprint};
pub use route::{plan_route, RouteGroup, RoutePlan, Stop};
