// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Admin flow: cluster the undelivered orders and hand clusters to drivers.

use crate::EngineError;
use lpg_adapters::DeliveryApi;
use lpg_dispatch::{cluster_undelivered, AssignmentLedger, Cluster, SnapPrecision};
use lpg_storage::OrderStore;

/// The admin console: clustering plus assignment.
///
/// Clusters are recomputed fresh from the store snapshot on every request;
/// only the ledger (keyed by cluster content, not list position) persists
/// between runs. The external assignment service is the source of truth,
/// keyed by concrete order ids; the ledger is the local cache behind the
/// "already assigned" highlight.
pub struct AdminConsole<S, A> {
    store: S,
    api: A,
    ledger: AssignmentLedger,
    precision: SnapPrecision,
}

impl<S: OrderStore, A: DeliveryApi> AdminConsole<S, A> {
    pub fn new(store: S, api: A) -> Self {
        Self { store, api, ledger: AssignmentLedger::new(), precision: SnapPrecision::default() }
    }

    /// Override the grid snap factor. The default matches the service's
    /// established ~0.01° cells.
    pub fn with_precision(mut self, precision: SnapPrecision) -> Self {
        self.precision = precision;
        self
    }

    /// Adopt a previously persisted ledger snapshot.
    pub fn with_ledger(mut self, ledger: AssignmentLedger) -> Self {
        self.ledger = ledger;
        self
    }

    /// Recompute clusters from the current store snapshot.
    ///
    /// Empty result means no undelivered orders with a location exist.
    pub fn clusters(&self) -> Result<Vec<Cluster>, EngineError> {
        let orders = self.store.load()?;
        Ok(cluster_undelivered(&orders, self.precision))
    }

    /// The driver currently claiming this cluster, if any.
    pub fn assigned_driver(&self, cluster: &Cluster) -> Option<&str> {
        self.ledger.driver_for(&cluster.fingerprint())
    }

    /// Assign a cluster to a driver.
    ///
    /// Posts the cluster's concrete order ids to the assignment service
    /// first; the local claim is recorded only on success, so a transport
    /// failure or server rejection leaves the ledger untouched and the
    /// operation safely retryable.
    pub async fn assign(&mut self, cluster: &Cluster, driver_email: &str) -> Result<(), EngineError> {
        if cluster.is_empty() {
            return Err(EngineError::EmptyCluster);
        }
        let order_ids: Vec<_> = cluster.orders.iter().map(|o| o.id.clone()).collect();
        self.api.assign_orders(driver_email, &order_ids).await?;

        self.ledger.assign(cluster.fingerprint(), driver_email);
        tracing::info!(driver = driver_email, orders = order_ids.len(), "cluster assigned");
        Ok(())
    }

    /// Clear the local claim for a cluster. Idempotent; unassigning an
    /// unclaimed cluster is a no-op.
    pub fn unassign(&mut self, cluster: &Cluster) {
        self.ledger.unassign(&cluster.fingerprint());
    }

    /// The current ledger, for persistence.
    pub fn ledger(&self) -> &AssignmentLedger {
        &self.ledger
    }
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
