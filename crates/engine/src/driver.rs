// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Driver flow: pull assigned orders, work the route, push results back.

use crate::EngineError;
use lpg_adapters::{normalize_orders, DeliveryApi, StatusUpdate};
use lpg_core::{advance, DeliveryAction, DeliveryStatus, Order, OrderId};
use lpg_dispatch::{plan_route, RoutePlan};
use lpg_storage::OrderStore;

/// When local transitions reach the backend.
///
/// `Batched` is the source-faithful default: transitions apply locally
/// and an explicit [`DriverRun::push`] sends everything at once, so
/// local-only state can be lost if the device resets first. `Immediate`
/// pushes after every successful transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    #[default]
    Batched,
    Immediate,
}

/// A driver's working session over their assigned orders.
pub struct DriverRun<S, A> {
    store: S,
    api: A,
    sync_mode: SyncMode,
}

impl<S: OrderStore, A: DeliveryApi> DriverRun<S, A> {
    pub fn new(store: S, api: A) -> Self {
        Self { store, api, sync_mode: SyncMode::default() }
    }

    pub fn with_sync_mode(mut self, mode: SyncMode) -> Self {
        self.sync_mode = mode;
        self
    }

    /// Fetch the orders assigned to this driver and replace the local
    /// cache with the normalized result.
    pub async fn pull(&mut self) -> Result<usize, EngineError> {
        let fetched = self.api.fetch_assigned().await?;
        let orders = normalize_orders(fetched);
        self.store.replace(&orders)?;
        tracing::info!(count = orders.len(), "assigned orders pulled");
        Ok(orders.len())
    }

    /// The current route plan over the cached orders. Delivered and
    /// failed stops drop out here, on recomputation.
    pub fn route(&self) -> Result<RoutePlan, EngineError> {
        let orders = self.store.load()?;
        Ok(plan_route(&orders))
    }

    /// Apply a driver action to one order: optimistic local transition,
    /// whole-collection rewrite, then (in `Immediate` mode) a push.
    ///
    /// A rejected transition changes nothing, locally or remotely.
    pub async fn apply(
        &mut self,
        order_id: &OrderId,
        action: &DeliveryAction,
    ) -> Result<DeliveryStatus, EngineError> {
        let mut orders = self.store.load()?;
        let order = orders
            .iter_mut()
            .find(|o| &o.id == order_id)
            .ok_or_else(|| EngineError::UnknownOrder(order_id.clone()))?;

        let next = advance(order, action)?;
        self.store.replace(&orders)?;
        tracing::info!(order = %order_id, status = %next, "order transitioned");

        if self.sync_mode == SyncMode::Immediate {
            self.push().await?;
        }
        Ok(next)
    }

    /// Batch-push every non-pending order's current status.
    ///
    /// On success the server's returned order list replaces the local
    /// cache (an empty return leaves the cache alone). On any failure the
    /// cache is untouched and the push can simply be re-triggered.
    pub async fn push(&mut self) -> Result<usize, EngineError> {
        let orders = self.store.load()?;
        let updates: Vec<StatusUpdate> = orders
            .iter()
            .filter(|o| o.status != DeliveryStatus::Pending)
            .map(|o| StatusUpdate {
                order_id: o.id.clone(),
                status: o.status,
                failed_note: o.failed_note.clone(),
            })
            .collect();

        let returned = self.api.push_updates(&updates).await?;
        if !returned.is_empty() {
            let refreshed: Vec<Order> = normalize_orders(returned);
            self.store.replace(&refreshed)?;
        }
        tracing::info!(updates = updates.len(), "status updates pushed");
        Ok(updates.len())
    }

    /// Snapshot of the cached orders (for listings).
    pub fn orders(&self) -> Result<Vec<Order>, EngineError> {
        Ok(self.store.load()?)
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
