// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Customer flow: the gated "check for update" action.

use crate::EngineError;
use lpg_adapters::DeliveryApi;
use lpg_core::{check_gate, Clock, Order};
use lpg_storage::OrderStore;

/// Customer-side status checks, rate-limited by the time-window gate.
pub struct CustomerDesk<S, A, C> {
    store: S,
    api: A,
    clock: C,
}

impl<S: OrderStore, A: DeliveryApi, C: Clock> CustomerDesk<S, A, C> {
    pub fn new(store: S, api: A, clock: C) -> Self {
        Self { store, api, clock }
    }

    /// Check the latest state of the order identified by this customer's
    /// email and confirmation code, merging the answer into the local
    /// cache by order id.
    ///
    /// When the order is cached locally the gate runs first: checks are
    /// refused outside the computed window and once the order is settled.
    /// The gate is a courtesy policy; the merge itself never depends on it.
    pub async fn check(&mut self, email: &str, code: &str) -> Result<Option<Order>, EngineError> {
        let mut orders = self.store.load()?;
        if let Some(local) = orders.iter().find(|o| o.code.matches(code)) {
            check_gate(local, &self.clock)?;
        }

        let Some(wire) = self.api.check_status(email, code).await? else {
            return Ok(None);
        };
        let latest = wire.into_order();

        match orders.iter_mut().find(|o| o.id == latest.id) {
            Some(cached) => *cached = latest.clone(),
            None => orders.push(latest.clone()),
        }
        self.store.replace(&orders)?;
        tracing::info!(order = %latest.id, status = %latest.status, "status check merged");
        Ok(Some(latest))
    }
}

#[cfg(test)]
#[path = "customer_tests.rs"]
mod tests;
