// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The four backend operations behind one async trait.
//!
//! Transport failures and application-level rejections are distinct: a
//! rejection means the server answered `success:false` and its error text
//! is surfaced near-verbatim; a transport failure means the call itself
//! did not complete. Neither mutates any local state at this layer, so
//! every operation is safely re-triggerable.

use crate::wire::WireOrder;
use async_trait::async_trait;
use lpg_core::{DeliveryStatus, OrderId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from backend calls
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("{0}")]
    Rejected(String),
}

/// One order's status for the batch "send updates" push.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub order_id: OrderId,
    pub status: DeliveryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_note: Option<String>,
}

#[derive(Debug, Serialize)]
struct AssignRequest<'a> {
    driver_email: &'a str,
    order_ids: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct UpdatesRequest<'a> {
    updates: &'a [StatusUpdate],
}

#[derive(Debug, Serialize)]
struct StatusCheckRequest<'a> {
    email: &'a str,
    #[serde(rename = "uniqueCode")]
    unique_code: &'a str,
}

/// Envelope every endpoint answers with.
#[derive(Debug, Default, Deserialize)]
struct ApiResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    orders: Option<Vec<WireOrder>>,
    #[serde(default)]
    order: Option<WireOrder>,
}

impl ApiResponse {
    fn accept(self) -> Result<Self, ApiError> {
        if self.success {
            Ok(self)
        } else {
            Err(ApiError::Rejected(self.error.unwrap_or_else(|| "request rejected".to_string())))
        }
    }
}

/// The backend's four operations, awaited by the triggering UI action.
/// The caller disables the triggering control while a call is in flight;
/// nothing here retries or overlaps requests.
#[async_trait]
pub trait DeliveryApi: Clone + Send + Sync + 'static {
    /// Claim concrete orders for a driver (assignment service). Keyed by
    /// order ids server-side, so it is robust to later re-clustering and
    /// idempotent on repeat.
    async fn assign_orders(&self, driver_email: &str, order_ids: &[OrderId])
        -> Result<(), ApiError>;

    /// Batch-push all non-pending statuses. On success the server returns
    /// the full authoritative order list, which replaces the local cache.
    async fn push_updates(&self, updates: &[StatusUpdate]) -> Result<Vec<WireOrder>, ApiError>;

    /// Fetch the orders assigned to the current driver session.
    async fn fetch_assigned(&self) -> Result<Vec<WireOrder>, ApiError>;

    /// Customer status check: latest state of one order, by email + code.
    async fn check_status(&self, email: &str, code: &str) -> Result<Option<WireOrder>, ApiError>;
}

/// HTTP implementation against the delivery backend.
#[derive(Clone)]
pub struct HttpDeliveryApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDeliveryApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.into() }
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<ApiResponse, ApiError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        tracing::debug!(%url, "posting to delivery backend");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        response
            .json::<ApiResponse>()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .accept()
    }
}

#[async_trait]
impl DeliveryApi for HttpDeliveryApi {
    async fn assign_orders(
        &self,
        driver_email: &str,
        order_ids: &[OrderId],
    ) -> Result<(), ApiError> {
        let body = AssignRequest {
            driver_email,
            order_ids: order_ids.iter().map(OrderId::as_str).collect(),
        };
        self.post("assignments", &body).await.map(|_| ())
    }

    async fn push_updates(&self, updates: &[StatusUpdate]) -> Result<Vec<WireOrder>, ApiError> {
        let response = self.post("orders/updates", &UpdatesRequest { updates }).await?;
        Ok(response.orders.unwrap_or_default())
    }

    async fn fetch_assigned(&self) -> Result<Vec<WireOrder>, ApiError> {
        let response = self.post("orders/assigned", &serde_json::json!({})).await?;
        Ok(response.orders.unwrap_or_default())
    }

    async fn check_status(&self, email: &str, code: &str) -> Result<Option<WireOrder>, ApiError> {
        let response =
            self.post("orders/status", &StatusCheckRequest { email, unique_code: code }).await?;
        Ok(response.order)
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{ApiError, DeliveryApi, StatusUpdate, WireOrder};
    use async_trait::async_trait;
    use lpg_core::OrderId;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded backend call
    #[derive(Debug, Clone, PartialEq)]
    pub enum ApiCall {
        Assign { driver_email: String, order_ids: Vec<String> },
        PushUpdates { updates: Vec<StatusUpdate> },
        FetchAssigned,
        CheckStatus { email: String, code: String },
    }

    #[derive(Default)]
    struct FakeApiState {
        calls: Vec<ApiCall>,
        orders: Vec<WireOrder>,
        next_error: Option<ApiError>,
    }

    /// Recording fake backend for tests.
    ///
    /// Serves `orders` from its script and records every call; one queued
    /// error fails the next call, then clears.
    #[derive(Clone, Default)]
    pub struct FakeDeliveryApi {
        state: Arc<Mutex<FakeApiState>>,
    }

    impl FakeDeliveryApi {
        pub fn new() -> Self {
            Self::default()
        }

        /// Script the orders returned by fetch/push responses.
        pub fn set_orders(&self, orders: Vec<WireOrder>) {
            self.state.lock().orders = orders;
        }

        /// Fail the next call with a transport error.
        pub fn fail_next(&self, message: impl Into<String>) {
            self.state.lock().next_error = Some(ApiError::Transport(message.into()));
        }

        /// Reject the next call with an application-level error.
        pub fn reject_next(&self, message: impl Into<String>) {
            self.state.lock().next_error = Some(ApiError::Rejected(message.into()));
        }

        /// All recorded calls, in order.
        pub fn calls(&self) -> Vec<ApiCall> {
            self.state.lock().calls.clone()
        }

        fn record(&self, call: ApiCall) -> Result<(), ApiError> {
            let mut state = self.state.lock();
            state.calls.push(call);
            match state.next_error.take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl DeliveryApi for FakeDeliveryApi {
        async fn assign_orders(
            &self,
            driver_email: &str,
            order_ids: &[OrderId],
        ) -> Result<(), ApiError> {
            self.record(ApiCall::Assign {
                driver_email: driver_email.to_string(),
                order_ids: order_ids.iter().map(|id| id.as_str().to_string()).collect(),
            })
        }

        async fn push_updates(
            &self,
            updates: &[StatusUpdate],
        ) -> Result<Vec<WireOrder>, ApiError> {
            self.record(ApiCall::PushUpdates { updates: updates.to_vec() })?;
            Ok(self.state.lock().orders.clone())
        }

        async fn fetch_assigned(&self) -> Result<Vec<WireOrder>, ApiError> {
            self.record(ApiCall::FetchAssigned)?;
            Ok(self.state.lock().orders.clone())
        }

        async fn check_status(
            &self,
            email: &str,
            code: &str,
        ) -> Result<Option<WireOrder>, ApiError> {
            self.record(ApiCall::CheckStatus {
                email: email.to_string(),
                code: code.to_string(),
            })?;
            let state = self.state.lock();
            Ok(state.orders.iter().find(|o| o.unique_code == code).cloned())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{ApiCall, FakeDeliveryApi};

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
