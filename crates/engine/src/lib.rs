// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lpg-engine: the three UI-facing flows over store + dispatch + backend.
//!
//! Each flow owns its store and API handles and takes `&mut self` for
//! anything that awaits the backend, so a single UI context cannot issue
//! overlapping submissions. Failures are handled at the triggering call
//! site and every operation is safe to re-trigger: local mutations are
//! whole-collection rewrites and the backend calls are idempotent.

mod admin;
mod customer;
mod driver;

use lpg_adapters::ApiError;
use lpg_core::{CheckDenied, OrderId, TransitionError};
use lpg_storage::StoreError;
use thiserror::Error;

pub use admin::AdminConsole;
pub use customer::CustomerDesk;
pub use driver::{DriverRun, SyncMode};

/// Errors from engine flows
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    CheckDenied(#[from] CheckDenied),
    #[error("no order with id {0}")]
    UnknownOrder(OrderId),
    #[error("cluster has no members to assign")]
    EmptyCluster,
}
