// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lpg-adapters: the wire boundary.
//!
//! Everything crossing the network goes through exactly two seams: the
//! [`wire`] normalization layer (one exhaustive mapping from the server's
//! mixed snake_case/camelCase shapes to the canonical [`lpg_core::Order`])
//! and the [`api::DeliveryApi`] trait for the four backend operations.

pub mod api;
pub mod wire;

pub use api::{ApiError, DeliveryApi, HttpDeliveryApi, StatusUpdate};
pub use wire::{normalize_orders, WireOrder};

#[cfg(any(test, feature = "test-support"))]
pub use api::{ApiCall, FakeDeliveryApi};
