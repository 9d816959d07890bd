// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lpg-core: Order model and delivery lifecycle for the LPG delivery coordinator

pub mod macros;

pub mod clock;
pub mod code;
pub mod lifecycle;
pub mod order;
pub mod window;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use code::{CodeError, ConfirmCode};
pub use lifecycle::{advance, allowed_actions, ActionKind, DeliveryAction, TransitionError};
#[cfg(any(test, feature = "test-support"))]
pub use order::OrderBuilder;
pub use order::{
    DeliveryStatus, GeoPoint, Order, OrderConfig, OrderConfigBuilder, OrderId, OrderKind,
    ServiceType,
};
pub use window::{check_gate, CheckDenied, TimeWindow};
