// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named service windows and the customer status-check gate.
//!
//! The gate is a rate-limiting courtesy, not a consistency mechanism:
//! customer-facing "check for update" calls are allowed only between the
//! start of the order's scheduled slot and a grace period after its
//! delivery window closes, and never once the order has settled.

use crate::clock::Clock;
use crate::order::Order;
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Grace period after the delivery window during which checks stay open.
const GRACE_MINUTES: i64 = 120;

/// A named time-of-day window for pickups, drop-offs, and deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Morning,
    Afternoon,
    Evening,
}

impl TimeWindow {
    /// Local-time bounds of the window, inclusive start, exclusive end.
    pub fn bounds(&self) -> (NaiveTime, NaiveTime) {
        let hm = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap_or_default();
        match self {
            TimeWindow::Morning => (hm(9), hm(12)),
            TimeWindow::Afternoon => (hm(12), hm(15)),
            TimeWindow::Evening => (hm(15), hm(18)),
        }
    }

    pub fn start(&self) -> NaiveTime {
        self.bounds().0
    }

    pub fn end(&self) -> NaiveTime {
        self.bounds().1
    }
}

crate::simple_display! {
    TimeWindow {
        Morning => "morning",
        Afternoon => "afternoon",
        Evening => "evening",
    }
}

/// Why a status check was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckDenied {
    #[error("order is already {status}; no further updates will arrive")]
    AlreadySettled { status: crate::order::DeliveryStatus },
    #[error("status checks for this order open at {opens}")]
    NotYetOpen { opens: NaiveTime },
    #[error("status checks for this order closed at {closed}")]
    Closed { closed: NaiveTime },
}

/// Decide whether a customer status check is currently permitted.
///
/// Open from the start of the scheduled slot until [`GRACE_MINUTES`] past
/// the end of the delivery window, local time. Terminal orders always deny.
pub fn check_gate(order: &Order, clock: &impl Clock) -> Result<(), CheckDenied> {
    if order.status.is_terminal() {
        return Err(CheckDenied::AlreadySettled { status: order.status });
    }

    let now = clock.time_of_day();
    let opens = order.time_slot.start().min(order.delivery_window.start());
    let closed = order
        .delivery_window
        .end()
        .overflowing_add_signed(Duration::minutes(GRACE_MINUTES))
        .0;

    if now < opens {
        return Err(CheckDenied::NotYetOpen { opens });
    }
    if now > closed {
        return Err(CheckDenied::Closed { closed });
    }
    Ok(())
}

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
