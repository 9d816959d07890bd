// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling

use chrono::{NaiveTime, Timelike};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync {
    fn epoch_ms(&self) -> u64;
    /// Local wall-clock time of day, used by the status-check gate.
    fn time_of_day(&self) -> NaiveTime;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn time_of_day(&self) -> NaiveTime {
        chrono::Local::now().time()
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    epoch_ms: Arc<Mutex<u64>>,
    time_of_day: Arc<Mutex<NaiveTime>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            epoch_ms: Arc::new(Mutex::new(1_000_000)),
            time_of_day: Arc::new(Mutex::new(
                NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
            )),
        }
    }

    /// Set the epoch milliseconds value
    pub fn set_epoch_ms(&self, ms: u64) {
        *self.epoch_ms.lock() = ms;
    }

    /// Set the local time of day
    pub fn set_time_of_day(&self, time: NaiveTime) {
        *self.time_of_day.lock() = time;
    }

    /// Set the local time of day from hour/minute (seconds zero)
    pub fn set_hm(&self, hour: u32, minute: u32) {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
        *self.time_of_day.lock() = time;
    }

    /// Advance the clock by whole minutes
    pub fn advance_minutes(&self, minutes: u32) {
        let mut tod = self.time_of_day.lock();
        let total = tod.hour() * 60 + tod.minute() + minutes;
        *tod = NaiveTime::from_hms_opt((total / 60) % 24, total % 60, tod.second())
            .unwrap_or_default();
        *self.epoch_ms.lock() += u64::from(minutes) * 60_000;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn epoch_ms(&self) -> u64 {
        *self.epoch_ms.lock()
    }

    fn time_of_day(&self) -> NaiveTime {
        *self.time_of_day.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
