// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lpg-storage: durable order and ledger snapshots.
//!
//! The store is local-first and whole-collection: every mutation loads the
//! entire collection, applies the change, and rewrites the entire
//! collection. There are no partial updates, which keeps each rewrite
//! atomic at the file level and makes every operation safely re-runnable.

mod store;

pub use store::{JsonLedgerStore, JsonOrderStore, OrderStore, StoreError};

#[cfg(any(test, feature = "test-support"))]
pub use store::MemoryStore;
