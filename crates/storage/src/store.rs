// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Order store and ledger snapshot persistence.

use lpg_core::Order;
use lpg_dispatch::AssignmentLedger;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The order collection, read and rewritten wholesale.
///
/// Clustering, sequencing, and the state machine all operate on a
/// snapshot from `load`; mutations go back through `replace`. Injecting
/// the trait lets every consumer run against in-memory fixtures.
pub trait OrderStore {
    fn load(&self) -> Result<Vec<Order>, StoreError>;
    fn replace(&self, orders: &[Order]) -> Result<(), StoreError>;
}

/// Write JSON to `path` via a temp file and rename, so readers never see
/// a half-written collection.
fn write_atomic(path: &Path, json: &[u8]) -> Result<(), StoreError> {
    let wrap = |source| StoreError::Write { path: path.to_path_buf(), source };
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json).map_err(wrap)?;
    fs::rename(&tmp, path).map_err(wrap)
}

fn read_json<T: serde::de::DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    match fs::read(path) {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .map_err(|source| StoreError::Parse { path: path.to_path_buf(), source }),
        // A store that has never been written is just empty
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(source) => Err(StoreError::Read { path: path.to_path_buf(), source }),
    }
}

/// File-backed order store: one JSON array in one well-known file.
#[derive(Debug, Clone)]
pub struct JsonOrderStore {
    path: PathBuf,
}

impl JsonOrderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OrderStore for JsonOrderStore {
    fn load(&self) -> Result<Vec<Order>, StoreError> {
        read_json(&self.path)
    }

    fn replace(&self, orders: &[Order]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(orders)
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), count = orders.len(), "order store rewritten");
        Ok(())
    }
}

/// File-backed snapshot of the assignment ledger.
#[derive(Debug, Clone)]
pub struct JsonLedgerStore {
    path: PathBuf,
}

impl JsonLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<AssignmentLedger, StoreError> {
        read_json(&self.path)
    }

    pub fn replace(&self, ledger: &AssignmentLedger) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(ledger)
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), claims = ledger.len(), "ledger rewritten");
        Ok(())
    }
}

/// In-memory store for tests and fixtures.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    orders: std::sync::Arc<parking_lot::Mutex<Vec<Order>>>,
}

#[cfg(any(test, feature = "test-support"))]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self { orders: std::sync::Arc::new(parking_lot::Mutex::new(orders)) }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl OrderStore for MemoryStore {
    fn load(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.orders.lock().clone())
    }

    fn replace(&self, orders: &[Order]) -> Result<(), StoreError> {
        *self.orders.lock() = orders.to_vec();
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
