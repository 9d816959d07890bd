// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Assignment ledger: which cluster is claimed by which driver.
//!
//! Entries are keyed by a content fingerprint of the cluster's member
//! order ids, not by the cluster's position in a clustering run, so the
//! local record survives re-clustering as long as membership is
//! unchanged. The authoritative record lives server-side, keyed by the
//! concrete order ids; this ledger is the local cache used for UI
//! highlighting.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use smol_str::SmolStr;

/// Content-addressed cluster identity: SHA-256 over the sorted member
/// order ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterFingerprint(SmolStr);

impl ClusterFingerprint {
    pub fn of_members<'a>(ids: impl Iterator<Item = &'a str>) -> Self {
        let mut members: Vec<&str> = ids.collect();
        members.sort_unstable();

        let mut hasher = Sha256::new();
        for id in members {
            hasher.update(id.as_bytes());
            hasher.update([0u8]);
        }
        let digest = hasher.finalize();
        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest {
            hex.push_str(&format!("{byte:02x}"));
        }
        Self(SmolStr::new(&hex))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClusterFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Local cache of cluster → driver claims.
///
/// Both operations are idempotent: repeating an assign or unassign leaves
/// the ledger in the same end state, so failed syncs are safely
/// re-triggerable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentLedger {
    entries: IndexMap<ClusterFingerprint, String>,
}

impl AssignmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a claim, overwriting any prior claim for the same cluster.
    pub fn assign(&mut self, cluster: ClusterFingerprint, driver_email: impl Into<String>) {
        self.entries.insert(cluster, driver_email.into());
    }

    /// Clear a claim. Unassigning an unknown cluster is a no-op.
    pub fn unassign(&mut self, cluster: &ClusterFingerprint) {
        self.entries.shift_remove(cluster);
    }

    /// The driver claiming this cluster, if any.
    pub fn driver_for(&self, cluster: &ClusterFingerprint) -> Option<&str> {
        self.entries.get(cluster).map(String::as_str)
    }

    pub fn is_assigned(&self, cluster: &ClusterFingerprint) -> bool {
        self.entries.contains_key(cluster)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Claims in first-assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&ClusterFingerprint, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
