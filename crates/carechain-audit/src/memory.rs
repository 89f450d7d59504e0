//! In-memory implementation of `AuditStore`.
//!
//! `MemoryAuditStore` is the reference store: a `Vec` of entries in append
//! order behind a `tokio::sync::RwLock`.  It backs the unit tests and the
//! demo binary; production deployments supply a database-backed
//! implementation of the same trait.
//!
//! The store also exposes `tamper_with` and `swap_entries` — storage-level
//! mutation hooks that exist solely to *simulate* an attacker editing the
//! backing store.  They are not part of the `AuditStore` contract, which
//! has no mutation surface.

use async_trait::async_trait;
use tokio::sync::RwLock;

use carechain_contracts::{AuditEntry, AuditError, AuditResult, TimeRange};
use carechain_core::AuditStore;

/// An append-only in-memory store.
#[derive(Default)]
pub struct MemoryAuditStore {
    entries: RwLock<Vec<AuditEntry>>,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// A snapshot of all entries in append order.
    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().await.clone()
    }

    /// Mutate the stored entry at `index`, bypassing the append-only
    /// contract.  Simulates backing-store tampering for tests and demos.
    pub async fn tamper_with<F>(&self, index: usize, mutate: F) -> AuditResult<()>
    where
        F: FnOnce(&mut AuditEntry),
    {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(index).ok_or_else(|| AuditError::Storage {
            reason: format!("no entry at index {index}"),
        })?;
        mutate(entry);
        Ok(())
    }

    /// Swap the append order of two stored entries.  Simulates reordering
    /// in the backing store.
    pub async fn swap_entries(&self, a: usize, b: usize) -> AuditResult<()> {
        let mut entries = self.entries.write().await;
        if a >= entries.len() || b >= entries.len() {
            return Err(AuditError::Storage {
                reason: format!("swap indices {a}/{b} out of bounds"),
            });
        }
        entries.swap(a, b);
        Ok(())
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn insert(&self, entry: AuditEntry) -> AuditResult<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn last_in_append_order(&self) -> AuditResult<Option<AuditEntry>> {
        Ok(self.entries.read().await.last().cloned())
    }

    async fn select_range(&self, range: &TimeRange) -> AuditResult<Vec<AuditEntry>> {
        // Filter by timestamp but keep the Vec's append order — chain
        // verification depends on it (never re-sort by timestamp).
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| range.contains(e.timestamp))
            .cloned()
            .collect())
    }
}
