//! The read side of the audit trail.
//!
//! `AuditReader` answers filtered, paginated queries for summaries and
//! exports.  Read-only by construction: it holds the store behind the
//! `AuditStore` trait, which exposes no mutation.

use std::sync::Arc;

use tracing::debug;

use carechain_audit::AuditConfig;
use carechain_contracts::{AuditEntry, AuditQuery, AuditResult, QueryPage};
use carechain_core::AuditStore;

/// Filtered, paginated access to stored audit entries.
pub struct AuditReader {
    store: Arc<dyn AuditStore>,
    config: AuditConfig,
}

impl AuditReader {
    /// A reader over `store` with default pagination limits.
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self::with_config(store, AuditConfig::default())
    }

    pub fn with_config(store: Arc<dyn AuditStore>, config: AuditConfig) -> Self {
        Self { store, config }
    }

    /// Run one query.
    ///
    /// Entries come back in reverse-chronological append order (most
    /// recent first); `total` is the full matching count regardless of
    /// pagination.  Fails with `InvalidRange` before touching storage when
    /// the range is inverted.
    pub async fn query(&self, query: &AuditQuery) -> AuditResult<QueryPage> {
        query.range.validate()?;

        let in_range = self.store.select_range(&query.range).await?;

        let mut matching: Vec<AuditEntry> = in_range
            .into_iter()
            .filter(|entry| Self::matches(query, entry))
            .collect();
        let total = matching.len() as u64;

        // Display order: newest first.  The slice arrived in append order,
        // so reversing keeps sub-second collisions in a stable order.
        matching.reverse();

        let limit = self.effective_limit(query.limit);
        let entries: Vec<AuditEntry> = matching
            .into_iter()
            .skip(query.offset)
            .take(limit)
            .collect();

        debug!(
            total,
            returned = entries.len(),
            offset = query.offset,
            limit,
            "audit query answered"
        );

        Ok(QueryPage { entries, total })
    }

    fn matches(query: &AuditQuery, entry: &AuditEntry) -> bool {
        if let Some(event_type) = query.event_type {
            if entry.event_type != event_type {
                return false;
            }
        }
        if let Some(user_id) = query.actor_user_id {
            if entry.actor_user_id != Some(user_id) {
                return false;
            }
        }
        if let Some(resource_type) = &query.resource_type {
            if entry.resource_type.as_deref() != Some(resource_type.as_str()) {
                return false;
            }
        }
        if let Some(resource_id) = &query.resource_id {
            if entry.resource_id.as_deref() != Some(resource_id.as_str()) {
                return false;
            }
        }
        true
    }

    /// Clamp a requested limit: 0 means the configured default, anything
    /// above the ceiling is cut to the ceiling.
    fn effective_limit(&self, requested: usize) -> usize {
        if requested == 0 {
            self.config.default_page_size
        } else {
            requested.min(self.config.max_page_size)
        }
    }
}
