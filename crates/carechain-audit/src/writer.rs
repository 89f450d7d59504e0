//! The append-only ingestion path.
//!
//! `AuditLogWriter` turns caller-supplied drafts into chained, persisted
//! entries.  The tip-read and the persist form one critical section: the
//! writer holds an async mutex across both, so two concurrent appends in
//! the same process can never compute against the same previous hash and
//! fork the chain.  Across processes the equivalent guarantee is the
//! store's responsibility (see the `AuditStore` docs).

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use carechain_contracts::{AuditEntry, AuditEventDraft, AuditResult};
use carechain_core::{AuditStore, Clock, SystemClock};

use crate::{
    chain::{compute_hash, current_tip},
    codec::canonical_bytes,
    redact::Redactor,
};

/// The audit trail's single ingestion point.
///
/// Cheap to share behind an `Arc`; all mutable state lives in the store.
pub struct AuditLogWriter {
    store: Arc<dyn AuditStore>,
    clock: Arc<dyn Clock>,
    redactor: Option<Redactor>,
    append_lock: tokio::sync::Mutex<()>,
}

impl AuditLogWriter {
    /// A writer over `store` using the system clock and no redaction.
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// A writer with an injected clock (tests, replay tooling).
    pub fn with_clock(store: Arc<dyn AuditStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            redactor: None,
            append_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Install a boundary redaction hook, applied to `details` before
    /// hashing.
    pub fn with_redactor(mut self, redactor: Redactor) -> Self {
        self.redactor = Some(redactor);
        self
    }

    /// Append one event to the chain and return the persisted entry.
    ///
    /// On any failure — encoding or storage — nothing is persisted and no
    /// tip state advances: the caller must treat the event as NOT
    /// recorded.  A failed append never poisons the writer; the next call
    /// re-reads the true tip from storage.
    pub async fn append(&self, draft: AuditEventDraft) -> AuditResult<AuditEntry> {
        // Critical section: tip read through persist.  Serializes appends
        // within this process.
        let _guard = self.append_lock.lock().await;

        let tip = current_tip(self.store.as_ref()).await?;

        let mut details = draft.details;
        if let Some(redactor) = &self.redactor {
            redactor.redact(&mut details);
        }

        let mut entry = AuditEntry {
            id: Uuid::new_v4(),
            timestamp: self.clock.now(),
            event_type: draft.event_type,
            actor_user_id: draft.actor_user_id,
            actor_username: draft.actor_username,
            source_ip: draft.source_ip,
            user_agent: draft.user_agent,
            resource_type: draft.resource_type,
            resource_id: draft.resource_id,
            action: draft
                .action
                .unwrap_or_else(|| draft.event_type.as_str().to_string()),
            details,
            previous_entry_hash: tip.clone(),
            hash: String::new(),
        };

        let canonical = canonical_bytes(&entry)?;
        entry.hash = compute_hash(&canonical, &tip);

        debug!(
            entry_id = %entry.id,
            event_type = %entry.event_type,
            previous = %short_hash(&entry.previous_entry_hash),
            "appending audit entry"
        );

        self.store.insert(entry.clone()).await?;

        info!(
            entry_id = %entry.id,
            event_type = %entry.event_type,
            hash = %short_hash(&entry.hash),
            "audit entry persisted"
        );

        Ok(entry)
    }
}

/// First 12 hex chars for log lines; the genesis sentinel shows as
/// "genesis".
fn short_hash(hash: &str) -> &str {
    if hash.is_empty() {
        "genesis"
    } else {
        &hash[..hash.len().min(12)]
    }
}
