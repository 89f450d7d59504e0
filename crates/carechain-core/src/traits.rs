//! Trait seams between the audit core and its collaborators.
//!
//! The core consumes exactly two external capabilities:
//!
//! - `AuditStore` — an append-only persistence collaborator
//! - `Clock`      — a time source, injected so tests control timestamps
//!
//! Both are object-safe and `Send + Sync` so implementations can be shared
//! across request-handling tasks behind an `Arc`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use carechain_contracts::{AuditEntry, AuditResult, TimeRange};

/// An append-only store for audit entries.
///
/// The trait deliberately exposes no update or delete — entries are
/// immutable once persisted.  `select_range` and `last_in_append_order`
/// must return entries in **append order** (the order `insert` calls
/// completed), never re-sorted by timestamp: chain verification depends on
/// the true append order.
///
/// # Multi-instance deployments
///
/// The writer serializes appends within one process.  When several
/// processes share one store, the implementation itself must provide the
/// equivalent guarantee — e.g. a strictly-increasing sequence column with a
/// uniqueness constraint, or a conditional insert keyed on the expected
/// previous hash.  An implementation without such a guarantee can silently
/// fork the chain under multi-instance load.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Persist one entry as a single atomic append.
    ///
    /// On error the entry must not be visible to any reader — partial
    /// writes break chain verification for every later entry.
    async fn insert(&self, entry: AuditEntry) -> AuditResult<()>;

    /// The most recently appended entry, or `None` for an empty chain.
    async fn last_in_append_order(&self) -> AuditResult<Option<AuditEntry>>;

    /// All entries whose timestamp falls inside `range`, in append order.
    async fn select_range(&self, range: &TimeRange) -> AuditResult<Vec<AuditEntry>>;
}

/// A wall-clock source.
///
/// Injected into the writer so tests can pin timestamps.  Timestamps are
/// non-decreasing within one writer process but carry no global
/// monotonicity guarantee across restarts or clock adjustments — which is
/// why chain order is append order, not timestamp order.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
