//! Query and verification result types.
//!
//! `TimeRange` is mandatory on every read path — unbounded scans over the
//! chain are not part of the contract.  `ChainReport` is the verifier's
//! result: a fully broken chain is a valid negative result, never an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    entry::AuditEntry,
    error::{AuditError, AuditResult},
    event::AuditEventType,
};

/// An inclusive wall-clock interval over entry timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Reject inverted ranges before any storage access.
    pub fn validate(&self) -> AuditResult<()> {
        if self.start > self.end {
            return Err(AuditError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Whether `ts` falls inside this range (inclusive on both ends).
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }
}

/// A filtered, paginated query over the audit trail.
///
/// All filters are AND-combined.  `limit = 0` means "use the reader's
/// configured default page size".
#[derive(Debug, Clone)]
pub struct AuditQuery {
    pub range: TimeRange,
    pub event_type: Option<AuditEventType>,
    pub actor_user_id: Option<i64>,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl AuditQuery {
    /// A query over `range` with no filters and default pagination.
    pub fn over(range: TimeRange) -> Self {
        Self {
            range,
            event_type: None,
            actor_user_id: None,
            resource_type: None,
            resource_id: None,
            limit: 0,
            offset: 0,
        }
    }

    pub fn event_type(mut self, event_type: AuditEventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    pub fn actor(mut self, user_id: i64) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn page(mut self, limit: usize, offset: usize) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}

/// One page of query results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryPage {
    /// Matching entries in reverse-chronological append order (most recent
    /// first), after offset/limit.
    pub entries: Vec<AuditEntry>,

    /// The full matching count, independent of pagination.
    pub total: u64,
}

/// The verifier's report over one range of the chain.
///
/// `broken_entry_ids` lists every entry whose content hash or chain link
/// failed — the verifier continues past the first break so operators see
/// the full extent of tampering in one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainReport {
    pub valid: bool,
    pub broken_entry_ids: Vec<Uuid>,
    pub entries_checked: usize,
}

impl ChainReport {
    /// A report over a range with nothing broken.
    pub fn intact(entries_checked: usize) -> Self {
        Self {
            valid: true,
            broken_entry_ids: Vec::new(),
            entries_checked,
        }
    }
}
