//! Audit entry types.
//!
//! `AuditEntry` is a single link in the hash chain — immutable once
//! persisted.  `AuditEventDraft` is the caller-facing input the writer turns
//! into an entry: it carries the event description and nothing about
//! hashing or chain position.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::AuditEventType;

/// A single entry in the tamper-evident audit chain.
///
/// Each entry commits to the previous entry via `previous_entry_hash`,
/// forming an append-only chain.  Modifying any non-hash field invalidates
/// `hash`; removing or reordering an entry invalidates the next entry's
/// `previous_entry_hash`.  The verifier detects both.
///
/// The chain's logical order is the append order as persisted by the store,
/// never the timestamp order — two entries can share a timestamp at
/// sub-resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique, chain-position-independent identifier.
    pub id: Uuid,

    /// Creation time (UTC), stamped by the writer's clock.
    pub timestamp: DateTime<Utc>,

    /// The event classification, from the fixed taxonomy.
    pub event_type: AuditEventType,

    /// The authenticated principal, absent for unauthenticated events
    /// (e.g. a failed login with an unknown user).
    pub actor_user_id: Option<i64>,

    /// Display-name snapshot at event time.  A historical record, not a
    /// live reference — later username changes do not alter it.
    pub actor_username: Option<String>,

    /// Request provenance.
    pub source_ip: Option<String>,
    pub user_agent: Option<String>,

    /// The entity acted upon, if any.
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,

    /// Short free-text description; defaults to the event type's wire name.
    pub action: String,

    /// Open event-specific context.  Stored as a sorted map so a storage
    /// round-trip can never reorder keys out from under the hash.
    pub details: BTreeMap<String, serde_json::Value>,

    /// The `hash` of the immediately preceding entry at append time, or
    /// [`AuditEntry::GENESIS_HASH`] for the first entry of the chain.
    pub previous_entry_hash: String,

    /// Lowercase hex SHA-256 over the canonical encoding of every field
    /// above concatenated with `previous_entry_hash`.
    pub hash: String,
}

impl AuditEntry {
    /// The sentinel previous-hash for the first entry in a chain.
    pub const GENESIS_HASH: &'static str = "";
}

/// The caller-supplied description of an event, before chaining.
///
/// Built with the `new` constructor plus builder-lite setters:
///
/// ```rust,ignore
/// let draft = AuditEventDraft::new(AuditEventType::DataAccess)
///     .actor(7, "j.keller")
///     .resource("care_plan", "42")
///     .detail("fields", serde_json::json!(["goals", "tasks"]));
/// ```
#[derive(Debug, Clone)]
pub struct AuditEventDraft {
    pub event_type: AuditEventType,
    pub actor_user_id: Option<i64>,
    pub actor_username: Option<String>,
    pub source_ip: Option<String>,
    pub user_agent: Option<String>,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub action: Option<String>,
    pub details: BTreeMap<String, serde_json::Value>,
}

impl AuditEventDraft {
    /// Start a draft for the given event type.  Everything else is optional.
    pub fn new(event_type: AuditEventType) -> Self {
        Self {
            event_type,
            actor_user_id: None,
            actor_username: None,
            source_ip: None,
            user_agent: None,
            resource_type: None,
            resource_id: None,
            action: None,
            details: BTreeMap::new(),
        }
    }

    /// Record the authenticated principal and a username snapshot.
    pub fn actor(mut self, user_id: i64, username: impl Into<String>) -> Self {
        self.actor_user_id = Some(user_id);
        self.actor_username = Some(username.into());
        self
    }

    /// Record request provenance.
    pub fn provenance(mut self, source_ip: impl Into<String>, user_agent: impl Into<String>) -> Self {
        self.source_ip = Some(source_ip.into());
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Record the entity acted upon.
    pub fn resource(mut self, resource_type: impl Into<String>, resource_id: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Override the free-text action description.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Attach one key of event-specific context.
    ///
    /// Callers must not place secrets here — the writer hashes what it is
    /// given; redaction happens only for keys configured on the writer's
    /// redaction hook.
    pub fn detail(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.details.insert(key.into(), value);
        self
    }
}
