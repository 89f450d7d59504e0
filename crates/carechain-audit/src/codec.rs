//! Canonical encoding of audit entries for hashing.
//!
//! The hash input must be byte-identical every time the same entry is
//! encoded, across process restarts and storage round-trips, for the
//! lifetime of a deployed chain.  Three things guarantee that here:
//!
//! 1. Field order is fixed by the declaration order of `CanonicalEntry`,
//!    a serialize-only view over the entry.
//! 2. The timestamp is rendered as an explicit RFC 3339 string with
//!    microsecond precision and a `Z` suffix, so no formatter variation
//!    can leak into the bytes.
//! 3. `details` is a `BTreeMap` and nested objects go through
//!    `serde_json`'s sorted map, so key order is always lexicographic.
//!
//! Absent optionals encode as JSON `null`, which is unambiguous with the
//! string `"null"`.  The entry's own `hash` and `previous_entry_hash` are
//! excluded — the previous hash is appended separately by the chain
//! hasher.
//!
//! Changing anything about this encoding invalidates every previously
//! computed hash and must be treated as a breaking chain migration.

use std::collections::BTreeMap;

use chrono::SecondsFormat;
use serde::Serialize;

use carechain_contracts::{AuditEntry, AuditEventType, AuditResult};

/// The serialize-only view fed to the digest.
///
/// Declaration order is the wire order.  Do not reorder fields.
#[derive(Serialize)]
struct CanonicalEntry<'a> {
    id: String,
    timestamp: String,
    event_type: AuditEventType,
    actor_user_id: Option<i64>,
    actor_username: Option<&'a str>,
    source_ip: Option<&'a str>,
    user_agent: Option<&'a str>,
    resource_type: Option<&'a str>,
    resource_id: Option<&'a str>,
    action: &'a str,
    details: &'a BTreeMap<String, serde_json::Value>,
}

/// Encode the hashed portion of `entry` into canonical bytes.
///
/// Pure function: same entry in, same bytes out.  Fails with
/// `AuditError::Encoding` if a `details` value cannot be serialized —
/// callers must sanitize payloads before handing them to the writer.
pub fn canonical_bytes(entry: &AuditEntry) -> AuditResult<Vec<u8>> {
    let view = CanonicalEntry {
        id: entry.id.hyphenated().to_string(),
        timestamp: entry.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
        event_type: entry.event_type,
        actor_user_id: entry.actor_user_id,
        actor_username: entry.actor_username.as_deref(),
        source_ip: entry.source_ip.as_deref(),
        user_agent: entry.user_agent.as_deref(),
        resource_type: entry.resource_type.as_deref(),
        resource_id: entry.resource_id.as_deref(),
        action: &entry.action,
        details: &entry.details,
    };

    Ok(serde_json::to_vec(&view)?)
}
