//! Error types for the CARECHAIN audit core.
//!
//! All fallible operations in the audit crates return `AuditResult<T>`.
//! Caller errors (`InvalidEventType`, `InvalidRange`, `Encoding`) are
//! rejected before any side effect; `Storage` failures propagate to the
//! caller unchanged — the core performs no retries and never swallows a
//! persistence failure.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// The unified error type for the CARECHAIN audit core.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The supplied event type name is not part of the fixed taxonomy.
    #[error("unknown audit event type '{name}'")]
    InvalidEventType { name: String },

    /// The entry could not be canonically encoded for hashing.
    ///
    /// Raised before any write — a malformed `details` payload never
    /// produces a partial entry.
    #[error("canonical encoding failed: {reason}")]
    Encoding { reason: String },

    /// The append-only store rejected or failed an operation.
    ///
    /// The triggering event must be treated as NOT recorded; whether the
    /// surrounding business action proceeds anyway is the caller's policy.
    #[error("audit storage failure: {reason}")]
    Storage { reason: String },

    /// A query or verification range has `start` after `end`.
    #[error("invalid time range: start {start} is after end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl From<serde_json::Error> for AuditError {
    fn from(e: serde_json::Error) -> Self {
        AuditError::Encoding {
            reason: e.to_string(),
        }
    }
}

/// Convenience alias used throughout the CARECHAIN crates.
pub type AuditResult<T> = Result<T, AuditError>;
