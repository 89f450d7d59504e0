//! # carechain-audit
//!
//! Append-only, SHA-256 hash-chained audit trail for the CARECHAIN
//! case-management platform.
//!
//! ## Overview
//!
//! Every security-relevant event becomes an `AuditEntry` that links to the
//! previous entry via its SHA-256 hash.  Tampering with any entry — even a
//! single byte — breaks the chain and is detected by the verifier in
//! `carechain-verify`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use carechain_audit::{AuditLogWriter, MemoryAuditStore};
//! use carechain_contracts::{AuditEventDraft, AuditEventType};
//!
//! let store = Arc::new(MemoryAuditStore::new());
//! let writer = AuditLogWriter::new(store.clone());
//!
//! let entry = writer
//!     .append(AuditEventDraft::new(AuditEventType::LoginSuccess).actor(7, "j.keller"))
//!     .await?;
//! ```

pub mod chain;
pub mod codec;
pub mod config;
pub mod memory;
pub mod redact;
pub mod writer;

pub use chain::{compute_hash, current_tip, expected_entry_hash, HASH_ALGORITHM};
pub use codec::canonical_bytes;
pub use config::AuditConfig;
pub use memory::MemoryAuditStore;
pub use redact::{Redactor, REDACTED_PLACEHOLDER};
pub use writer::AuditLogWriter;

// ── Tests ─────────────────────────────────────────────────────────────────────
