//! # carechain-contracts
//!
//! Shared types, event taxonomy, and error contracts for the CARECHAIN
//! tamper-evident audit trail.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod entry;
pub mod error;
pub mod event;
pub mod query;

pub use entry::{AuditEntry, AuditEventDraft};
pub use error::{AuditError, AuditResult};
pub use event::{AuditEventType, EventCategory};
pub use query::{AuditQuery, ChainReport, QueryPage, TimeRange};
