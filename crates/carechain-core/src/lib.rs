//! # carechain-core
//!
//! Trait seams for the CARECHAIN audit trail.
//!
//! The audit core touches the outside world through two narrow interfaces:
//! an append-only [`AuditStore`](traits::AuditStore) and an injected
//! [`Clock`](traits::Clock).  Everything else — writer, reader, verifier —
//! is built against these traits, never against a concrete backend.

pub mod clock;
pub mod traits;

pub use clock::{ManualClock, SystemClock};
pub use traits::{AuditStore, Clock};
