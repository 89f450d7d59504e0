//! Chain-replay integrity verification.
//!
//! The verifier walks a slice of the chain in true append order and runs
//! two independent checks per entry:
//!
//! 1. **Content** — recompute the hash from the stored fields and the
//!    entry's own stored `previous_entry_hash`; a mismatch means the
//!    entry's content was edited.
//! 2. **Linkage** — compare the stored `previous_entry_hash` against the
//!    hash replayed from the preceding entry; a mismatch means an entry
//!    was removed, reordered, or its link forged.
//!
//! The checks stay separate because a tamper that edits a field AND forges
//! a matching `previous_entry_hash` on the same row passes check 1 — only
//! check 2 catches it.  Verification continues past every break so one
//! call reports the full extent of tampering.

use std::sync::Arc;

use tracing::{info, warn};

use carechain_audit::expected_entry_hash;
use carechain_contracts::{AuditEntry, AuditResult, ChainReport, TimeRange};
use carechain_core::AuditStore;

/// Verify a slice of the chain, given in true append order.
///
/// The expected previous hash is seeded from the first entry's own claim:
/// verifying history back to genesis is the same operation over a wider
/// range.  An empty slice is trivially valid.
///
/// A broken chain is a negative *result*, not an error — the only failure
/// here is an entry whose fields cannot be canonically encoded.
pub fn verify_entries(entries: &[AuditEntry]) -> AuditResult<ChainReport> {
    let Some(first) = entries.first() else {
        return Ok(ChainReport::intact(0));
    };

    let mut broken_entry_ids = Vec::new();
    let mut expected_previous = first.previous_entry_hash.clone();

    for entry in entries {
        let mut broken = false;

        // Check 1: content, against the entry's own stored link.
        let recomputed = expected_entry_hash(entry)?;
        if recomputed != entry.hash {
            warn!(entry_id = %entry.id, "content hash mismatch");
            broken = true;
        }

        // Check 2: linkage, against the replayed chain.
        if entry.previous_entry_hash != expected_previous {
            warn!(entry_id = %entry.id, "chain link mismatch");
            broken = true;
        }

        if broken {
            broken_entry_ids.push(entry.id);
        }

        // Advance using the STORED hash so later links are still checked
        // against what the store claims, and every break gets reported.
        expected_previous = entry.hash.clone();
    }

    Ok(ChainReport {
        valid: broken_entry_ids.is_empty(),
        broken_entry_ids,
        entries_checked: entries.len(),
    })
}

/// Store-backed integrity verification over a time range.
pub struct IntegrityVerifier {
    store: Arc<dyn AuditStore>,
}

impl IntegrityVerifier {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Verify every entry whose timestamp falls inside `range`.
    ///
    /// Entries are loaded in append order — never re-sorted by timestamp,
    /// which would make linkage checks meaningless when timestamps collide.
    pub async fn verify(&self, range: &TimeRange) -> AuditResult<ChainReport> {
        range.validate()?;

        let entries = self.store.select_range(range).await?;
        let report = verify_entries(&entries)?;

        info!(
            entries_checked = report.entries_checked,
            valid = report.valid,
            broken = report.broken_entry_ids.len(),
            "integrity verification finished"
        );

        Ok(report)
    }
}
