//! Chain-link hashing and tip derivation.
//!
//! Hash input layout (bytes, in order):
//!   1. canonical JSON of the entry's hashed fields (see `codec`)
//!   2. the previous entry's hash as UTF-8 bytes (64 ASCII hex chars, or
//!      empty for the genesis entry)
//!
//! The digest is SHA-256 for the lifetime of a chain.  Mixing algorithms
//! within one chain breaks verification, so the algorithm is a crate
//! constant rather than a per-entry choice.

use sha2::{Digest, Sha256};

use carechain_contracts::{AuditEntry, AuditResult};
use carechain_core::AuditStore;

use crate::codec::canonical_bytes;

/// The digest algorithm every chain in this deployment uses.
pub const HASH_ALGORITHM: &str = "sha256";

/// Compute a chain-link hash from canonical bytes and the previous hash.
///
/// Returns a lowercase 64-character hex string.
pub fn compute_hash(canonical: &[u8], previous_hash: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical);
    hasher.update(previous_hash.as_bytes());
    hex::encode(hasher.finalize())
}

/// Recompute the hash an entry should carry, from its stored fields.
///
/// Uses the entry's own stored `previous_entry_hash` — the content check.
/// Link continuity against the replayed chain is a separate check the
/// verifier performs; the two must never be collapsed into one.
pub fn expected_entry_hash(entry: &AuditEntry) -> AuditResult<String> {
    let canonical = canonical_bytes(entry)?;
    Ok(compute_hash(&canonical, &entry.previous_entry_hash))
}

/// Read the current chain tip from storage.
///
/// The tip is the hash of the last persisted entry, or
/// [`AuditEntry::GENESIS_HASH`] for an empty chain.  Always a storage
/// read — never an in-memory cache — so a process restart cannot fork the
/// chain by trusting stale state.
pub async fn current_tip(store: &dyn AuditStore) -> AuditResult<String> {
    Ok(store
        .last_in_append_order()
        .await?
        .map(|entry| entry.hash)
        .unwrap_or_else(|| AuditEntry::GENESIS_HASH.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_hash_is_hex_sha256() {
        let h = compute_hash(b"payload", "");
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(h, h.to_lowercase());
    }

    #[test]
    fn previous_hash_changes_the_digest() {
        let a = compute_hash(b"payload", "");
        let b = compute_hash(b"payload", &"ab".repeat(32));
        assert_ne!(a, b);
    }

    #[test]
    fn same_inputs_same_digest() {
        assert_eq!(compute_hash(b"x", "prev"), compute_hash(b"x", "prev"));
    }
}
