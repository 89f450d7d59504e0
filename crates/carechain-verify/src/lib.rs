//! # carechain-verify
//!
//! Chain-replay integrity verification for the CARECHAIN audit trail.
//!
//! Uses the same canonicalization and hashing as the writer
//! (`carechain-audit`) — shared, never duplicated — to independently
//! recompute every entry's hash and replay the chain's links.  Any
//! retroactive edit, deletion, or reordering in the backing store surfaces
//! in the resulting [`ChainReport`](carechain_contracts::ChainReport).

pub mod verifier;

pub use verifier::{verify_entries, IntegrityVerifier};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};

    use carechain_audit::{expected_entry_hash, AuditLogWriter, MemoryAuditStore};
    use carechain_contracts::{AuditError, AuditEventDraft, AuditEventType, TimeRange};
    use carechain_core::ManualClock;

    use crate::{verify_entries, IntegrityVerifier};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn base_time() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap()
    }

    fn full_range() -> TimeRange {
        TimeRange::new(base_time(), base_time() + Duration::minutes(10))
    }

    fn test_writer(store: Arc<MemoryAuditStore>) -> AuditLogWriter {
        AuditLogWriter::with_clock(store, Arc::new(ManualClock::starting_at(base_time())))
    }

    /// The three-entry scenario from the operator runbook: login, care-plan
    /// access, logout.
    async fn seeded_scenario() -> Arc<MemoryAuditStore> {
        let store = Arc::new(MemoryAuditStore::new());
        let writer = test_writer(store.clone());

        writer
            .append(AuditEventDraft::new(AuditEventType::LoginSuccess).actor(7, "j.keller"))
            .await
            .unwrap();
        writer
            .append(
                AuditEventDraft::new(AuditEventType::DataAccess)
                    .actor(7, "j.keller")
                    .resource("care_plan", "42"),
            )
            .await
            .unwrap();
        writer
            .append(AuditEventDraft::new(AuditEventType::Logout).actor(7, "j.keller"))
            .await
            .unwrap();
        store
    }

    // ── Clean chains verify ──────────────────────────────────────────────────

    #[tokio::test]
    async fn untouched_chain_is_valid() {
        let store = seeded_scenario().await;
        let verifier = IntegrityVerifier::new(store);

        let report = verifier.verify(&full_range()).await.unwrap();
        assert!(report.valid);
        assert!(report.broken_entry_ids.is_empty());
        assert_eq!(report.entries_checked, 3);
    }

    #[tokio::test]
    async fn empty_range_is_trivially_valid() {
        let store = seeded_scenario().await;
        let verifier = IntegrityVerifier::new(store);

        let empty = TimeRange::new(
            base_time() + Duration::hours(5),
            base_time() + Duration::hours(6),
        );
        let report = verifier.verify(&empty).await.unwrap();
        assert!(report.valid);
        assert_eq!(report.entries_checked, 0);
    }

    #[tokio::test]
    async fn genesis_only_range_is_valid() {
        let store = Arc::new(MemoryAuditStore::new());
        let writer = test_writer(store.clone());
        writer
            .append(AuditEventDraft::new(AuditEventType::SystemStartup))
            .await
            .unwrap();

        let report = IntegrityVerifier::new(store)
            .verify(&full_range())
            .await
            .unwrap();
        assert!(report.valid);
        assert_eq!(report.entries_checked, 1);
    }

    // ── Tamper detection (content) ───────────────────────────────────────────

    #[tokio::test]
    async fn edited_field_breaks_exactly_that_entry() {
        let store = seeded_scenario().await;
        let tampered_id = store.entries().await[1].id;

        // Edit the stored resource id, as in the operator runbook example.
        store
            .tamper_with(1, |entry| {
                entry.resource_id = Some("43".to_string());
            })
            .await
            .unwrap();

        let report = IntegrityVerifier::new(store)
            .verify(&full_range())
            .await
            .unwrap();

        assert!(!report.valid);
        assert_eq!(
            report.broken_entry_ids,
            vec![tampered_id],
            "only the edited entry's own hash mismatches; its neighbours still link"
        );
    }

    #[tokio::test]
    async fn every_broken_entry_is_reported_not_just_the_first() {
        let store = Arc::new(MemoryAuditStore::new());
        let writer = test_writer(store.clone());
        for i in 0..5 {
            writer
                .append(AuditEventDraft::new(AuditEventType::DataAccess).actor(i, "bulk"))
                .await
                .unwrap();
        }

        let ids: Vec<_> = store.entries().await.iter().map(|e| e.id).collect();
        store
            .tamper_with(1, |e| e.action = "edited".to_string())
            .await
            .unwrap();
        store
            .tamper_with(3, |e| e.action = "also edited".to_string())
            .await
            .unwrap();

        let report = IntegrityVerifier::new(store)
            .verify(&full_range())
            .await
            .unwrap();

        assert!(!report.valid);
        assert_eq!(report.broken_entry_ids, vec![ids[1], ids[3]]);
    }

    // ── Tamper detection (deletion / reorder) ────────────────────────────────

    #[tokio::test]
    async fn deleting_an_entry_breaks_its_successor() {
        let store = seeded_scenario().await;
        let entries = store.entries().await;

        // Rebuild the slice without the middle entry: the logout's stored
        // link now points at a hash that never appears before it.
        let without_middle = vec![entries[0].clone(), entries[2].clone()];
        let report = verify_entries(&without_middle).unwrap();

        assert!(!report.valid);
        assert_eq!(report.broken_entry_ids, vec![entries[2].id]);
    }

    #[tokio::test]
    async fn swapping_entries_breaks_the_chain() {
        let store = Arc::new(MemoryAuditStore::new());
        let writer = test_writer(store.clone());
        for i in 0..5 {
            writer
                .append(AuditEventDraft::new(AuditEventType::DataAccess).actor(i, "bulk"))
                .await
                .unwrap();
        }

        // Swap two non-adjacent entries in the backing store.
        store.swap_entries(1, 3).await.unwrap();

        let report = IntegrityVerifier::new(store)
            .verify(&full_range())
            .await
            .unwrap();

        assert!(!report.valid);
        assert!(
            !report.broken_entry_ids.is_empty(),
            "a reorder must break at least one link between the swap points"
        );
    }

    // ── Forged link on an edited row ─────────────────────────────────────────

    /// A tamper that edits a field AND recomputes that row's hash over a
    /// forged `previous_entry_hash` passes the content check — the linkage
    /// check against the replayed chain must still catch it.
    #[tokio::test]
    async fn forged_consistent_row_is_caught_by_linkage() {
        let store = seeded_scenario().await;
        let tampered_id = store.entries().await[1].id;

        store
            .tamper_with(1, |entry| {
                entry.resource_id = Some("43".to_string());
                entry.previous_entry_hash = "f".repeat(64);
                entry.hash = expected_entry_hash(entry).unwrap();
            })
            .await
            .unwrap();

        let report = IntegrityVerifier::new(store)
            .verify(&full_range())
            .await
            .unwrap();

        assert!(!report.valid);
        assert!(report.broken_entry_ids.contains(&tampered_id));
    }

    // ── Idempotence and range validation ─────────────────────────────────────

    #[tokio::test]
    async fn verification_is_idempotent() {
        let store = seeded_scenario().await;
        store
            .tamper_with(0, |e| e.action = "edited".to_string())
            .await
            .unwrap();

        let verifier = IntegrityVerifier::new(store);
        let first = verifier.verify(&full_range()).await.unwrap();
        let second = verifier.verify(&full_range()).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let store = seeded_scenario().await;
        let verifier = IntegrityVerifier::new(store);

        let inverted = TimeRange::new(base_time() + Duration::hours(1), base_time());
        let err = verifier.verify(&inverted).await.unwrap_err();
        assert!(matches!(err, AuditError::InvalidRange { .. }));
    }

    // ── Mid-chain ranges seed from the first entry's claim ───────────────────

    #[tokio::test]
    async fn partial_range_trusts_its_first_entry() {
        let store = seeded_scenario().await;
        let verifier = IntegrityVerifier::new(store);

        // Skip the genesis entry: the slice starts mid-chain and must seed
        // from the second entry's own stored link.
        let tail = TimeRange::new(
            base_time() + Duration::seconds(1),
            base_time() + Duration::minutes(10),
        );
        let report = verifier.verify(&tail).await.unwrap();

        assert!(report.valid);
        assert_eq!(report.entries_checked, 2);
    }
}
