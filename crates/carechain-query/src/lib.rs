//! # carechain-query
//!
//! Range and filter queries over the CARECHAIN audit trail.
//!
//! A time range is mandatory on every query — unbounded scans are not part
//! of the contract.  Filters (event type, actor, resource) are
//! AND-combined; results are paginated and returned newest-first.

pub mod reader;

pub use reader::AuditReader;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};

    use carechain_audit::{AuditConfig, AuditLogWriter, MemoryAuditStore};
    use carechain_contracts::{AuditError, AuditEventDraft, AuditEventType, AuditQuery, TimeRange};
    use carechain_core::ManualClock;

    use crate::AuditReader;

    // ── Helpers ───────────────────────────────────────────────────────────────

    const BASE_YEAR: i32 = 2026;

    fn base_time() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(BASE_YEAR, 4, 1, 8, 0, 0).unwrap()
    }

    /// Append a small mixed batch: logins for users 1 and 2, care-plan
    /// accesses for user 1, one deletion for user 2.  One entry per second
    /// starting at `base_time()`.
    async fn seeded_store() -> Arc<MemoryAuditStore> {
        let store = Arc::new(MemoryAuditStore::new());
        let clock = ManualClock::starting_at(base_time());
        let writer = AuditLogWriter::with_clock(store.clone(), Arc::new(clock));

        let drafts = vec![
            AuditEventDraft::new(AuditEventType::LoginSuccess).actor(1, "ana"),
            AuditEventDraft::new(AuditEventType::LoginSuccess).actor(2, "bo"),
            AuditEventDraft::new(AuditEventType::DataAccess)
                .actor(1, "ana")
                .resource("care_plan", "42"),
            AuditEventDraft::new(AuditEventType::DataAccess)
                .actor(1, "ana")
                .resource("care_plan", "43"),
            AuditEventDraft::new(AuditEventType::DataDeletion)
                .actor(2, "bo")
                .resource("document", "d-9"),
            AuditEventDraft::new(AuditEventType::Logout).actor(1, "ana"),
        ];
        for draft in drafts {
            writer.append(draft).await.unwrap();
        }
        store
    }

    fn full_range() -> TimeRange {
        TimeRange::new(base_time(), base_time() + Duration::minutes(10))
    }

    // ── Range validation ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let reader = AuditReader::new(seeded_store().await);
        let range = TimeRange::new(base_time() + Duration::hours(1), base_time());

        let err = reader.query(&AuditQuery::over(range)).await.unwrap_err();
        assert!(matches!(err, AuditError::InvalidRange { .. }));
    }

    // ── Ordering and totals ──────────────────────────────────────────────────

    #[tokio::test]
    async fn results_are_newest_first_with_full_total() {
        let reader = AuditReader::new(seeded_store().await);

        let page = reader.query(&AuditQuery::over(full_range())).await.unwrap();
        assert_eq!(page.total, 6);
        assert_eq!(page.entries.len(), 6);
        assert_eq!(page.entries[0].event_type, AuditEventType::Logout);
        assert_eq!(page.entries[5].event_type, AuditEventType::LoginSuccess);
    }

    #[tokio::test]
    async fn time_range_excludes_outside_entries() {
        let reader = AuditReader::new(seeded_store().await);

        // Only the first two seconds: the two logins.
        let range = TimeRange::new(base_time(), base_time() + Duration::seconds(1));
        let page = reader.query(&AuditQuery::over(range)).await.unwrap();

        assert_eq!(page.total, 2);
        assert!(page
            .entries
            .iter()
            .all(|e| e.event_type == AuditEventType::LoginSuccess));
    }

    // ── Filters are AND-combined ─────────────────────────────────────────────

    #[tokio::test]
    async fn filters_combine_with_and() {
        let reader = AuditReader::new(seeded_store().await);

        let query = AuditQuery::over(full_range())
            .event_type(AuditEventType::DataAccess)
            .actor(1)
            .resource_type("care_plan")
            .resource_id("42");
        let page = reader.query(&query).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.entries[0].resource_id.as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn actor_filter_alone() {
        let reader = AuditReader::new(seeded_store().await);

        let page = reader
            .query(&AuditQuery::over(full_range()).actor(2))
            .await
            .unwrap();
        assert_eq!(page.total, 2);
    }

    // ── Pagination ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn offset_and_limit_page_through_results() {
        let reader = AuditReader::new(seeded_store().await);

        let first = reader
            .query(&AuditQuery::over(full_range()).page(2, 0))
            .await
            .unwrap();
        let second = reader
            .query(&AuditQuery::over(full_range()).page(2, 2))
            .await
            .unwrap();

        assert_eq!(first.total, 6);
        assert_eq!(first.entries.len(), 2);
        assert_eq!(second.entries.len(), 2);
        assert_ne!(first.entries[0].id, second.entries[0].id);

        // Pages tile the reversed order without overlap.
        assert_eq!(first.entries[0].event_type, AuditEventType::Logout);
        assert_eq!(second.entries[0].event_type, AuditEventType::DataAccess);
    }

    #[tokio::test]
    async fn limit_is_clamped_to_configured_ceiling() {
        let config = AuditConfig::from_toml_str("max_page_size = 3").unwrap();
        let reader = AuditReader::with_config(seeded_store().await, config);

        let page = reader
            .query(&AuditQuery::over(full_range()).page(100, 0))
            .await
            .unwrap();
        assert_eq!(page.entries.len(), 3);
        assert_eq!(page.total, 6, "total is unaffected by clamping");
    }

    #[tokio::test]
    async fn zero_limit_uses_default_page_size() {
        let config = AuditConfig::from_toml_str("default_page_size = 4").unwrap();
        let reader = AuditReader::with_config(seeded_store().await, config);

        let page = reader.query(&AuditQuery::over(full_range())).await.unwrap();
        assert_eq!(page.entries.len(), 4);
    }
}
