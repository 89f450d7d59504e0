//! CARECHAIN Audit Trail — Demo CLI
//!
//! Exercises the real audit components (writer, reader, verifier) against
//! the in-memory store, with deliberate storage-level tampering to show
//! the verifier at work.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- tamper
//!   cargo run -p demo -- reorder
//!   cargo run -p demo -- query

use std::sync::Arc;

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use carechain_audit::{AuditLogWriter, MemoryAuditStore, Redactor};
use carechain_contracts::{
    AuditEventDraft, AuditEventType, AuditQuery, AuditResult, ChainReport, TimeRange,
};
use carechain_query::AuditReader;
use carechain_verify::IntegrityVerifier;

// ── CLI definition ────────────────────────────────────────────────────────────

/// CARECHAIN — tamper-evident audit trail demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "CARECHAIN hash-chained audit trail demo",
    long_about = "Appends audit entries to a hash chain, tampers with the\n\
                  backing store, and shows the integrity verifier reporting\n\
                  every broken entry."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every scenario in sequence.
    RunAll,
    /// Scenario 1: append, verify, edit a stored field, re-verify.
    Tamper,
    /// Scenario 2: swap two entries in the store and catch the reorder.
    Reorder,
    /// Scenario 3: filtered, paginated queries over a mixed batch.
    Query,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Structured logging.  Set RUST_LOG=debug for per-append output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::RunAll => run_all().await,
        Command::Tamper => run_tamper().await,
        Command::Reorder => run_reorder().await,
        Command::Query => run_query().await,
    };

    match result {
        Ok(()) => println!("All selected scenarios completed."),
        Err(e) => {
            eprintln!("Demo error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run_all() -> AuditResult<()> {
    run_tamper().await?;
    run_reorder().await?;
    run_query().await?;
    Ok(())
}

// ── Shared helpers ────────────────────────────────────────────────────────────

fn wide_range() -> TimeRange {
    let now = Utc::now();
    TimeRange::new(now - Duration::hours(1), now + Duration::hours(1))
}

fn print_report(label: &str, report: &ChainReport) {
    println!(
        "  [{label}] checked {} entries → valid: {}",
        report.entries_checked, report.valid
    );
    for id in &report.broken_entry_ids {
        println!("    broken entry: {id}");
    }
}

// ── Scenario 1: field tamper ──────────────────────────────────────────────────

async fn run_tamper() -> AuditResult<()> {
    println!();
    println!("Scenario 1 — tamper with a stored field");
    println!("---------------------------------------");

    let store = Arc::new(MemoryAuditStore::new());
    let writer = AuditLogWriter::new(store.clone()).with_redactor(Redactor::new(["password"]));

    writer
        .append(
            AuditEventDraft::new(AuditEventType::LoginSuccess)
                .actor(7, "j.keller")
                .provenance("10.0.0.8", "demo-cli"),
        )
        .await?;
    writer
        .append(
            AuditEventDraft::new(AuditEventType::DataAccess)
                .actor(7, "j.keller")
                .resource("care_plan", "42"),
        )
        .await?;
    writer
        .append(AuditEventDraft::new(AuditEventType::Logout).actor(7, "j.keller"))
        .await?;

    let verifier = IntegrityVerifier::new(store.clone());
    print_report("before tamper", &verifier.verify(&wide_range()).await?);

    // An attacker edits the backing store directly: care plan 42 → 43.
    store
        .tamper_with(1, |entry| entry.resource_id = Some("43".to_string()))
        .await?;
    println!("  ... edited stored resource_id on the middle entry");

    print_report("after tamper", &verifier.verify(&wide_range()).await?);
    Ok(())
}

// ── Scenario 2: reorder ───────────────────────────────────────────────────────

async fn run_reorder() -> AuditResult<()> {
    println!();
    println!("Scenario 2 — reorder entries in the store");
    println!("-----------------------------------------");

    let store = Arc::new(MemoryAuditStore::new());
    let writer = AuditLogWriter::new(store.clone());

    for i in 0..5 {
        writer
            .append(
                AuditEventDraft::new(AuditEventType::DataModification)
                    .actor(3, "care.coord")
                    .resource("task", format!("t-{i}")),
            )
            .await?;
    }

    let verifier = IntegrityVerifier::new(store.clone());
    print_report("before swap", &verifier.verify(&wide_range()).await?);

    store.swap_entries(1, 3).await?;
    println!("  ... swapped append order of entries 1 and 3");

    print_report("after swap", &verifier.verify(&wide_range()).await?);
    Ok(())
}

// ── Scenario 3: queries ───────────────────────────────────────────────────────

async fn run_query() -> AuditResult<()> {
    println!();
    println!("Scenario 3 — filtered, paginated queries");
    println!("----------------------------------------");

    let store = Arc::new(MemoryAuditStore::new());
    let writer = AuditLogWriter::new(store.clone());

    for user in [1_i64, 2] {
        writer
            .append(AuditEventDraft::new(AuditEventType::LoginSuccess).actor(user, "demo"))
            .await?;
    }
    for plan in ["42", "43", "44"] {
        writer
            .append(
                AuditEventDraft::new(AuditEventType::DataAccess)
                    .actor(1, "demo")
                    .resource("care_plan", plan),
            )
            .await?;
    }

    let reader = AuditReader::new(store.clone());

    let page = reader.query(&AuditQuery::over(wide_range())).await?;
    println!("  all entries: total={}", page.total);

    let page = reader
        .query(
            &AuditQuery::over(wide_range())
                .event_type(AuditEventType::DataAccess)
                .actor(1)
                .page(2, 0),
        )
        .await?;
    println!(
        "  user 1 data access, first page of 2: total={}, returned={}",
        page.total,
        page.entries.len()
    );
    for entry in &page.entries {
        println!(
            "    {} {} {}",
            entry.timestamp.format("%H:%M:%S"),
            entry.action,
            entry.resource_id.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
