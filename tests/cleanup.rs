// ABOUTME: Integration tests for a full cleanup run against an in-memory registry.
// ABOUTME: Covers abort-before-delete guarantees, dry runs, and failure accounting.

mod support;

use nexus_retention::cleanup::{CleanupMode, CleanupResult, run_cleanup};
use nexus_retention::error::{Error, exit_code};
use nexus_retention::registry::{RegistryError, RegistryErrorKind, SkippedHit};
use nexus_retention::retention::{DeleteStatus, RetentionPolicy};
use nexus_retention::types::Selector;
use support::fake_registry::FakeRegistry;
use support::{days_ago, image, init_tracing, today, versions};

fn selector() -> Selector {
    Selector::all()
        .repository("docker-hosted")
        .unwrap()
        .name("app")
        .unwrap()
}

fn three_images() -> FakeRegistry {
    FakeRegistry::with_images(vec![
        image("1.0", days_ago(30)),
        image("1.1", days_ago(10)),
        image("1.2", days_ago(1)),
    ])
}

// =============================================================================
// Collection
// =============================================================================

/// Test: the selector is passed to the registry unchanged.
#[tokio::test]
async fn search_uses_the_selector() {
    init_tracing();
    let registry = three_images();

    run_cleanup(
        &registry,
        &selector(),
        RetentionPolicy::KeepLatest(5),
        today(),
        CleanupMode::Delete,
    )
    .await
    .unwrap();

    assert_eq!(registry.searches(), vec![selector()]);
    assert_eq!(registry.fetched(), vec!["1.0", "1.1", "1.2"]);
}

/// Test: an empty search result is reported as nothing matched.
#[tokio::test]
async fn empty_search_is_nothing_matched() {
    let registry = FakeRegistry::default();

    let err = run_cleanup(
        &registry,
        &selector(),
        RetentionPolicy::MaxAge(7),
        today(),
        CleanupMode::Delete,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::NothingMatched(ref s) if s == "docker-hosted/app:*"));
    assert_eq!(err.exit_code(), exit_code::NOTHING_MATCHED);
    assert!(registry.deleted().is_empty());
}

/// Test: a failed search aborts with a registry error.
#[tokio::test]
async fn failed_search_aborts_without_deletes() {
    let registry = three_images().failing_search(503);

    let err = run_cleanup(
        &registry,
        &selector(),
        RetentionPolicy::KeepLatest(0),
        today(),
        CleanupMode::Delete,
    )
    .await
    .unwrap_err();

    match err {
        Error::Registry(ref e) => {
            assert_eq!(e.kind(), RegistryErrorKind::HttpStatus);
            assert!(matches!(e, RegistryError::Status { status: 503, .. }));
        }
        other => panic!("expected registry error, got {other:?}"),
    }
    assert_eq!(err.exit_code(), exit_code::REGISTRY_UNAVAILABLE);
    assert!(registry.fetched().is_empty());
    assert!(registry.deleted().is_empty());
}

/// Test: one unreadable manifest aborts the whole run before any delete.
#[tokio::test]
async fn metadata_failure_aborts_before_any_delete() {
    let registry = three_images().broken_metadata_for("1.1");

    let err = run_cleanup(
        &registry,
        &selector(),
        RetentionPolicy::KeepLatest(0),
        today(),
        CleanupMode::Delete,
    )
    .await
    .unwrap_err();

    match err {
        Error::Registry(ref e) => assert_eq!(e.kind(), RegistryErrorKind::MalformedResponse),
        other => panic!("expected registry error, got {other:?}"),
    }
    assert_eq!(registry.fetched(), vec!["1.0", "1.1"]);
    assert!(registry.deleted().is_empty());
}

/// Test: skipped search entries are carried through without aborting.
#[tokio::test]
async fn skipped_entries_are_reported() {
    let skipped = SkippedHit {
        repository: Some("docker-hosted".to_string()),
        name: Some("app".to_string()),
        version: Some("broken".to_string()),
        reason: "no sha256 checksum".to_string(),
    };
    let registry = three_images().skipping(skipped.clone());

    let run = run_cleanup(
        &registry,
        &selector(),
        RetentionPolicy::MaxAge(7),
        today(),
        CleanupMode::Delete,
    )
    .await
    .unwrap();

    assert_eq!(run.skipped, vec![skipped]);
    assert_eq!(registry.deleted(), vec!["1.0", "1.1"]);
}

// =============================================================================
// Deletion
// =============================================================================

/// Test: keep-count deletes the older images, newest first.
#[tokio::test]
async fn keep_latest_deletes_older_images() {
    let registry = three_images();

    let run = run_cleanup(
        &registry,
        &selector(),
        RetentionPolicy::KeepLatest(1),
        today(),
        CleanupMode::Delete,
    )
    .await
    .unwrap();

    let CleanupResult::Executed(report) = run.result else {
        panic!("expected executed cleanup");
    };
    assert_eq!(versions(report.outcomes.iter().map(|o| &o.image)), vec!["1.1", "1.0"]);
    assert!(!report.has_failures());
    assert_eq!(registry.deleted(), vec!["1.1", "1.0"]);
}

/// Test: a rejected delete is recorded and the remaining targets proceed.
#[tokio::test]
async fn delete_failure_continues_with_next_target() {
    let old = image("1.0", days_ago(30));
    let registry = FakeRegistry::with_images(vec![
        old.clone(),
        image("1.1", days_ago(10)),
        image("1.2", days_ago(1)),
    ])
    .delete_returns(&old, DeleteStatus::Http(404));

    let run = run_cleanup(
        &registry,
        &selector(),
        RetentionPolicy::MaxAge(7),
        today(),
        CleanupMode::Delete,
    )
    .await
    .unwrap();

    let CleanupResult::Executed(report) = run.result else {
        panic!("expected executed cleanup");
    };
    assert_eq!(registry.deleted(), vec!["1.0", "1.1"]);
    assert_eq!(report.outcomes[0].status, DeleteStatus::Http(404));
    assert_eq!(report.outcomes[1].status, DeleteStatus::Http(202));
    assert_eq!(report.failed().count(), 1);
}

/// Test: a keep count covering everything deletes nothing.
#[tokio::test]
async fn keep_count_covering_all_deletes_nothing() {
    let registry = three_images();

    let run = run_cleanup(
        &registry,
        &selector(),
        RetentionPolicy::KeepLatest(3),
        today(),
        CleanupMode::Delete,
    )
    .await
    .unwrap();

    let CleanupResult::Executed(report) = run.result else {
        panic!("expected executed cleanup");
    };
    assert!(report.all_kept);
    assert_eq!(report.total, 3);
    assert!(registry.deleted().is_empty());
}

// =============================================================================
// Dry Run
// =============================================================================

/// Test: a dry run plans the same targets but issues no deletes.
#[tokio::test]
async fn dry_run_issues_no_deletes() {
    let registry = three_images();

    let run = run_cleanup(
        &registry,
        &selector(),
        RetentionPolicy::MaxAge(7),
        today(),
        CleanupMode::DryRun,
    )
    .await
    .unwrap();

    let CleanupResult::Planned(plan) = run.result else {
        panic!("expected planned cleanup");
    };
    assert_eq!(versions(&plan.targets), vec!["1.0", "1.1"]);
    assert!(registry.deleted().is_empty());
    assert_eq!(registry.fetched().len(), 3);
}
