//! Snapshots and the backup scheduler.

use std::time::Duration;

use dobrika_core::JobState;
use dobrika_search::{SearchLayer, SearchRequest, SnapshotKind, SnapshotManifest};

use crate::common::{task_at, TestHarness};

fn has_files(dir: &std::path::Path) -> bool {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(Result::ok).any(|e| e.path().is_file()))
        .unwrap_or(false)
}

#[test]
fn test_direct_snapshots_produce_files() {
    let harness = TestHarness::new();
    harness.index_all(&[task_at("t1", 55.0, 37.0)]);
    let root = harness.backup_root();

    assert!(harness.layer.snapshot_cold(&root));
    assert!(harness.layer.snapshot_hot(&root));

    for kind in [SnapshotKind::Cold, SnapshotKind::Hot] {
        let dir = kind.destination(&root);
        assert!(has_files(&dir), "{kind} snapshot is empty");

        let manifest = SnapshotManifest::load(&dir).unwrap();
        assert_eq!(manifest.kind, kind);
        assert_eq!(manifest.document_count, 1);
    }
}

#[test]
fn test_snapshot_restores_to_working_layer() {
    let harness = TestHarness::new();
    harness.index_all(&[task_at("t1", 55.0, 37.0)]);
    let root = harness.backup_root();
    assert!(harness.layer.snapshot_cold(&root));

    let mut config = harness.layer.config().clone();
    config.db_path = SnapshotKind::Cold.destination(&root);
    let restored = SearchLayer::open(config).unwrap();

    let result = restored.search(&SearchRequest::geo("55.0,37.0"));
    assert_eq!(result.task_ids, vec!["t1"]);
}

#[test]
fn test_later_snapshot_replaces_earlier() {
    let harness = TestHarness::new();
    let root = harness.backup_root();

    harness.index_all(&[task_at("t1", 55.0, 37.0)]);
    assert!(harness.layer.snapshot_hot(&root));
    harness.index_all(&[task_at("t2", 55.0, 37.0)]);
    assert!(harness.layer.snapshot_hot(&root));

    let manifest = SnapshotManifest::load(&SnapshotKind::Hot.destination(&root)).unwrap();
    assert_eq!(manifest.document_count, 2);
}

#[tokio::test]
async fn test_scheduler_lifecycle() {
    let harness = TestHarness::new();
    harness.index_all(&[task_at("t1", 55.0, 37.0)]);
    let layer = &harness.layer;

    layer.start_backup_scheduler(harness.backup_root()).await;
    layer
        .scheduler()
        .cold_handle()
        .wait_for(JobState::Waiting, Duration::from_secs(5))
        .await
        .unwrap();
    layer
        .scheduler()
        .hot_handle()
        .wait_for(JobState::Waiting, Duration::from_secs(5))
        .await
        .unwrap();
    assert!(layer.scheduler().is_running().await);

    // Restart, then stop: must not wait out the 15/30 minute intervals.
    layer.start_backup_scheduler(harness.backup_root()).await;
    let stop = tokio::time::timeout(Duration::from_secs(5), layer.stop_backup_scheduler()).await;
    assert!(stop.is_ok(), "stop waited for the backup interval");

    assert_eq!(layer.scheduler().cold_state(), JobState::Stopped);
    assert_eq!(layer.scheduler().hot_state(), JobState::Stopped);
    assert!(!layer.scheduler().is_running().await);

    // Idempotent.
    layer.stop_backup_scheduler().await;
}

#[tokio::test]
async fn test_disabled_intervals_spawn_nothing() {
    let harness = TestHarness::with_config(|c| {
        c.cold_backup_minutes = 0;
        c.hot_backup_minutes = 0;
    });

    harness
        .layer
        .start_backup_scheduler(harness.backup_root())
        .await;
    assert!(!harness.layer.scheduler().is_running().await);
    assert_eq!(harness.layer.scheduler().cold_state(), JobState::Idle);
    assert_eq!(harness.layer.scheduler().hot_state(), JobState::Idle);
    harness.layer.stop_backup_scheduler().await;
}
