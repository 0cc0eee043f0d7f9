//! Concurrent writers and readers against one layer.

use std::sync::Arc;
use std::thread;

use dobrika_search::{SearchRequest, SearchStatus};

use crate::common::{task_at, tagged, TestHarness};

#[test]
fn test_concurrent_writers_all_land() {
    const WRITERS: usize = 8;
    let harness = TestHarness::with_config(|c| c.search_limit = 100);

    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let layer = Arc::clone(&harness.layer);
            thread::spawn(move || {
                layer
                    .index(&tagged(&format!("task-{i}"), &["shared"]))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(harness.layer.document_count(), WRITERS as u64);

    let mut ids = harness.layer.search(&SearchRequest::tags(["shared"])).task_ids;
    ids.sort();
    let mut expected: Vec<String> = (0..WRITERS).map(|i| format!("task-{i}")).collect();
    expected.sort();
    assert_eq!(ids, expected);
}

#[test]
fn test_searches_run_alongside_writes() {
    let harness = TestHarness::with_config(|c| c.search_limit = 100);
    harness.index_all(&[task_at("seed", 55.0, 37.0)]);

    let writer = {
        let layer = Arc::clone(&harness.layer);
        thread::spawn(move || {
            for i in 0..5 {
                layer.index(&task_at(&format!("w{i}"), 55.0, 37.0)).unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let layer = Arc::clone(&harness.layer);
            thread::spawn(move || {
                for _ in 0..10 {
                    let result = layer.search(&SearchRequest::geo("55.0,37.0"));
                    assert_eq!(result.status, SearchStatus::Ok);
                    assert!(result.task_ids.contains(&"seed".to_string()));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(harness.layer.document_count(), 6);
}

#[test]
fn test_snapshot_and_write_interleave_safely() {
    let harness = TestHarness::new();
    harness.index_all(&[task_at("seed", 55.0, 37.0)]);
    let root = harness.backup_root();

    let writer = {
        let layer = Arc::clone(&harness.layer);
        thread::spawn(move || {
            for i in 0..5 {
                layer.index(&task_at(&format!("w{i}"), 55.0, 37.0)).unwrap();
            }
        })
    };
    let snapshotter = {
        let layer = Arc::clone(&harness.layer);
        let root = root.clone();
        thread::spawn(move || {
            for _ in 0..3 {
                assert!(layer.snapshot_hot(&root));
            }
        })
    };
    writer.join().unwrap();
    snapshotter.join().unwrap();

    let copy = dobrika_search::TaskIndex::open(&root.join("hot"), 9).unwrap();
    assert!(copy.document_count() >= 1);
}
