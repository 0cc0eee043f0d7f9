//! Replace-by-id writes and write-time validation.

use dobrika_search::{SearchRequest, SearchStatus, TaskRecord};

use crate::common::{task_at, tagged, TestHarness};

#[test]
fn test_reindexing_same_id_replaces_document() {
    let harness = TestHarness::new();
    harness.index_all(&[
        tagged("t1", &["old"]),
        tagged("t1", &["new"]),
    ]);

    assert_eq!(harness.layer.document_count(), 1);

    let old = harness.layer.search(&SearchRequest::tags(["old"]));
    assert_eq!(old.status, SearchStatus::Ok);
    assert!(old.task_ids.is_empty());

    let new = harness.layer.search(&SearchRequest::tags(["new"]));
    assert_eq!(new.task_ids, vec!["t1"]);
}

#[test]
fn test_replaced_task_appears_once_in_every_routine() {
    let harness = TestHarness::new();
    for _ in 0..3 {
        harness.index_all(&[TaskRecord::builder()
            .id("t1")
            .name("молоко")
            .geo("55.0,37.0")
            .tag("food")
            .build()]);
    }

    let requests = [
        SearchRequest::geo("55.0,37.0"),
        SearchRequest::tags(["food"]),
        SearchRequest::text("молоко"),
    ];
    for request in &requests {
        assert_eq!(harness.layer.search(request).task_ids, vec!["t1"]);
    }
}

#[test]
fn test_replacement_moves_geo_position() {
    let harness = TestHarness::new();
    harness.index_all(&[task_at("moving", 10.0, 10.0), task_at("fixed", 55.01, 37.0)]);
    harness.index_all(&[task_at("moving", 55.0, 37.0)]);

    let result = harness.layer.search(&SearchRequest::geo("55.0,37.0"));
    assert_eq!(result.task_ids, vec!["moving", "fixed"]);
}

#[test]
fn test_invalid_records_are_rejected() {
    let harness = TestHarness::new();

    let cases = [
        TaskRecord::builder().name("no id").build(),
        TaskRecord::builder().id("t1").name("a\nb").build(),
        TaskRecord::builder().id("t1").tag("x\ny").build(),
    ];
    for task in &cases {
        let err = harness.layer.index(task).unwrap_err();
        assert!(err.is_client_error(), "{err}");
    }
    assert_eq!(harness.layer.document_count(), 0);
}

#[test]
fn test_index_survives_reopen() {
    let harness = TestHarness::new();
    harness.index_all(&[task_at("t1", 55.0, 37.0)]);
    let config = harness.layer.config().clone();
    drop(harness.layer);

    let reopened = dobrika_search::SearchLayer::open(config).unwrap();
    let result = reopened.search(&SearchRequest::geo("55.0,37.0"));
    assert_eq!(result.task_ids, vec!["t1"]);
}
