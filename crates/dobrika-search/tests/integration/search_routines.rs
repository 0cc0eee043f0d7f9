//! Geo, tag and text search through the layer.

use dobrika_search::{SearchOutcome, SearchRequest, SearchStatus, TaskRecord};

use crate::common::{task_at, tagged, TestHarness};

#[test]
fn test_geo_scenario_single_task() {
    let harness = TestHarness::with_config(|c| c.search_limit = 5);
    harness.index_all(&[TaskRecord::builder()
        .id("t1")
        .name("Buy milk")
        .geo("55.0000,37.0000")
        .build()]);

    let result = harness.layer.search(&SearchRequest::geo("55.0000,37.0000"));
    assert_eq!(result.status, SearchStatus::Ok);
    assert_eq!(result.task_ids, vec!["t1"]);
}

#[test]
fn test_geo_returns_limit_nearest_in_order() {
    let harness = TestHarness::with_config(|c| c.search_limit = 3);
    harness.index_all(&[
        task_at("d5", 55.5, 37.0),
        task_at("d1", 55.1, 37.0),
        task_at("d4", 55.0, 37.4),
        task_at("d2", 54.85, 37.0),
        task_at("d3", 55.0, 36.7),
    ]);

    let result = harness.layer.search(&SearchRequest::geo("55.0,37.0"));
    assert_eq!(result.status, SearchStatus::Ok);
    assert_eq!(result.task_ids, vec!["d1", "d2", "d3"]);
}

#[test]
fn test_geo_includes_tasks_without_coordinates() {
    let harness = TestHarness::new();
    harness.index_all(&[TaskRecord::builder().id("nowhere").name("x").build()]);

    let result = harness.layer.search(&SearchRequest::geo("0,0"));
    assert_eq!(result.task_ids, vec!["nowhere"]);
}

#[test]
fn test_geo_unparsable_centre() {
    let harness = TestHarness::new();
    harness.index_all(&[task_at("t1", 55.0, 37.0)]);

    for geo in ["", "55.0", "north,east", "95,0"] {
        let result = harness.layer.search(&SearchRequest::geo(geo));
        assert_eq!(result.status, SearchStatus::UnknownTaskType, "{geo:?}");
        assert!(result.task_ids.is_empty());
    }
}

#[test]
fn test_tag_search_deduplicates() {
    let harness = TestHarness::new();
    harness.index_all(&[
        tagged("t1", &["a", "b", "c"]),
        tagged("t2", &["b"]),
        tagged("t3", &["z"]),
    ]);

    let mut ids = harness
        .layer
        .search(&SearchRequest::tags(["a", "b", "c"]))
        .task_ids;
    ids.sort();
    assert_eq!(ids, vec!["t1", "t2"]);
}

#[test]
fn test_empty_inputs_are_unknown_type() {
    let harness = TestHarness::new();
    harness.index_all(&[tagged("t1", &["a"])]);

    let requests = [
        SearchRequest::text(""),
        SearchRequest::tags(Vec::<String>::new()),
        SearchRequest::tags([""]),
        SearchRequest::default(),
    ];
    for request in &requests {
        let result = harness.layer.search(request);
        assert_eq!(result.status, SearchStatus::UnknownTaskType, "{request:?}");
        assert!(result.task_ids.is_empty());
        assert_eq!(harness.layer.search_outcome(request), SearchOutcome::Unparsable);
    }
}

#[test]
fn test_reserved_query_types_not_implemented() {
    let harness = TestHarness::new();
    for query_type in ["QT_OnlineTasks", "QT_RandomTasks"] {
        let request = SearchRequest {
            query_type: query_type.to_string(),
            user_query: "milk".to_string(),
            ..Default::default()
        };
        let result = harness.layer.search(&request);
        assert_eq!(result.status, SearchStatus::NotImplemented);
        assert!(result.task_ids.is_empty());
    }
}

#[test]
fn test_unknown_type_with_text_runs_text_search() {
    let harness = TestHarness::new();
    harness.index_all(&[
        TaskRecord::builder().id("milk").name("Купить молоко").build(),
        TaskRecord::builder().id("bread").name("Купить хлеб").build(),
    ]);

    let request = SearchRequest {
        query_type: "QT_Something".to_string(),
        user_query: "Молоко".to_string(),
        ..Default::default()
    };
    let result = harness.layer.search(&request);
    assert_eq!(result.status, SearchStatus::Ok);
    assert_eq!(result.task_ids, vec!["milk"]);
}

#[test]
fn test_text_search_ranks_and_pages() {
    let harness = TestHarness::with_config(|c| c.search_limit = 1);
    harness.index_all(&[
        TaskRecord::builder()
            .id("once")
            .name("Купить хлеб")
            .description("и молоко")
            .build(),
        TaskRecord::builder()
            .id("twice")
            .name("Молоко")
            .description("Молоко")
            .build(),
    ]);

    let result = harness.layer.search(&SearchRequest::text("молоко"));
    assert_eq!(result.status, SearchStatus::Ok);
    assert_eq!(result.task_ids, vec!["twice"]);
}

#[test]
fn test_no_matches_is_ok_and_empty() {
    let harness = TestHarness::new();
    harness.index_all(&[tagged("t1", &["a"])]);

    for request in [SearchRequest::tags(["missing"]), SearchRequest::text("трактор")] {
        let result = harness.layer.search(&request);
        assert_eq!(result.status, SearchStatus::Ok);
        assert!(result.task_ids.is_empty());
    }
}
