//! HTTP routes.
//!
//! | Method | Path | Handler | Description |
//! |--------|------|---------|-------------|
//! | GET | /healthz | `healthz` | Liveness probe, plain-text `ok` |
//! | POST | /index | `index_task` | Index (or replace) one task |
//! | POST | /search | `search_tasks` | Run one search |
//!
//! Search layer calls block on disk and locks, so handlers run them on the
//! blocking pool.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use dobrika_search::{SearchLayer, SearchRequest, SearchResult, TaskRecord};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

/// Body of a successful `/index` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexResponse {
    /// Always `true`; failures use an error body.
    pub ok: bool,
}

/// Build the router over a shared search layer.
pub fn router(layer: Arc<SearchLayer>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/index", post(index_task))
        .route("/search", post(search_tasks))
        .layer(TraceLayer::new_for_http())
        .with_state(layer)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn index_task(
    State(layer): State<Arc<SearchLayer>>,
    payload: Result<Json<TaskRecord>, JsonRejection>,
) -> Result<Json<IndexResponse>, ApiError> {
    let Json(task) = payload?;

    let outcome = tokio::task::spawn_blocking(move || layer.index(&task))
        .await
        .map_err(|e| {
            tracing::error!("Index worker failed: {e}");
            ApiError::Internal
        })?;

    match outcome {
        Ok(()) => Ok(Json(IndexResponse { ok: true })),
        Err(e) => {
            tracing::warn!("Index request failed: {e}");
            Err(ApiError::from_index_error(&e))
        }
    }
}

async fn search_tasks(
    State(layer): State<Arc<SearchLayer>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResult>, ApiError> {
    let Json(request) = payload?;

    let result = tokio::task::spawn_blocking(move || layer.search(&request))
        .await
        .map_err(|e| {
            tracing::error!("Search worker failed: {e}");
            ApiError::Internal
        })?;

    tracing::debug!(
        status = %result.status,
        hits = result.task_ids.len(),
        "search finished"
    );
    Ok(Json(result))
}

// ============================================================================
// Tests
// ============================================================================
