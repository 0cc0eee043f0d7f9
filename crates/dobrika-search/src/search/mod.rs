//! Query dispatch and the search routines.
//!
//! [`QueryDispatcher`] classifies a [`SearchRequest`] by its `query_type`
//! and runs exactly one routine:
//!
//! | `query_type` | Routine |
//! |--------------|---------|
//! | `QT_GeoTasks` | [`geo`]: nearest tasks to a coordinate |
//! | `QT_TagTasks` | [`tags`]: tasks carrying any of the tags, de-duplicated |
//! | `QT_OnlineTasks`, `QT_RandomTasks` | none, [`SearchOutcome::NotImplemented`] |
//! | anything else | [`text`] when `user_query` is non-empty, else [`SearchOutcome::Unparsable`] |
//!
//! Routines never return errors. Malformed input becomes
//! [`SearchOutcome::Unparsable`] and engine failures become
//! [`SearchOutcome::EngineError`]; callers that only need the wire status use
//! [`SearchOutcome::status`], which reports both as `UnknownTaskType`.

pub mod geo;
pub mod tags;
pub mod text;

use std::collections::HashSet;

use dobrika_core::{Error, Result};
use tantivy::schema::Value;
use tantivy::{DocAddress, Searcher, TantivyDocument};

use crate::codec;
use crate::document::{SearchRequest, SearchResult};
use crate::schema::TaskSchema;
use crate::store::TaskIndex;
use crate::types::{QueryType, SearchStatus};

/// Outcome of one search, before it is reduced to a wire status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The routine ran. The list may be empty.
    Found(Vec<String>),
    /// The request was unusable: unknown type with no text, empty text,
    /// empty tag set or malformed geo data.
    Unparsable,
    /// The engine failed while parsing or executing the query.
    EngineError(String),
    /// The query type is recognized but has no routine.
    NotImplemented,
}

impl SearchOutcome {
    /// Wire status for this outcome.
    pub fn status(&self) -> SearchStatus {
        match self {
            Self::Found(_) => SearchStatus::Ok,
            Self::Unparsable | Self::EngineError(_) => SearchStatus::UnknownTaskType,
            Self::NotImplemented => SearchStatus::NotImplemented,
        }
    }

    /// Reduce to a [`SearchResult`]. Only `Found` carries ids.
    pub fn into_result(self) -> SearchResult {
        match self {
            Self::Found(task_ids) => SearchResult {
                status: SearchStatus::Ok,
                task_ids,
            },
            other => SearchResult::status_only(other.status()),
        }
    }

    fn from_engine(routine: &str, result: Result<Vec<String>>) -> Self {
        match result {
            Ok(ids) => Self::Found(ids),
            Err(e) => {
                log::warn!("{routine} search failed: {e}");
                Self::EngineError(e.to_string())
            }
        }
    }
}

/// Offset/limit window applied by every routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultWindow {
    /// Leading results skipped.
    pub offset: usize,
    /// Maximum results returned.
    pub limit: usize,
}

impl ResultWindow {
    /// Create a window.
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Whether the window can hold any result at all.
    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }
}

/// Routes requests to the search routines.
pub struct QueryDispatcher<'a> {
    store: &'a TaskIndex,
    window: ResultWindow,
}

impl<'a> QueryDispatcher<'a> {
    /// Create a dispatcher over `store` using `window` for every routine.
    pub fn new(store: &'a TaskIndex, window: ResultWindow) -> Self {
        Self { store, window }
    }

    /// Run the routine selected by `request`.
    pub fn dispatch(&self, request: &SearchRequest) -> SearchOutcome {
        match request.kind() {
            QueryType::Geo => {
                let Some(centre) = crate::geo::parse_geo(&request.geo_data) else {
                    log::debug!("Unparsable geo data '{}'", request.geo_data);
                    return SearchOutcome::Unparsable;
                };
                SearchOutcome::from_engine(
                    "Geo",
                    geo::search(self.store, centre, self.window),
                )
            }
            QueryType::Tags => {
                let tags: Vec<&str> = request
                    .user_tags
                    .iter()
                    .map(String::as_str)
                    .filter(|t| !t.is_empty())
                    .collect();
                if tags.is_empty() {
                    return SearchOutcome::Unparsable;
                }
                SearchOutcome::from_engine("Tag", tags::search(self.store, &tags, self.window))
            }
            QueryType::Online | QueryType::Random => SearchOutcome::NotImplemented,
            QueryType::Unknown if !request.user_query.is_empty() => SearchOutcome::from_engine(
                "Text",
                text::search(self.store, &request.user_query, self.window),
            ),
            QueryType::Unknown => SearchOutcome::Unparsable,
        }
    }
}

/// Decode the task id of each hit, in order, skipping empty ids.
///
/// With `dedup` set, an id already collected is skipped too.
pub(crate) fn collect_task_ids(
    searcher: &Searcher,
    schema: &TaskSchema,
    hits: impl IntoIterator<Item = DocAddress>,
    dedup: bool,
) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for address in hits {
        let doc: TantivyDocument = searcher
            .doc(address)
            .map_err(|e| Error::engine(format!("Failed to load stored document: {e}")))?;
        let payload = doc
            .get_first(schema.payload)
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        let id = codec::task_id(payload);
        if id.is_empty() || (dedup && !seen.insert(id.to_string())) {
            continue;
        }
        ids.push(id.to_string());
    }
    Ok(ids)
}

// ============================================================================
// Tests
// ============================================================================
