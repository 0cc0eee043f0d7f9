//! Free-text search, ranked by BM25.
//!
//! Bare terms search the `body` field; `name:` and `desc:` restrict a term to
//! one field. Query text is analyzed with the same stemming tokenizer the
//! writer used.
//!
//! Parsing is lenient: an unknown `field:` prefix, an unbalanced bracket or
//! quote, or a dangling operator drops only the offending clause and the rest
//! of the text is still searched. A query left with no usable clause at all is
//! an engine error.

use dobrika_core::{Error, Result};
use tantivy::collector::TopDocs;
use tantivy::query::{EmptyQuery, QueryParser};

use super::{collect_task_ids, ResultWindow};
use crate::store::TaskIndex;

/// Task ids matching `user_query`, best match first.
pub fn search(store: &TaskIndex, user_query: &str, window: ResultWindow) -> Result<Vec<String>> {
    if window.is_empty() {
        return Ok(Vec::new());
    }

    let parser = QueryParser::for_index(store.index(), store.schema().default_text_fields());
    let (query, errors) = parser.parse_query_lenient(user_query);
    for e in &errors {
        log::debug!("Recovered from query error in '{user_query}': {e}");
    }
    if let Some(e) = errors.first().filter(|_| query.is::<EmptyQuery>()) {
        return Err(Error::engine(format!("Failed to parse query '{user_query}': {e}")));
    }

    let searcher = store.searcher();
    let top_docs = searcher
        .search(
            &query,
            &TopDocs::with_limit(window.limit).and_offset(window.offset),
        )
        .map_err(|e| Error::engine(format!("Text query failed: {e}")))?;

    collect_task_ids(
        &searcher,
        store.schema(),
        top_docs.into_iter().map(|(_, address)| address),
        false,
    )
}

// ============================================================================
// Tests
// ============================================================================
