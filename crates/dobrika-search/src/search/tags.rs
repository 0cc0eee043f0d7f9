//! Tag search: tasks carrying any of the requested tags.

use dobrika_core::{Error, Result};
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query, TermQuery};
use tantivy::schema::IndexRecordOption;
use tantivy::Term;

use super::{collect_task_ids, ResultWindow};
use crate::store::TaskIndex;

/// Task ids matching any of `tags`, de-duplicated in first-seen order.
///
/// `tags` must be non-empty and free of blank entries; the dispatcher
/// filters them.
pub fn search(store: &TaskIndex, tags: &[&str], window: ResultWindow) -> Result<Vec<String>> {
    if window.is_empty() {
        return Ok(Vec::new());
    }

    let tag_field = store.schema().tag;
    let clauses: Vec<(Occur, Box<dyn Query>)> = tags
        .iter()
        .map(|tag| {
            let term = Term::from_field_text(tag_field, tag);
            let query: Box<dyn Query> = Box::new(TermQuery::new(term, IndexRecordOption::Basic));
            (Occur::Should, query)
        })
        .collect();
    let query = BooleanQuery::new(clauses);

    let searcher = store.searcher();
    let top_docs = searcher
        .search(
            &query,
            &TopDocs::with_limit(window.limit).and_offset(window.offset),
        )
        .map_err(|e| Error::engine(format!("Tag query failed: {e}")))?;

    collect_task_ids(
        &searcher,
        store.schema(),
        top_docs.into_iter().map(|(_, address)| address),
        true,
    )
}

// ============================================================================
// Tests
// ============================================================================
