//! Index writer.
//!
//! This module provides `Indexer`, which turns a [`TaskRecord`] into a
//! Tantivy document and commits it under the store's write guard.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dobrika_search::{Indexer, TaskIndex, TaskRecord};
//!
//! let store = TaskIndex::open(&db_path, 9)?;
//! let task = TaskRecord::builder()
//!     .id("t1")
//!     .name("Buy milk")
//!     .geo("55.0000,37.0000")
//!     .build();
//!
//! Indexer::new(&store).add_task(&task)?;
//! ```
//!
//! A write opens a transient writer, deletes any document with the same
//! `task_id`, adds the new one and commits. The delete and add land in the
//! same commit, so readers see either the old document or the new one.

use dobrika_core::{Error, Result};
use tantivy::{IndexWriter, TantivyDocument, Term};

use crate::codec;
use crate::document::TaskRecord;
use crate::geo::{parse_geo, FALLBACK_POINT};
use crate::store::TaskIndex;

/// Index writer buffer size (50MB).
const WRITER_BUFFER_SIZE: usize = 50_000_000;

/// Writes task documents into a [`TaskIndex`].
pub struct Indexer<'a> {
    store: &'a TaskIndex,
}

impl<'a> Indexer<'a> {
    /// Create a writer for `store`.
    pub fn new(store: &'a TaskIndex) -> Self {
        Self { store }
    }

    /// Index `task`, replacing any earlier document with the same id.
    ///
    /// Blocks until the write guard is free. On success the store's read
    /// handle has been reopened, so the next search sees the task.
    pub fn add_task(&self, task: &TaskRecord) -> Result<()> {
        codec::validate(task)?;
        let doc = self.build_document(task);
        let id_term = Term::from_field_text(self.store.schema().task_id, &task.task_id);

        let _guard = self.store.guard().exclusive("index");

        let mut writer: IndexWriter = self
            .store
            .index()
            .writer_with_num_threads(1, WRITER_BUFFER_SIZE)
            .map_err(|e| Error::engine(format!("Failed to create index writer: {e}")))?;

        writer.delete_term(id_term);
        writer
            .add_document(doc)
            .map_err(|e| Error::engine(format!("Failed to add document: {e}")))?;
        writer
            .commit()
            .map_err(|e| Error::engine(format!("Failed to commit index: {e}")))?;
        writer
            .wait_merging_threads()
            .map_err(|e| Error::engine(format!("Failed to close index writer: {e}")))?;

        self.store.reopen()?;
        log::debug!("Indexed task '{}'", task.task_id);
        Ok(())
    }

    /// Convert a task into a Tantivy document.
    ///
    /// Name and description go to their own fields and to `body`; tags
    /// become one raw term each, skipping empty ones. Geo data that does
    /// not parse is replaced by [`FALLBACK_POINT`].
    pub fn build_document(&self, task: &TaskRecord) -> TantivyDocument {
        let s = self.store.schema();
        let mut doc = TantivyDocument::new();

        doc.add_text(s.payload, codec::encode(task));
        doc.add_text(s.task_id, &task.task_id);

        doc.add_text(s.name, &task.task_name);
        doc.add_text(s.desc, &task.task_desc);
        doc.add_text(s.body, &task.task_name);
        doc.add_text(s.body, &task.task_desc);

        for tag in task.task_tags.iter().filter(|t| !t.is_empty()) {
            doc.add_text(s.tag, tag);
        }
        doc.add_text(s.task_type, &task.task_type);

        let point = parse_geo(&task.geo_data).unwrap_or_else(|| {
            if !task.geo_data.is_empty() {
                log::debug!(
                    "Task '{}' has unparsable geo data '{}', using fallback",
                    task.task_id,
                    task.geo_data
                );
            }
            FALLBACK_POINT
        });
        doc.add_f64(s.geo_lat, point.lat);
        doc.add_f64(s.geo_lon, point.lon);

        doc
    }
}

// ============================================================================
// Tests
// ============================================================================
