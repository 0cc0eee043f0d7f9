//! The on-disk task index and its long-lived read handle.
//!
//! [`TaskIndex`] is the single owner of one index directory. It holds the
//! Tantivy [`Index`], a reader with [`ReloadPolicy::Manual`] that is reopened
//! explicitly after every commit, and the [`WriteGuard`] serializing writers
//! against snapshots.

use std::path::{Path, PathBuf};

use dobrika_core::{Error, Result};
use tantivy::{Index, IndexReader, ReloadPolicy, Searcher};

use crate::guard::WriteGuard;
use crate::schema::TaskSchema;

/// File Tantivy writes at the root of every index directory.
const META_FILE: &str = "meta.json";

/// An opened task index.
pub struct TaskIndex {
    path: PathBuf,
    index: Index,
    reader: IndexReader,
    schema: TaskSchema,
    guard: WriteGuard,
}

impl TaskIndex {
    /// Open the index at `path`, creating it if the directory holds none.
    ///
    /// An existing index must have been created with the same geo
    /// value-slot.
    pub fn open(path: &Path, geo_slot: u32) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path).map_err(|e| Error::io_with_path(e, path))?;
        }

        let (index, schema) = if path.join(META_FILE).exists() {
            let index = Index::open_in_dir(path)
                .map_err(|e| Error::engine(format!("Failed to open index: {e}")))?;
            let schema = TaskSchema::from_schema(&index.schema(), geo_slot)?;
            log::info!("Opened task index at {}", path.display());
            (index, schema)
        } else {
            let schema = TaskSchema::build(geo_slot);
            let index = Index::create_in_dir(path, schema.schema().clone())
                .map_err(|e| Error::engine(format!("Failed to create index: {e}")))?;
            log::info!("Created task index at {}", path.display());
            (index, schema)
        };

        TaskSchema::register_tokenizers(&index);

        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| Error::engine(format!("Failed to open index reader: {e}")))?;

        Ok(Self {
            path: path.to_path_buf(),
            index,
            reader,
            schema,
            guard: WriteGuard::new(),
        })
    }

    /// Index directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Underlying Tantivy index.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Field handles.
    pub fn schema(&self) -> &TaskSchema {
        &self.schema
    }

    /// Guard taken by every mutation of the directory.
    pub fn guard(&self) -> &WriteGuard {
        &self.guard
    }

    /// Searcher over the last reloaded commit.
    pub fn searcher(&self) -> Searcher {
        self.reader.searcher()
    }

    /// Reopen the read handle so searches observe the latest commit.
    pub fn reopen(&self) -> Result<()> {
        self.reader
            .reload()
            .map_err(|e| Error::engine(format!("Failed to reload index reader: {e}")))
    }

    /// Number of live documents visible to searches.
    pub fn document_count(&self) -> u64 {
        self.searcher().num_docs()
    }
}

impl std::fmt::Debug for TaskIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskIndex")
            .field("path", &self.path)
            .field("geo_slot", &self.schema.geo_slot())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
