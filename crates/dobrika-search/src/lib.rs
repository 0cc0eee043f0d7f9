//! Task indexing and search for Dobrika.
//!
//! This crate owns the task index: it encodes task records into Tantivy
//! documents, answers geo, tag and free-text queries, serializes writers
//! against snapshots, and runs the periodic cold/hot backups.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      dobrika-search                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SearchLayer (single owner of one index directory)          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  QueryDispatcher → geo / tags / text routines               │
//! │  Indexer (replace-by-id writes)                             │
//! │  BackupScheduler → take_snapshot (cold / hot)               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TaskIndex (Tantivy index + manual-reload reader)           │
//! │  WriteGuard (exclusive for commits and snapshots)           │
//! │  TaskSchema, codec (stored payload), geo ("lat,lon")        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use dobrika_search::{SearchConfig, SearchLayer, SearchRequest, SearchStatus, TaskRecord};
//!
//! # fn main() -> dobrika_core::Result<()> {
//! let layer = SearchLayer::open(SearchConfig::with_db_path("db"))?;
//!
//! layer.index(
//!     &TaskRecord::builder()
//!         .id("t1")
//!         .name("Buy milk")
//!         .geo("55.0000,37.0000")
//!         .build(),
//! )?;
//!
//! let result = layer.search(&SearchRequest::geo("55.0000,37.0000"));
//! assert_eq!(result.status, SearchStatus::Ok);
//! assert_eq!(result.task_ids, vec!["t1"]);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod document;
pub mod geo;
pub mod guard;
pub mod indexer;
pub mod layer;
pub mod scheduler;
pub mod schema;
pub mod search;
pub mod snapshot;
pub mod store;
pub mod types;

// Re-exports
pub use document::{SearchRequest, SearchResult, TaskRecord, TaskRecordBuilder};
pub use geo::{parse_geo, GeoPoint};
pub use indexer::Indexer;
pub use layer::SearchLayer;
pub use scheduler::{BackupScheduler, SnapshotTarget};
pub use schema::TaskSchema;
pub use search::{QueryDispatcher, ResultWindow, SearchOutcome};
pub use snapshot::{take_snapshot, SnapshotKind, SnapshotManifest};
pub use store::TaskIndex;
pub use types::{QueryType, SearchConfig, SearchStatus, TaskType};
