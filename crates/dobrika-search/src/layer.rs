//! The search layer: single owner of one index directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dobrika_core::Result;

use crate::document::{SearchRequest, SearchResult, TaskRecord};
use crate::indexer::Indexer;
use crate::scheduler::{BackupScheduler, SnapshotTarget};
use crate::search::{QueryDispatcher, ResultWindow, SearchOutcome};
use crate::snapshot::SnapshotKind;
use crate::store::TaskIndex;
use crate::types::SearchConfig;

/// Owns the index, the backup scheduler and the configuration.
///
/// Share it as `Arc<SearchLayer>`; every operation takes `&self`.
/// Dropping the layer only signals the backup jobs to stop; it does not wait
/// for them, and a snapshot in progress keeps its own handle on the index.
/// Call [`stop_backup_scheduler`](Self::stop_backup_scheduler) before
/// dropping to join the jobs.
pub struct SearchLayer {
    // Declared first so the stop signal is sent before the store drops.
    scheduler: BackupScheduler,
    config: SearchConfig,
    store: Arc<TaskIndex>,
}

impl SearchLayer {
    /// Open (or create) the index described by `config`.
    pub fn open(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let store = TaskIndex::open(&config.db_path, config.geo_slot)?;
        let scheduler =
            BackupScheduler::new(config.cold_backup_interval(), config.hot_backup_interval());

        log::info!(
            "Search layer ready: {} ({} documents)",
            config.db_path.display(),
            store.document_count()
        );

        Ok(Self {
            scheduler,
            config,
            store: Arc::new(store),
        })
    }

    /// Configuration the layer was opened with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Index a task, replacing any task with the same id.
    pub fn index(&self, task: &TaskRecord) -> Result<()> {
        Indexer::new(&self.store).add_task(task)
    }

    /// Run a search and report it with the wire status.
    pub fn search(&self, request: &SearchRequest) -> SearchResult {
        self.search_outcome(request).into_result()
    }

    /// Run a search, keeping engine failures distinct from bad input.
    pub fn search_outcome(&self, request: &SearchRequest) -> SearchOutcome {
        let window = ResultWindow::new(self.config.search_offset, self.config.search_limit);
        QueryDispatcher::new(&self.store, window).dispatch(request)
    }

    /// Snapshot into `<root>/cold`.
    pub fn snapshot_cold(&self, root: &Path) -> bool {
        self.store.snapshot(SnapshotKind::Cold, root)
    }

    /// Snapshot into `<root>/hot`.
    pub fn snapshot_hot(&self, root: &Path) -> bool {
        self.store.snapshot(SnapshotKind::Hot, root)
    }

    /// Start (or restart) periodic backups into `root`.
    pub async fn start_backup_scheduler(&self, root: PathBuf) {
        self.scheduler.start(Arc::clone(&self.store), root).await;
    }

    /// Stop periodic backups, waiting for a snapshot in progress.
    pub async fn stop_backup_scheduler(&self) {
        self.scheduler.stop().await;
    }

    /// The backup scheduler, for observing job state.
    pub fn scheduler(&self) -> &BackupScheduler {
        &self.scheduler
    }

    /// Number of live documents visible to searches.
    pub fn document_count(&self) -> u64 {
        self.store.document_count()
    }
}

impl std::fmt::Debug for SearchLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchLayer")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
