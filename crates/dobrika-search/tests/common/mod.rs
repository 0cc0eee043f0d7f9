//! Common test utilities and harness for dobrika-search integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use dobrika_search::{SearchConfig, SearchLayer, TaskRecord};
use tempfile::TempDir;

/// Test harness owning a temporary directory with an index and a backup
/// root inside it.
pub struct TestHarness {
    /// Keeps the directory alive for the test's duration.
    pub dir: TempDir,
    /// Layer under test.
    pub layer: Arc<SearchLayer>,
}

impl TestHarness {
    /// Creates a harness with the default configuration.
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Creates a harness, letting the caller adjust the configuration.
    pub fn with_config(adjust: impl FnOnce(&mut SearchConfig)) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = SearchConfig::with_db_path(dir.path().join("db"));
        adjust(&mut config);
        let layer = SearchLayer::open(config).expect("open search layer");
        Self {
            dir,
            layer: Arc::new(layer),
        }
    }

    /// Backup root inside the harness directory.
    pub fn backup_root(&self) -> PathBuf {
        self.dir.path().join("backups")
    }

    /// Index every task, failing the test on error.
    pub fn index_all(&self, tasks: &[TaskRecord]) {
        for task in tasks {
            self.layer.index(task).expect("index task");
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A task at `lat,lon` with a generated name.
pub fn task_at(id: &str, lat: f64, lon: f64) -> TaskRecord {
    TaskRecord::builder()
        .id(id)
        .name(format!("Task {id}"))
        .geo(format!("{lat},{lon}"))
        .task_type("TT_OfflineTask")
        .build()
}

/// A task carrying `tags`.
pub fn tagged(id: &str, tags: &[&str]) -> TaskRecord {
    TaskRecord::builder()
        .id(id)
        .name(format!("Task {id}"))
        .tags(tags.iter().copied())
        .build()
}
