//! Periodic cold and hot backups.
//!
//! [`BackupScheduler`] runs one tokio task per enabled job. Each task loops
//! `Waiting → BackingUp → Waiting`, waking either when its interval elapses
//! or when the shared stop channel flips to `true`. The copy itself runs on
//! the blocking pool.
//!
//! ```rust,ignore
//! let scheduler = BackupScheduler::new(Duration::from_secs(1800), Duration::from_secs(900));
//! scheduler.start(Arc::clone(&store), backup_root).await;
//! // ...
//! scheduler.stop().await;
//! ```
//!
//! `start` on a running scheduler stops and joins the previous jobs first.
//! `stop` is idempotent and returns only after both jobs have exited, so a
//! snapshot in progress always finishes first.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use dobrika_core::{JobHandle, JobState};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::snapshot::{take_snapshot, SnapshotKind};
use crate::store::TaskIndex;

/// Something a backup job can snapshot.
pub trait SnapshotTarget: Send + Sync + 'static {
    /// Snapshot into `kind`'s directory under `root`. Returns `false` on
    /// failure; the job keeps its schedule either way.
    fn snapshot(&self, kind: SnapshotKind, root: &Path) -> bool;
}

impl SnapshotTarget for TaskIndex {
    fn snapshot(&self, kind: SnapshotKind, root: &Path) -> bool {
        match take_snapshot(self, kind, root) {
            Ok(_) => true,
            Err(e) => {
                log::error!("{kind} snapshot of {} failed: {e}", self.path().display());
                false
            }
        }
    }
}

struct RunningJobs {
    stop_tx: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

/// Two independently timed backup jobs, started and stopped as a unit.
pub struct BackupScheduler {
    cold_interval: Duration,
    hot_interval: Duration,
    cold: JobHandle,
    hot: JobHandle,
    running: Mutex<Option<RunningJobs>>,
}

impl BackupScheduler {
    /// Create a stopped scheduler. A zero interval disables that job.
    pub fn new(cold_interval: Duration, hot_interval: Duration) -> Self {
        Self {
            cold_interval,
            hot_interval,
            cold: JobHandle::new("cold-backup"),
            hot: JobHandle::new("hot-backup"),
            running: Mutex::new(None),
        }
    }

    /// Start both jobs against `target`, writing snapshots under `root`.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start<T: SnapshotTarget>(&self, target: Arc<T>, root: PathBuf) {
        let mut running = self.running.lock().await;
        if let Some(previous) = running.take() {
            log::info!("Restarting backup scheduler");
            shutdown(previous).await;
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let mut tasks = Vec::with_capacity(2);

        let jobs = [
            (SnapshotKind::Cold, self.cold_interval, &self.cold),
            (SnapshotKind::Hot, self.hot_interval, &self.hot),
        ];
        for (kind, interval, handle) in jobs {
            if interval.is_zero() {
                log::info!("{kind} backups disabled");
                continue;
            }
            tasks.push(tokio::spawn(run_job(
                kind,
                interval,
                handle.clone(),
                Arc::clone(&target),
                root.clone(),
                stop_rx.clone(),
            )));
        }

        log::info!(
            "Backup scheduler started: {} job(s) into {}",
            tasks.len(),
            root.display()
        );
        *running = Some(RunningJobs { stop_tx, tasks });
    }

    /// Stop both jobs and wait for them to exit. Safe to call when nothing
    /// is running.
    pub async fn stop(&self) {
        let previous = self.running.lock().await.take();
        if let Some(previous) = previous {
            shutdown(previous).await;
            log::info!("Backup scheduler stopped");
        }
    }

    /// Returns `true` while at least one job task is alive.
    pub async fn is_running(&self) -> bool {
        self.running
            .lock()
            .await
            .as_ref()
            .is_some_and(|jobs| jobs.tasks.iter().any(|task| !task.is_finished()))
    }

    /// Current state of the cold job.
    pub fn cold_state(&self) -> JobState {
        self.cold.state()
    }

    /// Current state of the hot job.
    pub fn hot_state(&self) -> JobState {
        self.hot.state()
    }

    /// Handle of the cold job, for observing state changes.
    pub fn cold_handle(&self) -> &JobHandle {
        &self.cold
    }

    /// Handle of the hot job, for observing state changes.
    pub fn hot_handle(&self) -> &JobHandle {
        &self.hot
    }
}

impl std::fmt::Debug for BackupScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackupScheduler")
            .field("cold_interval", &self.cold_interval)
            .field("hot_interval", &self.hot_interval)
            .field("cold", &self.cold.state())
            .field("hot", &self.hot.state())
            .finish()
    }
}

async fn shutdown(jobs: RunningJobs) {
    jobs.stop_tx.send_replace(true);
    for task in jobs.tasks {
        if let Err(e) = task.await {
            log::error!("Backup job terminated abnormally: {e}");
        }
    }
}

async fn run_job<T: SnapshotTarget>(
    kind: SnapshotKind,
    interval: Duration,
    handle: JobHandle,
    target: Arc<T>,
    root: PathBuf,
    mut stop_rx: watch::Receiver<bool>,
) {
    loop {
        // Marks the current value seen, so a stop sent after this point
        // wakes the wait below.
        if *stop_rx.borrow_and_update() {
            break;
        }
        handle.set_state(JobState::Waiting);

        tokio::select! {
            biased;
            changed = stop_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                continue;
            }
            _ = tokio::time::sleep(interval) => {}
        }

        handle.set_state(JobState::BackingUp);
        let job_target = Arc::clone(&target);
        let job_root = root.clone();
        let succeeded = tokio::task::spawn_blocking(move || job_target.snapshot(kind, &job_root))
            .await
            .unwrap_or_else(|e| {
                log::error!("{kind} snapshot task failed: {e}");
                false
            });

        if succeeded {
            log::debug!("{kind} backup completed");
        } else {
            log::warn!("{kind} backup failed, next attempt in {interval:?}");
        }
    }
    handle.set_state(JobState::Stopped);
}

// ============================================================================
// Tests
// ============================================================================
