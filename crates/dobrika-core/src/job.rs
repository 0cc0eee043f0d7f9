//! Background job lifecycle state.
//!
//! Provides [`JobState`] and [`JobHandle`] for tracking periodic background
//! jobs such as the cold and hot index backups.
//!
//! # Usage
//!
//! ```rust
//! use dobrika_core::job::{JobHandle, JobState};
//!
//! let handle = JobHandle::new("cold-backup");
//! assert_eq!(handle.state(), JobState::Idle);
//!
//! handle.set_state(JobState::Waiting);
//! handle.set_state(JobState::BackingUp);
//! assert!(handle.state().is_active());
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

// ============================================================================
// JobState
// ============================================================================

/// State of a periodic job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobState {
    /// Job has never been started.
    Idle,
    /// Job is running and waiting for its next tick.
    Waiting,
    /// Job is executing its work.
    BackingUp,
    /// Job received a stop request and exited.
    Stopped,
}

impl JobState {
    /// Returns `true` while the job loop is alive.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Waiting | Self::BackingUp)
    }

    /// Returns `true` once the job loop has exited.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Waiting => write!(f, "waiting"),
            Self::BackingUp => write!(f, "backing up"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

// ============================================================================
// JobHandle
// ============================================================================

/// Thread-safe handle for observing and updating job state.
///
/// Cheap to clone (Arc internals). State changes are broadcast
/// to all subscribers via a watch channel.
#[derive(Clone)]
pub struct JobHandle {
    inner: Arc<JobHandleInner>,
}

struct JobHandleInner {
    name: String,
    tx: watch::Sender<JobState>,
}

impl JobHandle {
    /// Create a new job handle with the given name.
    ///
    /// Initial state is [`JobState::Idle`].
    pub fn new(name: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(JobState::Idle);
        Self {
            inner: Arc::new(JobHandleInner {
                name: name.into(),
                tx,
            }),
        }
    }

    /// Get the job name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Get the current job state.
    pub fn state(&self) -> JobState {
        *self.inner.tx.borrow()
    }

    /// Update the job state.
    ///
    /// All subscribers are notified of the change.
    pub fn set_state(&self, state: JobState) {
        log::debug!("Job '{}' → {state}", self.inner.name);
        self.inner.tx.send_replace(state);
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<JobState> {
        self.inner.tx.subscribe()
    }

    /// Wait until the job reaches `target`, or fail after `timeout`.
    pub async fn wait_for(&self, target: JobState, timeout: Duration) -> Result<(), String> {
        let mut rx = self.subscribe();
        let reached = tokio::time::timeout(timeout, rx.wait_for(|state| *state == target)).await;
        match reached {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(_)) => Err(format!("Job '{}' channel closed", self.inner.name)),
            Err(_) => Err(format!(
                "Job '{}' not {target} after {timeout:?} (state: {})",
                self.inner.name,
                self.state()
            )),
        }
    }
}

impl fmt::Debug for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobHandle")
            .field("name", &self.inner.name)
            .field("state", &self.state())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
