//! Write guard serializing every mutation of the index directory.
//!
//! Commits and both snapshot kinds take the guard in exclusive mode, so none
//! of them overlap. Searches never take it: they read from the last
//! reloaded searcher, which is an immutable, already-committed view.

use parking_lot::{RwLock, RwLockWriteGuard};

/// Reader/writer lock over the index directory.
#[derive(Debug, Default)]
pub struct WriteGuard {
    lock: RwLock<()>,
}

impl WriteGuard {
    /// Create an unlocked guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until exclusive access is granted.
    ///
    /// `operation` only labels the log line emitted when the caller has to
    /// wait.
    pub fn exclusive(&self, operation: &str) -> RwLockWriteGuard<'_, ()> {
        if let Some(guard) = self.lock.try_write() {
            return guard;
        }
        log::debug!("{operation}: waiting for index write guard");
        self.lock.write()
    }

    /// Returns `true` while some operation holds exclusive access.
    pub fn is_locked(&self) -> bool {
        self.lock.is_locked_exclusive()
    }
}

// ============================================================================
// Tests
// ============================================================================
