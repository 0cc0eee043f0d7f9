//! Cold and hot index snapshots.
//!
//! A snapshot is a full recursive copy of the index directory into
//! `<root>/cold` or `<root>/hot`. The destination is removed first, so each
//! snapshot wholly replaces its predecessor. Symbolic links are recreated,
//! not followed. After the copy a [`SnapshotManifest`] is written next to
//! the index files.
//!
//! # Manifest Format
//!
//! ```json
//! {
//!   "kind": "cold",
//!   "taken_at": "2024-01-15T10:30:00Z",
//!   "document_count": 42,
//!   "schema_version": 1
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use dobrika_core::{Error, Result};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::schema::SCHEMA_VERSION;
use crate::store::TaskIndex;

/// Manifest filename written into every snapshot.
pub const MANIFEST_FILE: &str = "dobrika-snapshot.json";

/// Which of the two snapshot series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotKind {
    /// Long-interval snapshot under `<root>/cold`.
    Cold,
    /// Short-interval snapshot under `<root>/hot`.
    Hot,
}

impl SnapshotKind {
    /// Subdirectory of the backup root holding this series.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Hot => "hot",
        }
    }

    /// Snapshot directory for this series under `root`.
    pub fn destination(&self, root: &Path) -> PathBuf {
        root.join(self.dir_name())
    }
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Metadata written alongside a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotManifest {
    /// Snapshot series.
    pub kind: SnapshotKind,

    /// When the copy finished.
    pub taken_at: DateTime<Utc>,

    /// Live documents at the time of the copy.
    pub document_count: u64,

    /// Schema version of the copied index.
    pub schema_version: u32,
}

impl SnapshotManifest {
    /// Create a manifest stamped with the current time.
    pub fn new(kind: SnapshotKind, document_count: u64) -> Self {
        Self {
            kind,
            taken_at: Utc::now(),
            document_count,
            schema_version: SCHEMA_VERSION,
        }
    }

    /// Load the manifest of the snapshot in `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the manifest into `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = dir.join(MANIFEST_FILE);
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content).map_err(|e| Error::io_with_path(e, &path))?;
        Ok(())
    }
}

/// Take a snapshot of `store` into `root`.
///
/// Holds the store's write guard for the whole copy, so no commit runs
/// concurrently.
pub fn take_snapshot(store: &TaskIndex, kind: SnapshotKind, root: &Path) -> Result<SnapshotManifest> {
    let destination = kind.destination(root);
    let _guard = store.guard().exclusive("snapshot");

    log::info!(
        "Starting {kind} snapshot of {} into {}",
        store.path().display(),
        destination.display()
    );

    if destination.exists() {
        std::fs::remove_dir_all(&destination).map_err(|e| Error::io_with_path(e, &destination))?;
    }
    copy_dir_recursive(store.path(), &destination)?;

    let manifest = SnapshotManifest::new(kind, store.document_count());
    manifest.save(&destination)?;

    log::info!(
        "Finished {kind} snapshot ({} documents)",
        manifest.document_count
    );
    Ok(manifest)
}

/// Copy the tree under `src` to `dst`, creating `dst`.
///
/// Regular files are copied, directories recreated and symbolic links
/// recreated pointing at their original targets.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst).map_err(|e| Error::io_with_path(e, dst))?;

    for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            match e.into_io_error() {
                Some(io) => Error::io_with_path(io, path),
                None => Error::operation(format!("Failed to walk {}", path.display())),
            }
        })?;

        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| Error::operation(format!("Unexpected path outside source: {e}")))?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| Error::io_with_path(e, &target))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target).map_err(|e| Error::io_with_path(e, &target))?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    let points_to = std::fs::read_link(link).map_err(|e| Error::io_with_path(e, link))?;
    std::os::unix::fs::symlink(&points_to, target).map_err(|e| Error::io_with_path(e, target))
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    std::fs::copy(link, target).map_err(|e| Error::io_with_path(e, target))?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
