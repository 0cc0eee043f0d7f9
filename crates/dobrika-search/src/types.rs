//! Common types for the search layer.
//!
//! Configuration plus the closed vocabularies that travel over the wire:
//! query types, task types and search statuses.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use dobrika_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Search layer configuration.
///
/// Constructed once at startup and immutable for the lifetime of a
/// [`SearchLayer`](crate::SearchLayer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Path to the index directory.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Minutes between cold backups (0 disables the job).
    #[serde(default = "default_cold_backup_minutes")]
    pub cold_backup_minutes: u64,

    /// Minutes between hot backups (0 disables the job).
    #[serde(default = "default_hot_backup_minutes")]
    pub hot_backup_minutes: u64,

    /// Number of leading results skipped by every search.
    #[serde(default)]
    pub search_offset: usize,

    /// Maximum number of results returned by every search.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Value-slot holding the geo coordinate of each document.
    #[serde(default = "default_geo_slot")]
    pub geo_slot: u32,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("db")
}

fn default_cold_backup_minutes() -> u64 {
    30
}

fn default_hot_backup_minutes() -> u64 {
    15
}

fn default_search_limit() -> usize {
    20
}

fn default_geo_slot() -> u32 {
    9
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            cold_backup_minutes: default_cold_backup_minutes(),
            hot_backup_minutes: default_hot_backup_minutes(),
            search_offset: 0,
            search_limit: default_search_limit(),
            geo_slot: default_geo_slot(),
        }
    }
}

impl SearchConfig {
    /// Create a configuration for the given index directory, other fields
    /// defaulted.
    pub fn with_db_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Default::default()
        }
    }

    /// Check invariants that cannot be expressed in the types.
    pub fn validate(&self) -> Result<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(Error::config("db_path must not be empty"));
        }
        if self.search_limit == 0 {
            return Err(Error::config("search_limit must be greater than zero"));
        }
        Ok(())
    }

    /// Interval between cold backups.
    pub fn cold_backup_interval(&self) -> Duration {
        Duration::from_secs(self.cold_backup_minutes.saturating_mul(60))
    }

    /// Interval between hot backups.
    pub fn hot_backup_interval(&self) -> Duration {
        Duration::from_secs(self.hot_backup_minutes.saturating_mul(60))
    }
}

/// Which search routine a request selects.
///
/// Parsed case-sensitively from the request's `query_type` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    /// `QT_GeoTasks`: nearest tasks to a coordinate.
    Geo,
    /// `QT_OnlineTasks`: reserved, not implemented.
    Online,
    /// `QT_RandomTasks`: reserved, not implemented.
    Random,
    /// `QT_TagTasks`: tasks carrying any of the given tags.
    Tags,
    /// Anything else.
    Unknown,
}

impl QueryType {
    /// Wire string for this query type (`None` for [`QueryType::Unknown`]).
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Self::Geo => Some("QT_GeoTasks"),
            Self::Online => Some("QT_OnlineTasks"),
            Self::Random => Some("QT_RandomTasks"),
            Self::Tags => Some("QT_TagTasks"),
            Self::Unknown => None,
        }
    }
}

impl From<&str> for QueryType {
    fn from(value: &str) -> Self {
        match value {
            "QT_GeoTasks" => Self::Geo,
            "QT_OnlineTasks" => Self::Online,
            "QT_RandomTasks" => Self::Random,
            "QT_TagTasks" => Self::Tags,
            _ => Self::Unknown,
        }
    }
}

/// Kind of task being indexed.
///
/// Stored with each document but not yet used to alter indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskType {
    /// `TT_OnlineTask`
    Online,
    /// `TT_OfflineTask`
    Offline,
    /// Anything else.
    Unknown,
}

impl From<&str> for TaskType {
    fn from(value: &str) -> Self {
        match value {
            "TT_OnlineTask" => Self::Online,
            "TT_OfflineTask" => Self::Offline,
            _ => Self::Unknown,
        }
    }
}

/// Outcome of a search as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStatus {
    /// The routine ran; the id list may still be empty.
    #[serde(rename = "SearchOk")]
    Ok,
    /// Unknown query type, malformed input, or an engine failure.
    #[serde(rename = "SearchUnknownType")]
    UnknownTaskType,
    /// The query type is recognized but has no routine.
    #[serde(rename = "DSNotImplemented")]
    NotImplemented,
}

impl SearchStatus {
    /// Wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "SearchOk",
            Self::UnknownTaskType => "SearchUnknownType",
            Self::NotImplemented => "DSNotImplemented",
        }
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
