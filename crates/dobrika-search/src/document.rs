//! Request and result records.
//!
//! [`TaskRecord`] is the write input, [`SearchRequest`] the read input and
//! [`SearchResult`] the read output. All three are plain serde structs so the
//! transport can decode them straight from request bodies; every field
//! defaults to empty when absent.
//!
//! # Creating Records
//!
//! ```rust
//! use dobrika_search::{SearchRequest, TaskRecord};
//!
//! let task = TaskRecord::builder()
//!     .id("t1")
//!     .name("Buy milk")
//!     .geo("55.0000,37.0000")
//!     .tag("shopping")
//!     .build();
//!
//! let request = SearchRequest::geo("55.0000,37.0000");
//! assert_eq!(task.task_id, "t1");
//! assert_eq!(request.query_type, "QT_GeoTasks");
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{QueryType, SearchStatus, TaskType};

/// A task to be indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskRecord {
    /// Short task title.
    pub task_name: String,
    /// Free-text description.
    pub task_desc: String,
    /// Position as `"lat,lon"`; may be empty.
    pub geo_data: String,
    /// Caller-assigned, globally unique id. Re-indexing an id replaces the
    /// earlier document.
    pub task_id: String,
    /// Raw task type string (`TT_OnlineTask`, `TT_OfflineTask`, ...).
    pub task_type: String,
    /// Tags in caller order.
    pub task_tags: Vec<String>,
}

impl TaskRecord {
    /// Create a new task builder.
    pub fn builder() -> TaskRecordBuilder {
        TaskRecordBuilder::default()
    }

    /// Parsed task type.
    pub fn kind(&self) -> TaskType {
        TaskType::from(self.task_type.as_str())
    }
}

/// Builder for TaskRecord.
#[derive(Debug, Default)]
pub struct TaskRecordBuilder {
    task: TaskRecord,
}

impl TaskRecordBuilder {
    /// Set the task ID.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.task.task_id = id.into();
        self
    }

    /// Set the task name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.task.task_name = name.into();
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.task.task_desc = description.into();
        self
    }

    /// Set the geo data (`"lat,lon"`).
    pub fn geo(mut self, geo: impl Into<String>) -> Self {
        self.task.geo_data = geo.into();
        self
    }

    /// Set the raw task type.
    pub fn task_type(mut self, task_type: impl Into<String>) -> Self {
        self.task.task_type = task_type.into();
        self
    }

    /// Append one tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.task.task_tags.push(tag.into());
        self
    }

    /// Replace all tags.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.task.task_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Build the record.
    pub fn build(self) -> TaskRecord {
        self.task
    }
}

/// A search request.
///
/// Exactly one routine is selected per request, by `query_type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    /// Free text for text search.
    pub user_query: String,
    /// Centre point (`"lat,lon"`) for geo search.
    pub geo_data: String,
    /// Routine selector (`QT_GeoTasks`, `QT_TagTasks`, ...).
    pub query_type: String,
    /// Tags for tag search.
    pub user_tags: Vec<String>,
}

impl SearchRequest {
    /// Geo search around `geo_data`.
    pub fn geo(geo_data: impl Into<String>) -> Self {
        Self {
            geo_data: geo_data.into(),
            query_type: QueryType::Geo.as_str().unwrap_or_default().to_string(),
            ..Default::default()
        }
    }

    /// Tag search over any of `tags`.
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_tags: tags.into_iter().map(Into::into).collect(),
            query_type: QueryType::Tags.as_str().unwrap_or_default().to_string(),
            ..Default::default()
        }
    }

    /// Free-text search. The query type is left empty, which routes to text
    /// search whenever the text is non-empty.
    pub fn text(user_query: impl Into<String>) -> Self {
        Self {
            user_query: user_query.into(),
            ..Default::default()
        }
    }

    /// Parsed query type.
    pub fn kind(&self) -> QueryType {
        QueryType::from(self.query_type.as_str())
    }
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Outcome of the request.
    pub status: SearchStatus,
    /// Matching task ids: nearest-first for geo search, best-first for text
    /// search, de-duplicated for tag search.
    #[serde(rename = "task_id")]
    pub task_ids: Vec<String>,
}

impl SearchResult {
    /// A result carrying only a status.
    pub fn status_only(status: SearchStatus) -> Self {
        Self {
            status,
            task_ids: Vec::new(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
