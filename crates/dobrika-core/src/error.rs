//! Error types for dobrika-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for Dobrika operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across the Dobrika crates.
///
/// Search routines never surface these to callers; they fold engine
/// failures into a search status instead. Index writes, snapshots and
/// startup do propagate them.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error with the path that was being touched
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path involved in the failed operation
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// Input rejected before it reached the index
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// Failure reported by the search-index engine
    #[error("Engine error: {message}")]
    Engine {
        /// Engine error rendered as text
        message: String,
    },

    /// Generic operation failure
    #[error("Operation failed: {message}")]
    Operation {
        /// What failed
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates an I/O error tagged with the path it concerns.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new engine error.
    pub fn engine<S: Into<String>>(message: S) -> Self {
        Error::Engine {
            message: message.into(),
        }
    }

    /// Creates a new generic operation error.
    pub fn operation<S: Into<String>>(message: S) -> Self {
        Error::Operation {
            message: message.into(),
        }
    }

    /// Returns whether the caller caused this error.
    ///
    /// Client errors map to "invalid input" at the transport; everything
    /// else is a server fault.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Validation { .. } => true,
            Error::Json(_) => true,
            Error::Io { .. } => false,
            Error::Config { .. } => false,
            Error::Engine { .. } => false,
            Error::Operation { .. } => false,
        }
    }
}
