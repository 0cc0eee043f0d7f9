//! Dobrika core: shared errors and background job state.
//!
//! This crate provides the foundational types used by the other Dobrika
//! crates. It has no internal Dobrika dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`job`]: Observable state of long-lived background jobs

pub mod error;
pub mod job;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use job::{JobHandle, JobState};
