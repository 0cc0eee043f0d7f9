//! # dobrika-server
//!
//! HTTP transport for the Dobrika search layer.
//!
//! This crate provides:
//! - the axum router (`/healthz`, `/index`, `/search`)
//! - layered configuration (defaults, TOML file, flags and environment)
//! - the serve lifecycle, which stops the backup jobs on every exit path
//! - the `dobrika` binary, which also drives the backup scheduler

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

pub use config::{Args, ServerConfig};
pub use error::{ApiError, Error, Result};
pub use routes::router;
pub use server::{open_layer, serve};
