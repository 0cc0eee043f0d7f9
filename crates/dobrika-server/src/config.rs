//! Server configuration.
//!
//! Settings resolve in three layers, later ones winning:
//!
//! 1. built-in defaults,
//! 2. an optional TOML file given with `--config`,
//! 3. command-line flags and their `DOBRIKA_*` environment variables.
//!
//! ```toml
//! addr = "0.0.0.0"
//! port = 8088
//! backup_root = "/var/backups/dobrika"
//!
//! [search]
//! db_path = "/var/lib/dobrika/db"
//! cold_backup_minutes = 30
//! hot_backup_minutes = 15
//! search_limit = 20
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use dobrika_search::SearchConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dobrika search server
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dobrika")]
#[command(about = "Geo, tag and free-text search over task records", long_about = None)]
#[command(version)]
pub struct Args {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "DOBRIKA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen address
    #[arg(long, env = "DOBRIKA_ADDR")]
    pub addr: Option<String>,

    /// Listen port
    #[arg(long, env = "DOBRIKA_PORT")]
    pub port: Option<u16>,

    /// Index directory
    #[arg(long, env = "DOBRIKA_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Minutes between cold backups (0 disables)
    #[arg(long, env = "DOBRIKA_COLD_MIN")]
    pub cold_backup_minutes: Option<u64>,

    /// Minutes between hot backups (0 disables)
    #[arg(long, env = "DOBRIKA_HOT_MIN")]
    pub hot_backup_minutes: Option<u64>,

    /// Leading results skipped by every search
    #[arg(long, env = "DOBRIKA_SEARCH_OFFSET")]
    pub search_offset: Option<usize>,

    /// Maximum results per search
    #[arg(long, env = "DOBRIKA_SEARCH_LIMIT")]
    pub search_limit: Option<usize>,

    /// Value-slot holding task coordinates
    #[arg(long, env = "DOBRIKA_GEO_INDEX")]
    pub geo_slot: Option<u32>,

    /// Directory receiving cold/hot snapshots; backups run only when set
    #[arg(long, env = "DOBRIKA_BACKUP_ROOT")]
    pub backup_root: Option<PathBuf>,
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address.
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Snapshot destination; `None` leaves the backup scheduler off.
    #[serde(default)]
    pub backup_root: Option<PathBuf>,

    /// Search layer settings.
    #[serde(default)]
    pub search: SearchConfig,
}

fn default_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8088
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
            backup_root: None,
            search: SearchConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read a TOML configuration file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config {}: {e}", path.display())))
    }

    /// Resolve the configuration from parsed arguments.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(args);
        config
            .search
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(config)
    }

    /// Socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }

    fn apply(&mut self, args: &Args) {
        if let Some(addr) = &args.addr {
            self.addr = addr.clone();
        }
        if let Some(port) = args.port {
            self.port = port;
        }
        if let Some(root) = &args.backup_root {
            self.backup_root = Some(root.clone());
        }

        let search = &mut self.search;
        if let Some(db_path) = &args.db_path {
            search.db_path = db_path.clone();
        }
        if let Some(minutes) = args.cold_backup_minutes {
            search.cold_backup_minutes = minutes;
        }
        if let Some(minutes) = args.hot_backup_minutes {
            search.hot_backup_minutes = minutes;
        }
        if let Some(offset) = args.search_offset {
            search.search_offset = offset;
        }
        if let Some(limit) = args.search_limit {
            search.search_limit = limit;
        }
        if let Some(slot) = args.geo_slot {
            search.geo_slot = slot;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
