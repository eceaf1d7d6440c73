//! Configuration for the taskdeck server

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

/// Default listen port for the HTTP API
pub const DEFAULT_PORT: u16 = 5000;

/// Configuration for the task database and HTTP listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskdeckConfig {
    /// Path to the SQLite database file (created if missing)
    pub database_path: PathBuf,
    /// Address the HTTP server binds to
    pub host: IpAddr,
    /// Port the HTTP server binds to
    pub port: u16,
}

impl TaskdeckConfig {
    /// Create a configuration with a custom database path and default
    /// listener settings
    #[must_use]
    pub fn new<P: AsRef<Path>>(database_path: P) -> Self {
        Self {
            database_path: database_path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads `TASKDECK_DATABASE_PATH`, `TASKDECK_HOST`, and `TASKDECK_PORT`;
    /// unset or unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database_path = std::env::var("TASKDECK_DATABASE_PATH")
            .map_or(defaults.database_path, PathBuf::from);
        let host = std::env::var("TASKDECK_HOST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.host);
        let port = std::env::var("TASKDECK_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        Self {
            database_path,
            host,
            port,
        }
    }
}

impl Default for TaskdeckConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("instance/tasks.db"),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
        }
    }
}
