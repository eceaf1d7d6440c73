//! Taskdeck server library: CLI definition, HTTP API, and logging setup

use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use taskdeck_core::TaskdeckConfig;

pub mod api;
pub mod logging;

pub use api::{build_router, AppState};
pub use logging::LogFormat;

/// Taskdeck - task-tracking backend server
#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about)]
pub struct Cli {
    /// Path to the SQLite database file (created if missing)
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Address to bind the HTTP server to
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to bind the HTTP server to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the effective configuration: CLI flags override environment
    /// variables, which override the defaults.
    #[must_use]
    pub fn resolve_config(&self) -> TaskdeckConfig {
        let mut config = TaskdeckConfig::from_env();
        if let Some(database) = &self.database {
            config.database_path.clone_from(database);
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config
    }
}
