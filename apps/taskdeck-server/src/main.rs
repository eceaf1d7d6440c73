//! Taskdeck server entrypoint

use clap::Parser;
use taskdeck_core::TaskStore;
use taskdeck_server::{build_router, logging, AppState, Cli};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_format)?;

    let config = cli.resolve_config();

    // Make sure the database directory exists before SQLite tries to create
    // the file inside it.
    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let store = TaskStore::open(&config.database_path).await?;
    let app = build_router(AppState::new(store));

    let listener = TcpListener::bind((config.host, config.port)).await?;
    info!("Taskdeck listening on {}:{}", config.host, config.port);

    axum::serve(listener, app).await?;
    Ok(())
}
