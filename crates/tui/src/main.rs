mod app;
mod theme;

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    sync::Mutex,
};

use dealshelf_core::{
    api::DealsClient,
    catalog::Catalog,
    config::{self, AppConfig},
};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    if let Some(path) = config::ensure_default_config()? {
        info!(path = %path.display(), "Using config file");
    }
    let config = AppConfig::load()?;

    let client = DealsClient::new(&config).context("failed to build HTTP client")?;
    let catalog = Catalog::new(config);

    let mut app = app::DealshelfApp::new(catalog, client);
    app.run().await
}

// The terminal belongs to the UI, so logs only go to a file.
fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("dealshelf.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
