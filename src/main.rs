use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod catalog;
mod config;
mod lineups;
mod refresh;
mod store;

use api::AppState;
use config::Config;
use lineups::{LineupProvider, SofaScore};
use store::SnapshotStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    // The catalog is the input contract; failing to read it is fatal.
    let catalog = catalog::load(&config.catalog_path)?;
    info!(
        "Catalog loaded: {} matches from {}",
        catalog.matches.len(),
        config.catalog_path
    );

    let provider: Arc<dyn LineupProvider> =
        Arc::new(SofaScore::new(Some(&config.lineups_api_url))?);
    let store = SnapshotStore::new(&config.snapshot_path);
    info!("Publishing snapshots to {}", store.path().display());

    // Start the refresh loop in its own task
    tokio::spawn(refresh::run_refresh_loop(
        catalog,
        provider,
        store.clone(),
        Duration::from_secs(config.poll_interval_secs),
    ));

    // Serve the read API (blocks until shutdown)
    let app = api::router(AppState { store });
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Read API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
