mod app;
mod config;
mod handlers;
mod models;
mod state;
mod store;
mod validation;

use std::sync::Arc;

use gps_common::{bind_listener, init_tracing, shutdown_signal};

use crate::config::{Config, ConfigError};
use crate::state::AppState;
use crate::store::{MongoPingStore, StoreConnector, StoreError};

#[derive(Debug, thiserror::Error)]
enum BootstrapError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("document store unavailable: {0}")]
    DocumentStore(#[source] StoreError),
    #[error("relational store unavailable: {0}")]
    RelationalStore(#[source] StoreError),
    #[error("listener on port {port} failed: {source}")]
    Listener { port: u16, source: std::io::Error },
}

#[tokio::main]
async fn main() {
    let _guards = init_tracing("ingestion-service");

    if let Err(err) = run().await {
        tracing::error!(error = %err, "ingestion service stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BootstrapError> {
    let config = Config::from_env()?;
    tracing::info!(config = ?config, "configuration loaded");

    let state = connect_stores(&config).await?;
    let app = app::build_router(state);

    let listener = bind_listener(config.port)
        .await
        .map_err(|source| BootstrapError::Listener {
            port: config.port,
            source,
        })?;
    tracing::info!(port = config.port, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| BootstrapError::Listener {
            port: config.port,
            source,
        })
}

// Both store handles exist before any route does.
async fn connect_stores(config: &Config) -> Result<AppState, BootstrapError> {
    tracing::info!("connecting to datastores");
    let connector = StoreConnector::new(config);

    let database = connector
        .document_store()
        .await
        .map_err(BootstrapError::DocumentStore)?;
    let relational = connect_relational(&connector).await?;

    Ok(AppState {
        pings: Arc::new(MongoPingStore::new(database)),
        relational,
    })
}

async fn connect_relational(
    connector: &StoreConnector,
) -> Result<Option<Arc<tokio_postgres::Client>>, BootstrapError> {
    if !connector.relational_store_configured() {
        tracing::info!("relational store not configured");
    }
    let client = connector
        .relational_store()
        .await
        .map_err(BootstrapError::RelationalStore)?;
    Ok(client.map(Arc::new))
}
