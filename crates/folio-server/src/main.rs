//! # Folio Server
//!
//! Main binary: loads configuration, connects to PostgreSQL, prepares
//! object storage, and serves the REST API.

use folio_api::{AppState, build_router};
use folio_db::{
    Database,
    storage::{StorageClient, StorageConfig},
};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = folio_common::config::init()?;

    // Initialize tracing (structured logging)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=debug,tower_http=debug".into()),
        )
        .with_target(true)
        .init();

    tracing::info!("Starting Folio v{}", env!("CARGO_PKG_VERSION"));

    // Connect and migrate
    let db = Database::connect(config).await?;
    db.migrate().await?;

    // Object storage (MinIO / S3)
    let storage = StorageClient::new(&StorageConfig {
        endpoint: config.storage.endpoint.clone(),
        access_key: config.storage.access_key.clone(),
        secret_key: config.storage.secret_key.clone(),
        bucket: config.storage.bucket.clone(),
        region: config.storage.region.clone(),
        public_url: config.storage.public_url.clone(),
    })?;
    storage.ensure_bucket().await?;
    tracing::info!(bucket = %config.storage.bucket, "Object storage ready");

    // REST API
    let router = build_router(AppState { db, storage });
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    tracing::info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
