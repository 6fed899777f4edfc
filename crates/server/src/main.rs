//! Gallery content server.
//!
//! Serves the gallery listings, detail pages and inquiry form as JSON.

use std::sync::Arc;

use clap::Parser;
use gallery_content::{DisabledRelay, EmailRelay, HttpRelay};
use gallery_persistence::BackendKind;
use gallery_persistence::backends::memory::MemoryStore;
use gallery_rest::{ServerConfig, create_app_with_config, init_logging};
use tracing::{info, warn};

#[cfg(feature = "sqlite")]
use gallery_persistence::backends::sqlite::SqliteStore;

/// Creates and initializes a SQLite store from the server configuration.
#[cfg(feature = "sqlite")]
fn create_sqlite_store(config: &ServerConfig) -> anyhow::Result<SqliteStore> {
    let db_path = config.database_url.as_deref().unwrap_or("gallery.db");
    info!(database = %db_path, "Initializing SQLite backend");

    let store = if db_path == ":memory:" {
        SqliteStore::in_memory()?
    } else {
        SqliteStore::open(db_path)?
    };
    store.init_schema()?;

    Ok(store)
}

/// Picks the email relay. Without a relay URL inquiries are refused.
fn create_relay(config: &ServerConfig) -> Arc<dyn EmailRelay> {
    match &config.relay_url {
        Some(url) => {
            info!(endpoint = %url, "Relaying inquiries over HTTP");
            let relay = HttpRelay::new(url);
            match &config.relay_api_key {
                Some(key) => Arc::new(relay.with_api_key(key)),
                None => Arc::new(relay),
            }
        }
        None => {
            warn!("No relay configured; inquiries will be rejected");
            Arc::new(DisabledRelay)
        }
    }
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let backend = BackendKind::from_database_url(config.database_url.as_deref());

    info!(
        port = config.port,
        host = %config.host,
        storage_backend = %backend,
        "Starting gallery server"
    );

    let relay = create_relay(&config);

    match backend {
        BackendKind::Memory => {
            let app = create_app_with_config(MemoryStore::new(), relay, config.clone());
            serve(app, &config).await
        }
        BackendKind::Sqlite => start_sqlite(config, relay).await,
    }
}

/// Starts the server with the SQLite backend.
#[cfg(feature = "sqlite")]
async fn start_sqlite(config: ServerConfig, relay: Arc<dyn EmailRelay>) -> anyhow::Result<()> {
    let store = create_sqlite_store(&config)?;
    let app = create_app_with_config(store, relay, config.clone());
    serve(app, &config).await
}

/// Fallback when sqlite feature is not enabled.
#[cfg(not(feature = "sqlite"))]
async fn start_sqlite(_config: ServerConfig, _relay: Arc<dyn EmailRelay>) -> anyhow::Result<()> {
    anyhow::bail!(
        "The sqlite backend requires the 'sqlite' feature. \
         Build with: cargo build -p gallery-server --features sqlite"
    )
}
