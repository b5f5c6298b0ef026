//! Bookstore Server - book catalog REST API

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookstore_server::{
    app,
    config::{AppConfig, LoggingConfig, StorageBackend},
    repository::{BookStore, MemoryBookStore, PgBookStore},
    AppState,
};

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bookstore_server={},tower_http=debug", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    init_tracing(&config.logging);

    tracing::info!("Starting Bookstore Server v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn BookStore> = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory book store");
            Arc::new(MemoryBookStore::new())
        }
        StorageBackend::Postgres => Arc::new(PgBookStore::connect(&config.storage).await?),
    };

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let app = app(AppState::new(store));

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
