use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vitrine::config::{Config, StoreConfig};
use vitrine::db::create_pool;
use vitrine::routes::build_router;
use vitrine::state::AppState;
use vitrine::store::{LandingStore, PgLandingStore, RestLandingStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitrine v{}", env!("CARGO_PKG_VERSION"));

    let store = build_store(&config).await?;

    let state = AppState {
        store,
        config: config.clone(),
    };

    // Pages are public and read-only
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_store(config: &Config) -> Result<Arc<dyn LandingStore>> {
    match &config.store {
        StoreConfig::Postgres { database_url } => {
            let pool = create_pool(database_url, config.fetch_timeout).await?;
            let store: Arc<dyn LandingStore> = Arc::new(PgLandingStore::new(pool));
            Ok(store)
        }
        StoreConfig::Rest { base_url, api_key } => {
            let store = RestLandingStore::new(base_url, api_key.clone(), config.fetch_timeout)?;
            info!("Reading pages from REST endpoint {base_url}");
            let store: Arc<dyn LandingStore> = Arc::new(store);
            Ok(store)
        }
    }
}
