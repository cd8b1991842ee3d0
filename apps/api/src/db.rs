use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Opens the read-only pool used by the Postgres page store.
/// Waiting for a free connection counts against the page fetch timeout.
pub async fn create_pool(database_url: &str, acquire_timeout: Duration) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
        .context("Could not connect to the page database")?;

    info!("PostgreSQL pool ready (acquire timeout {acquire_timeout:?})");
    Ok(pool)
}
