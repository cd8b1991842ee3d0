//! Row fetcher: the two read-only queries a page load issues against the store.
//!
//! `AppState` holds an `Arc<dyn LandingStore>`, chosen at startup from config.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::landing::{LandingRow, ListingRow};

pub mod rest;

#[cfg(test)]
pub mod memory;

pub use rest::RestLandingStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Store query timed out after {0:?}")]
    Timeout(Duration),
}

/// Read access to the landing and listing views, keyed by tenant slug.
#[async_trait]
pub trait LandingStore: Send + Sync {
    /// All block rows of the tenant's page, ordered by block order ascending.
    async fn landing_rows(&self, slug: &str) -> Result<Vec<LandingRow>, StoreError>;

    /// All listing rows of the tenant.
    async fn listing_rows(&self, slug: &str) -> Result<Vec<ListingRow>, StoreError>;
}

/// Bounds a store query by `limit`; an elapsed timer becomes `StoreError::Timeout`.
pub async fn with_timeout<T, F>(limit: Duration, query: F) -> Result<T, StoreError>
where
    F: std::future::Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, query).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(limit)),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL backend
// ────────────────────────────────────────────────────────────────────────────

pub struct PgLandingStore {
    pool: PgPool,
}

impl PgLandingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LandingStore for PgLandingStore {
    async fn landing_rows(&self, slug: &str) -> Result<Vec<LandingRow>, StoreError> {
        Ok(sqlx::query_as::<_, LandingRow>(
            r#"
            SELECT corretor_slug,
                   bloco_id::int8 AS bloco_id,
                   bloco_tipo,
                   bloco_ordem::int4 AS bloco_ordem,
                   bloco_ativo,
                   bloco_conteudo,
                   titulo_seo,
                   descricao_seo
            FROM public_landing_por_slug
            WHERE corretor_slug = $1
            ORDER BY bloco_ordem ASC
            "#,
        )
        .bind(slug)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn listing_rows(&self, slug: &str) -> Result<Vec<ListingRow>, StoreError> {
        Ok(sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT id::int8 AS id,
                   imagem_principal,
                   titulo,
                   localizacao,
                   preco::float8 AS preco,
                   ativo,
                   destaque,
                   imagens
            FROM public_imoveis_por_slug
            WHERE corretor_slug = $1
            "#,
        )
        .bind(slug)
        .fetch_all(&self.pool)
        .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_elapses() {
        let limit = Duration::from_secs(5);
        let result: Result<(), StoreError> =
            with_timeout(limit, std::future::pending::<Result<(), StoreError>>()).await;
        assert!(matches!(result, Err(StoreError::Timeout(d)) if d == limit));
    }

    #[tokio::test]
    async fn test_with_timeout_passes_result_through() {
        let result = with_timeout(Duration::from_secs(5), async { Ok::<_, StoreError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
