//! PostgREST-compatible HTTP backend (e.g. a hosted Supabase project).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{LandingStore, StoreError};
use crate::models::landing::{LandingRow, ListingRow};

const LANDING_VIEW: &str = "public_landing_por_slug";
const LISTINGS_VIEW: &str = "public_imoveis_por_slug";

#[derive(Clone)]
pub struct RestLandingStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestLandingStore {
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self, StoreError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn view_url(&self, view: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, view)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        view: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .client
            .get(self.view_url(view))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let rows: Vec<T> = response.json().await?;
        debug!("Fetched {} rows from {view}", rows.len());
        Ok(rows)
    }
}

fn slug_filter(slug: &str) -> (&'static str, String) {
    ("corretor_slug", format!("eq.{slug}"))
}

#[async_trait]
impl LandingStore for RestLandingStore {
    async fn landing_rows(&self, slug: &str) -> Result<Vec<LandingRow>, StoreError> {
        self.select(
            LANDING_VIEW,
            &[
                ("select", "*".to_string()),
                slug_filter(slug),
                ("order", "bloco_ordem.asc".to_string()),
            ],
        )
        .await
    }

    async fn listing_rows(&self, slug: &str) -> Result<Vec<ListingRow>, StoreError> {
        self.select(LISTINGS_VIEW, &[("select", "*".to_string()), slug_filter(slug)])
            .await
    }
}
