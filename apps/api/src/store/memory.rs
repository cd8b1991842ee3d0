//! In-memory `LandingStore` used by tests. Records every query it receives.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use super::{LandingStore, StoreError};
use crate::models::landing::{LandingRow, ListingRow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Landing(String),
    Listings(String),
}

#[derive(Default)]
pub struct MemoryStore {
    landing: HashMap<String, Vec<LandingRow>>,
    listings: HashMap<String, Vec<ListingRow>>,
    failing_landing: bool,
    failing_listings: bool,
    hangs: bool,
    hangs_listings: bool,
    gates: HashMap<String, Arc<Notify>>,
    queries: Mutex<Vec<Query>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, slug: &str, rows: Vec<LandingRow>) -> Self {
        self.landing.insert(slug.to_string(), rows);
        self
    }

    pub fn with_listings(mut self, slug: &str, rows: Vec<ListingRow>) -> Self {
        self.listings.insert(slug.to_string(), rows);
        self
    }

    pub fn failing_landing(mut self) -> Self {
        self.failing_landing = true;
        self
    }

    pub fn failing_listings(mut self) -> Self {
        self.failing_listings = true;
        self
    }

    /// Every query waits forever.
    pub fn hanging(mut self) -> Self {
        self.hangs = true;
        self
    }

    /// Only the listings query waits forever.
    pub fn hanging_listings(mut self) -> Self {
        self.hangs_listings = true;
        self
    }

    /// Landing queries for `slug` wait until the returned handle is notified.
    pub fn gate(&mut self, slug: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.insert(slug.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn queries(&self) -> Vec<Query> {
        self.queries.lock().unwrap().clone()
    }

    fn record(&self, query: Query) {
        self.queries.lock().unwrap().push(query);
    }

    fn outage() -> StoreError {
        StoreError::Api {
            status: 503,
            message: "store unavailable".to_string(),
        }
    }
}

#[async_trait]
impl LandingStore for MemoryStore {
    async fn landing_rows(&self, slug: &str) -> Result<Vec<LandingRow>, StoreError> {
        self.record(Query::Landing(slug.to_string()));
        if self.hangs {
            std::future::pending::<()>().await;
        }
        if let Some(gate) = self.gates.get(slug) {
            gate.notified().await;
        }
        if self.failing_landing {
            return Err(Self::outage());
        }
        Ok(self.landing.get(slug).cloned().unwrap_or_default())
    }

    async fn listing_rows(&self, slug: &str) -> Result<Vec<ListingRow>, StoreError> {
        self.record(Query::Listings(slug.to_string()));
        if self.hangs || self.hangs_listings {
            std::future::pending::<()>().await;
        }
        if self.failing_listings {
            return Err(Self::outage());
        }
        Ok(self.listings.get(slug).cloned().unwrap_or_default())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Row builders
// ────────────────────────────────────────────────────────────────────────────

pub fn landing_row(slug: &str, id: i64, tipo: &str, ordem: i32, ativo: bool) -> LandingRow {
    LandingRow {
        corretor_slug: slug.to_string(),
        bloco_id: id,
        bloco_tipo: Some(tipo.to_string()),
        bloco_ordem: Some(ordem),
        bloco_ativo: Some(ativo),
        bloco_conteudo: None,
        titulo_seo: Some(format!("{slug} | Imóveis")),
        descricao_seo: Some(format!("Página de {slug}")),
    }
}

pub fn with_content(mut row: LandingRow, content: Value) -> LandingRow {
    row.bloco_conteudo = Some(content);
    row
}

pub fn listing_row(id: i64, titulo: &str, preco: f64) -> ListingRow {
    ListingRow {
        id,
        imagem_principal: Some(format!("https://cdn.example.com/{id}.jpg")),
        titulo: Some(titulo.to_string()),
        localizacao: Some("São Paulo, SP".to_string()),
        preco: Some(preco),
        ativo: Some(true),
        destaque: None,
        imagens: None,
    }
}
