use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

/// One row of the `public_landing_por_slug` view: a single block joined with
/// the page-level SEO fields, which the view repeats on every row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LandingRow {
    pub corretor_slug: String,
    pub bloco_id: i64,
    #[serde(default)]
    pub bloco_tipo: Option<String>,
    #[serde(default)]
    pub bloco_ordem: Option<i32>,
    #[serde(default)]
    pub bloco_ativo: Option<bool>,
    #[serde(default)]
    pub bloco_conteudo: Option<Value>,
    #[serde(default)]
    pub titulo_seo: Option<String>,
    #[serde(default)]
    pub descricao_seo: Option<String>,
}

/// One row of the `public_imoveis_por_slug` view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ListingRow {
    pub id: i64,
    #[serde(default)]
    pub imagem_principal: Option<String>,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub localizacao: Option<String>,
    #[serde(default)]
    pub preco: Option<f64>,
    #[serde(default)]
    pub ativo: Option<bool>,
    #[serde(default)]
    pub destaque: Option<bool>,
    #[serde(default)]
    pub imagens: Option<Json<Vec<ListingImageRow>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingImageRow {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub ordem: i32,
}
