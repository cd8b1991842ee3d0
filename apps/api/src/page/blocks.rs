//! Domain types for a composed tenant page.
//!
//! Everything here is rebuilt from raw store rows on every load; nothing is
//! mutated in place after normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ────────────────────────────────────────────────────────────────────────────
// Block kinds
// ────────────────────────────────────────────────────────────────────────────

/// The closed catalog of block types a page can be built from.
///
/// Tags outside the catalog are kept as `Unrecognized` so they survive
/// normalization; the dispatcher skips them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    Hero,
    About,
    Features,
    Catalog,
    Testimonials,
    Cta,
    Unrecognized(String),
}

impl BlockKind {
    pub fn as_str(&self) -> &str {
        match self {
            BlockKind::Hero => "hero",
            BlockKind::About => "about",
            BlockKind::Features => "features",
            BlockKind::Catalog => "catalog",
            BlockKind::Testimonials => "testimonials",
            BlockKind::Cta => "cta",
            BlockKind::Unrecognized(tag) => tag,
        }
    }
}

impl From<&str> for BlockKind {
    /// Accepts both the English tags and the store-native ones.
    fn from(tag: &str) -> Self {
        match tag {
            "hero" => BlockKind::Hero,
            "about" | "sobre" => BlockKind::About,
            "features" | "diferenciais" => BlockKind::Features,
            "catalog" | "catalogo" => BlockKind::Catalog,
            "testimonials" | "depoimentos" => BlockKind::Testimonials,
            "cta" => BlockKind::Cta,
            other => BlockKind::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for BlockKind {
    fn from(tag: String) -> Self {
        BlockKind::from(tag.as_str())
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        kind.as_str().to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Block payloads
// ────────────────────────────────────────────────────────────────────────────

/// Loosely-typed content of a block. Which fields are meaningful depends on
/// the block kind; all of them are optional.
///
/// Built from the stored payload with `BlockConfig::from(&Value)`, which never
/// fails: nulls, wrong types and unknown keys are ignored field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlockConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_link: Option<String>,
    /// Ordered sub-items, usually `{title, description}` pairs. Testimonials
    /// blocks may store full testimonial entries here instead.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Value>,
}

/// First usable value under the English key, then the store-native one.
fn pick<'a, T>(
    content: &'a Value,
    keys: [&str; 2],
    read: impl Fn(&'a Value) -> Option<T>,
) -> Option<T> {
    keys.iter().find_map(|key| content.get(key).and_then(&read))
}

fn text(content: &Value, keys: [&str; 2]) -> Option<String> {
    pick(content, keys, |v| v.as_str().map(String::from))
}

impl From<&Value> for BlockConfig {
    fn from(content: &Value) -> Self {
        BlockConfig {
            title: text(content, ["title", "titulo"]),
            subtitle: text(content, ["subtitle", "subtitulo"]),
            body: text(content, ["body", "texto"]),
            image: text(content, ["image", "imagem"]),
            button_label: text(content, ["button_label", "botao_texto"]),
            button_link: text(content, ["button_link", "botao_link"]),
            items: pick(content, ["items", "itens"], |v| v.as_array().cloned())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, alias = "texto")]
    pub body: String,
    #[serde(default, alias = "nome")]
    pub author: String,
    #[serde(default, alias = "ativo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// A single content unit of a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub order: i32,
    pub active: bool,
    pub config: BlockConfig,
}

/// The resolved page for one tenant: SEO metadata plus every block the store
/// returned, unsorted and unfiltered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageComposition {
    pub slug: String,
    pub seo_title: String,
    pub seo_description: String,
    pub blocks: Vec<Block>,
}

// ────────────────────────────────────────────────────────────────────────────
// Listings
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingImage {
    pub id: i64,
    pub url: String,
    pub order: i32,
}

/// A property shown by the catalog block. Sourced independently of blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub id: i64,
    pub image: String,
    pub title: String,
    pub location: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<ListingImage>>,
}
