//! Normalization of raw store rows into page domain values.
//!
//! The landing view is a page ⋈ blocks join flattened for transport: every row
//! is one block and carries a copy of the page-level SEO fields. Rows are
//! regrouped by tenant slug, page fields are taken from the first row of each
//! group, and the remainder of each row becomes a `Block`.

use thiserror::Error;
use tracing::warn;

use crate::models::landing::{LandingRow, ListingRow};
use crate::page::blocks::{Block, BlockConfig, BlockKind, Listing, ListingImage, PageComposition};

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("No landing rows to normalize")]
    Empty,
}

/// Rows sharing one page, with the page-level fields of its first row.
struct PageGroup<'a> {
    slug: &'a str,
    seo_title: Option<&'a str>,
    seo_description: Option<&'a str>,
    rows: Vec<&'a LandingRow>,
}

/// Groups rows by page in first-seen order; within a group, row order is kept.
fn group_by_page(rows: &[LandingRow]) -> Vec<PageGroup<'_>> {
    let mut groups: Vec<PageGroup<'_>> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|g| g.slug == row.corretor_slug) {
            Some(group) => group.rows.push(row),
            None => groups.push(PageGroup {
                slug: &row.corretor_slug,
                seo_title: row.titulo_seo.as_deref(),
                seo_description: row.descricao_seo.as_deref(),
                rows: vec![row],
            }),
        }
    }
    groups
}

/// Field-by-field mapping. Nullable columns fall back to an inactive block at
/// order 0, and the content payload is read leniently.
fn block_from_row(row: &LandingRow) -> Block {
    let config = row
        .bloco_conteudo
        .as_ref()
        .map(BlockConfig::from)
        .unwrap_or_default();

    Block {
        id: row.bloco_id,
        kind: BlockKind::from(row.bloco_tipo.as_deref().unwrap_or_default()),
        order: row.bloco_ordem.unwrap_or_default(),
        active: row.bloco_ativo.unwrap_or_default(),
        config,
    }
}

/// Builds the page composition from landing rows in fetch order.
///
/// No sorting, filtering or type validation happens here; the dispatcher
/// owns all of that.
pub fn normalize_landing(rows: &[LandingRow]) -> Result<PageComposition, NormalizeError> {
    let mut groups = group_by_page(rows).into_iter();
    let page = groups.next().ok_or(NormalizeError::Empty)?;

    let extra = groups.count();
    if extra > 0 {
        warn!(
            "Landing rows span {} pages; keeping '{}' only",
            extra + 1,
            page.slug
        );
    }

    let blocks = page.rows.iter().map(|row| block_from_row(row)).collect();

    Ok(PageComposition {
        slug: page.slug.to_string(),
        seo_title: page.seo_title.unwrap_or_default().to_string(),
        seo_description: page.seo_description.unwrap_or_default().to_string(),
        blocks,
    })
}

/// Passes listing rows through, substituting an empty catalog when the
/// fetch degraded. Missing scalar fields fall back to their defaults.
pub fn normalize_listings(rows: Option<Vec<ListingRow>>) -> Vec<Listing> {
    rows.unwrap_or_default()
        .into_iter()
        .map(|row| Listing {
            id: row.id,
            image: row.imagem_principal.unwrap_or_default(),
            title: row.titulo.unwrap_or_default(),
            location: row.localizacao.unwrap_or_default(),
            price: row.preco.unwrap_or_default(),
            active: row.ativo,
            featured: row.destaque,
            gallery: row.imagens.map(|images| {
                images
                    .0
                    .into_iter()
                    .map(|image| ListingImage {
                        id: image.id,
                        url: image.url,
                        order: image.ordem,
                    })
                    .collect()
            }),
        })
        .collect()
}
