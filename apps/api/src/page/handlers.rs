//! Axum route handler for public tenant pages.

use std::sync::Arc;

use axum::{extract::State, http::Uri, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::page::blocks::BlockKind;
use crate::page::dispatch::{render_page, BlockPayload, BlockRenderer};
use crate::page::{resolve_route, CompositionController, LoadOutcome, PageState, Route};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RenderedBlock {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: Value,
}

#[derive(Debug, Serialize)]
pub struct PageView {
    pub title: String,
    pub description: String,
    pub blocks: Vec<RenderedBlock>,
}

/// Renders each dispatched block as a JSON object.
#[derive(Default)]
struct JsonRenderer {
    blocks: Vec<RenderedBlock>,
}

impl BlockRenderer for JsonRenderer {
    fn render(&mut self, kind: &BlockKind, id: i64, payload: BlockPayload<'_>) {
        match serde_json::to_value(&payload) {
            Ok(payload) => self.blocks.push(RenderedBlock {
                id,
                kind: kind.as_str().to_string(),
                payload,
            }),
            Err(e) => warn!("Could not render block {id}: {e}"),
        }
    }
}

/// GET / and GET /*path
///
/// Resolves the path to a tenant slug, loads the page and returns its
/// dispatched blocks. Admin paths never reach the pipeline.
pub async fn handle_page(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<PageView>, AppError> {
    let slug = match resolve_route(uri.path(), &state.config.routes) {
        Route::Admin => return Err(AppError::NotImplemented),
        Route::Page(slug) => slug,
    };

    let controller =
        CompositionController::new(Arc::clone(&state.store), state.config.load_settings());
    let page = match controller.load(&slug).await {
        LoadOutcome::Applied(PageState::Ready(page)) => page,
        _ => return Err(AppError::PageNotFound),
    };

    let mut renderer = JsonRenderer::default();
    render_page(&page, &mut renderer);

    Ok(Json(PageView {
        title: controller
            .document_title()
            .unwrap_or_else(|| state.config.brand_name.clone()),
        description: page.composition.seo_description.clone(),
        blocks: renderer.blocks,
    }))
}
