//! Block dispatch: order, filter and route each block of a ready page to the
//! renderer for its kind.

use std::borrow::Cow;

use serde::Serialize;
use tracing::{debug, warn};

use crate::page::blocks::{Block, BlockConfig, BlockKind, Listing, Testimonial};
use crate::page::controller::ReadyPage;

/// The data a renderer receives for one block. Each kind gets only what it
/// needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BlockPayload<'a> {
    /// hero, about, features, cta
    Content(&'a BlockConfig),
    /// catalog: the independently fetched listings; `config` is ignored
    Listings(&'a [Listing]),
    Testimonials(Cow<'a, [Testimonial]>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchedBlock<'a> {
    pub id: i64,
    pub kind: &'a BlockKind,
    pub payload: BlockPayload<'a>,
}

/// Receives one call per rendered block, in page order.
pub trait BlockRenderer {
    fn render(&mut self, kind: &BlockKind, id: i64, payload: BlockPayload<'_>);
}

/// Active blocks of `page`, sorted by order (stable), each paired with its
/// payload. Blocks of unrecognized kinds are dropped.
pub fn dispatch(page: &ReadyPage) -> Vec<DispatchedBlock<'_>> {
    let mut ordered: Vec<&Block> = page.composition.blocks.iter().collect();
    ordered.sort_by_key(|block| block.order);

    ordered
        .into_iter()
        .filter(|block| block.active)
        .filter_map(|block| {
            route(block, page).map(|payload| DispatchedBlock {
                id: block.id,
                kind: &block.kind,
                payload,
            })
        })
        .collect()
}

/// Feeds every dispatched block of `page` to `renderer`.
pub fn render_page<R: BlockRenderer>(page: &ReadyPage, renderer: &mut R) {
    for block in dispatch(page) {
        renderer.render(block.kind, block.id, block.payload);
    }
}

fn route<'a>(block: &'a Block, page: &'a ReadyPage) -> Option<BlockPayload<'a>> {
    match &block.kind {
        BlockKind::Hero | BlockKind::About | BlockKind::Features | BlockKind::Cta => {
            Some(BlockPayload::Content(&block.config))
        }
        BlockKind::Catalog => Some(BlockPayload::Listings(&page.listings)),
        BlockKind::Testimonials => Some(BlockPayload::Testimonials(testimonials_for(
            block,
            &page.testimonials,
        ))),
        BlockKind::Unrecognized(tag) => {
            debug!("Skipping block {} with unrecognized type '{tag}'", block.id);
            None
        }
    }
}

/// Testimonials embedded in the block's items replace the separate list
/// entirely; there is no merge.
fn testimonials_for<'a>(block: &'a Block, separate: &'a [Testimonial]) -> Cow<'a, [Testimonial]> {
    if block.config.items.is_empty() {
        return Cow::Borrowed(separate);
    }

    let embedded: Vec<Testimonial> = block
        .config
        .items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(testimonial) => Some(testimonial),
            Err(e) => {
                warn!("Dropping malformed testimonial in block {}: {e}", block.id);
                None
            }
        })
        .collect();
    Cow::Owned(embedded)
}
