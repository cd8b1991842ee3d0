//! Composition controller: fetch → normalize → state transition.
//!
//! A controller owns one current `PageState`. Every `load` starts from
//! `Loading` and ends in `Ready` or `NotFound`. Loads are numbered; starting a
//! new load aborts the previous one, and a completion whose number is no
//! longer current is discarded without touching the state.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tokio::task::AbortHandle;
use tracing::{debug, error, info, warn};

use crate::page::blocks::{Listing, PageComposition, Testimonial};
use crate::page::normalize::{normalize_landing, normalize_listings, NormalizeError};
use crate::store::{with_timeout, LandingStore, StoreError};

#[derive(Debug, Clone)]
pub struct LoadSettings {
    /// Document title used when the page has no SEO title.
    pub brand_name: String,
    /// Upper bound for each store query.
    pub fetch_timeout: Duration,
}

impl Default for LoadSettings {
    fn default() -> Self {
        Self {
            brand_name: "Corretor Prime".to_string(),
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

/// Everything the dispatcher needs once a page is resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadyPage {
    pub composition: PageComposition,
    pub listings: Vec<Listing>,
    /// Separately-sourced testimonials. No source feeds this yet.
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Loading,
    NotFound,
    Ready(Arc<ReadyPage>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The load was current when it finished and its state was applied.
    Applied(PageState),
    /// A newer load started first; this result was dropped.
    Superseded,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Landing query failed for '{slug}': {source}")]
    Fetch {
        slug: String,
        #[source]
        source: StoreError,
    },

    #[error("No landing rows for '{0}'")]
    EmptyResult(String),

    #[error("Unexpected failure while composing '{slug}': {message}")]
    Unexpected { slug: String, message: String },
}

impl LoadError {
    fn log(&self) {
        match self {
            LoadError::EmptyResult(_) => info!("{}", self),
            LoadError::Fetch { .. } | LoadError::Unexpected { .. } => error!("{}", self),
        }
    }
}

/// Runs one page load against the store.
///
/// The landing query is critical: its failure or an empty result ends the
/// load. The listings query is best-effort: its failure leaves the catalog
/// empty.
pub async fn compose_page(
    store: &dyn LandingStore,
    slug: &str,
    settings: &LoadSettings,
) -> Result<ReadyPage, LoadError> {
    let (landing, listings) = tokio::join!(
        with_timeout(settings.fetch_timeout, store.landing_rows(slug)),
        with_timeout(settings.fetch_timeout, store.listing_rows(slug)),
    );

    let landing = landing.map_err(|source| LoadError::Fetch {
        slug: slug.to_string(),
        source,
    })?;
    if landing.is_empty() {
        return Err(LoadError::EmptyResult(slug.to_string()));
    }

    let listings = match listings {
        Ok(rows) => Some(rows),
        Err(e) => {
            warn!("Listings query failed for '{slug}', serving an empty catalog: {e}");
            None
        }
    };

    let composition = normalize_landing(&landing).map_err(|e| match e {
        NormalizeError::Empty => LoadError::EmptyResult(slug.to_string()),
        other => LoadError::Unexpected {
            slug: slug.to_string(),
            message: other.to_string(),
        },
    })?;

    Ok(ReadyPage {
        composition,
        listings: normalize_listings(listings),
        testimonials: Vec::new(),
    })
}

struct CurrentLoad {
    token: u64,
    task: Option<AbortHandle>,
}

pub struct CompositionController {
    store: Arc<dyn LandingStore>,
    settings: LoadSettings,
    current: Mutex<CurrentLoad>,
    state: watch::Sender<PageState>,
    title: watch::Sender<Option<String>>,
}

impl CompositionController {
    pub fn new(store: Arc<dyn LandingStore>, settings: LoadSettings) -> Self {
        let (state, _) = watch::channel(PageState::Loading);
        let (title, _) = watch::channel(None);
        Self {
            store,
            settings,
            current: Mutex::new(CurrentLoad {
                token: 0,
                task: None,
            }),
            state,
            title,
        }
    }

    pub fn state(&self) -> PageState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PageState> {
        self.state.subscribe()
    }

    /// The document title, written once per successful load.
    pub fn document_title(&self) -> Option<String> {
        self.title.borrow().clone()
    }

    /// Runs the full pipeline for `slug`, discarding whatever state a
    /// previous load left behind.
    pub async fn load(&self, slug: &str) -> LoadOutcome {
        let (token, task) = {
            let mut current = self.current.lock().await;
            if let Some(previous) = current.task.take() {
                previous.abort();
            }
            current.token += 1;

            let store = Arc::clone(&self.store);
            let settings = self.settings.clone();
            let owned_slug = slug.to_string();
            let task = tokio::spawn(async move {
                compose_page(store.as_ref(), &owned_slug, &settings).await
            });
            current.task = Some(task.abort_handle());
            self.state.send_replace(PageState::Loading);
            (current.token, task)
        };

        info!("Loading page for slug '{slug}' (load #{token})");

        let next = match task.await {
            Ok(Ok(page)) => PageState::Ready(Arc::new(page)),
            Ok(Err(e)) => {
                e.log();
                PageState::NotFound
            }
            Err(e) if e.is_cancelled() => {
                debug!("Load #{token} for '{slug}' was cancelled by a newer load");
                return LoadOutcome::Superseded;
            }
            Err(e) => {
                error!("Page load task for '{slug}' failed: {e}");
                PageState::NotFound
            }
        };

        self.apply(token, next).await
    }

    async fn apply(&self, token: u64, next: PageState) -> LoadOutcome {
        let mut current = self.current.lock().await;
        if current.token != token {
            debug!(
                "Discarding result of load #{token}; load #{} is current",
                current.token
            );
            return LoadOutcome::Superseded;
        }
        current.task = None;

        if let PageState::Ready(page) = &next {
            let seo_title = &page.composition.seo_title;
            let title = if seo_title.is_empty() {
                self.settings.brand_name.clone()
            } else {
                seo_title.clone()
            };
            self.title.send_replace(Some(title));
        }
        self.state.send_replace(next.clone());
        LoadOutcome::Applied(next)
    }
}

impl Drop for CompositionController {
    fn drop(&mut self) {
        if let Some(task) = self.current.get_mut().task.take() {
            task.abort();
        }
    }
}
