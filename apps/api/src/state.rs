use std::sync::Arc;

use crate::config::Config;
use crate::store::LandingStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Landing/listing views. Postgres or REST, chosen at startup.
    pub store: Arc<dyn LandingStore>,
    pub config: Config,
}
