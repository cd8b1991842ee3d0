pub mod health;

use axum::{routing::get, Router};

use crate::page::handlers;
use crate::state::AppState;

/// Every path except `/health` is a tenant page (or the admin prefix, which
/// the page handler turns away before any query).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handlers::handle_page))
        .route("/*path", get(handlers::handle_page))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::store::memory::{landing_row, listing_row, with_content, MemoryStore, Query};

    fn app(store: Arc<MemoryStore>) -> Router {
        build_router(AppState {
            store,
            config: Config::for_tests(),
        })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn broker_store() -> MemoryStore {
        MemoryStore::new()
            .with_page(
                "joao-silva",
                vec![
                    with_content(
                        landing_row("joao-silva", 1, "hero", 1, true),
                        json!({"titulo": "Encontre seu lar"}),
                    ),
                    landing_row("joao-silva", 2, "cta", 0, true),
                    landing_row("joao-silva", 3, "sobre", 2, false),
                    landing_row("joao-silva", 4, "catalogo", 3, true),
                ],
            )
            .with_listings("joao-silva", vec![listing_row(9, "Cobertura Moema", 2_100_000.0)])
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app(Arc::new(MemoryStore::new())), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_page_dispatches_active_blocks_in_order() {
        let (status, body) = get_json(app(Arc::new(broker_store())), "/joao-silva").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "joao-silva | Imóveis");
        assert_eq!(body["description"], "Página de joao-silva");

        let types: Vec<&str> = body["blocks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["type"].as_str().unwrap())
            .collect();
        assert_eq!(types, vec!["cta", "hero", "catalog"]);

        assert_eq!(body["blocks"][1]["id"], 1);
        assert_eq!(body["blocks"][1]["payload"]["title"], "Encontre seu lar");
        assert_eq!(body["blocks"][2]["payload"][0]["title"], "Cobertura Moema");
    }

    #[tokio::test]
    async fn test_listing_outage_still_serves_page() {
        let store = Arc::new(broker_store().failing_listings());
        let (status, body) = get_json(app(store), "/joao-silva").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["blocks"][2]["type"], "catalog");
        assert_eq!(body["blocks"][2]["payload"], json!([]));
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found() {
        let (status, body) = get_json(app(Arc::new(broker_store())), "/unknown-agent").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "PAGE_NOT_FOUND");
        assert_eq!(body["error"]["home"], "/");
    }

    #[tokio::test]
    async fn test_landing_outage_looks_like_not_found() {
        let store = Arc::new(broker_store().failing_landing());
        let (status, body) = get_json(app(store), "/joao-silva").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "PAGE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_root_path_loads_demo_slug() {
        let store = Arc::new(MemoryStore::new());
        let (status, _) = get_json(app(store.clone()), "/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(store.queries().contains(&Query::Landing("demo".to_string())));
    }

    #[tokio::test]
    async fn test_admin_path_issues_no_queries() {
        let store = Arc::new(broker_store());
        for uri in ["/admin", "/admin/blocos"] {
            let (status, body) = get_json(app(store.clone()), uri).await;
            assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
            assert_eq!(body["error"]["code"], "NOT_IMPLEMENTED");
        }
        assert!(store.queries().is_empty());
    }

    #[tokio::test]
    async fn test_pages_are_read_only() {
        let response = app(Arc::new(broker_store()))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/joao-silva")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
