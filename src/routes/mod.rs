use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware},
    services::CatalogService,
};

pub mod content;
pub mod users;

/// Shared application state
///
/// Built once at startup around the injected store; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }
}

/// Creates the application router with all routes
///
/// Catalog routes are mounted under `api_base_path`; `/health` stays at the root.
pub fn create_router(state: AppState, api_base_path: &str) -> Router {
    let base = normalize_base_path(api_base_path);
    let router = Router::new().route("/health", get(health_check));

    let router = if base.is_empty() {
        router.merge(api_routes())
    } else {
        router.nest(&base, api_routes())
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Catalog routes, relative to the base path
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/content", get(content::list))
        .route("/content/:content_id", get(content::get))
        .route("/users/:user_id/continueWatching", get(users::continue_watching))
        .route("/users/:user_id/watchProgress", post(users::report_progress))
}

/// `"api/"` → `"/api"`, `"/"` → `""`
fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MockCatalogStore, error::StoreError};
    use axum_test::TestServer;
    use std::sync::Arc;

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(normalize_base_path("/api"), "/api");
        assert_eq!(normalize_base_path("api/"), "/api");
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path(""), "");
        assert_eq!(normalize_base_path("/v1/catalog/"), "/v1/catalog");
    }

    fn server_with_unavailable_store() -> TestServer {
        let mut store = MockCatalogStore::new();
        store
            .expect_list_content()
            .returning(|| Err(StoreError::Decode("pool timed out".to_string())));
        store
            .expect_find_content()
            .returning(|_| Err(StoreError::Decode("pool timed out".to_string())));
        store
            .expect_list_watch_history()
            .returning(|_| Err(StoreError::Decode("pool timed out".to_string())));
        store
            .expect_upsert_watch_progress()
            .returning(|_| Err(StoreError::Decode("pool timed out".to_string())));

        let state = AppState::new(CatalogService::new(Arc::new(store), None));
        TestServer::new(create_router(state, "/api")).unwrap()
    }

    #[tokio::test]
    async fn test_unavailable_store_surfaces_as_500_with_message() {
        let server = server_with_unavailable_store();

        let response = server.get("/api/content").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "message": "Error fetching content" }));

        let response = server.get("/api/content/the-boys-series").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "message": "Error fetching content" }));

        let response = server.get("/api/users/demo_user_1/continueWatching").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "message": "Error fetching watch history" }));

        let response = server
            .post("/api/users/demo_user_1/watchProgress")
            .json(&json!({
                "contentId": "the-boys-series",
                "progressSeconds": 10,
                "totalSeconds": 20
            }))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "message": "Error updating watch progress" }));
    }

    #[tokio::test]
    async fn test_health_check_is_outside_base_path() {
        let server = server_with_unavailable_store();

        server.get("/health").await.assert_status_ok();
        server.get("/api/health").await.assert_status_not_found();
    }
}
