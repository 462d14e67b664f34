pub mod todos;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::http::types::ApiResponse;

/// Mounts the todo routes and the health check under `/api`; anything
/// else falls through to the generic 404 page. The API serves browser
/// frontends on other origins, so CORS is wide open.
pub fn app(todos: Router) -> Router {
    let api = Router::new().route("/health", get(health)).merge(todos);
    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .layer(CorsLayer::permissive())
}

async fn health() -> Json<ApiResponse<()>> {
    Json(ApiResponse::healthy())
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Resource not found" })))
}
