//! Route modules for the Lectura server

pub mod annotations;
pub mod articles;
pub mod extract;
pub mod health;
pub mod render;
pub mod selection;

use axum::{http::HeaderMap, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
///
/// Article-scoped routers all use `:id` for the article segment so their
/// paths merge under one `/articles` tree.
pub fn app(state: AppState) -> Router {
    let articles = articles::router(state.clone())
        .merge(annotations::article_router(state.clone()))
        .merge(render::router(state.clone()))
        .merge(selection::router(state.clone()));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/health", get(health::health_check))
        .nest("/api/v1/articles", articles)
        .nest("/api/v1/annotations", annotations::router(state))
        .nest("/api/v1/extract", extract::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Caller identity from the `X-User-Id` header. An absent or blank
/// header means anonymous single-user mode.
pub(crate) fn user_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
