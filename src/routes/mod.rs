//! Routers: fixed routes (health, login, logout, api-docs) plus the generated CRUD routes.

pub mod common;
pub mod entity;

pub use common::common_routes;
pub use entity::entity_routes;

use crate::config::ServerConfig;
use crate::error::ConfigError;
use crate::handlers::{auth, docs};
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;

/// POST /login, POST /logout, GET /api-docs. Unauthenticated.
pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/api-docs", get(docs::api_docs))
        .with_state(state)
}

/// Every route without transport layers.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(common_routes())
        .merge(auth_routes(state.clone()))
        .merge(entity_routes(state))
}

/// [`app_router`] with CORS for the front-end origin and a request body limit.
pub fn serve_router(state: AppState, server: &ServerConfig) -> Result<Router, ConfigError> {
    let origin: HeaderValue = server.cors_origin().parse().map_err(|_| ConfigError::Env {
        key: "APP_PORT",
        message: format!("invalid CORS origin {}", server.cors_origin()),
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Ok(app_router(state)
        .layer(RequestBodyLimitLayer::new(server.body_limit_bytes))
        .layer(cors))
}
