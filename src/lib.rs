//! Chatroom Backend Library
//!
//! Participant directory, message log, visibility rules and the inactivity
//! sweeper behind a small HTTP API.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod sweeper;
pub mod visibility;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::{routing::get, routing::post, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::extract::USER_HEADER;
use crate::api::openapi::ApiDoc;
use crate::api::AppState;

/// Create the application router with the given state
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_allowed_origins.as_deref());

    Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Participants
        .route(
            "/participants",
            get(api::participants::list).post(api::participants::register),
        )
        // Messages
        .route(
            "/messages",
            get(api::messages::list).post(api::messages::post),
        )
        // Heartbeat
        .route("/status", post(api::status::heartbeat))
        // OpenAPI / Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Create CORS layer; any origin is allowed unless an explicit list is given
fn cors_layer(allowed_origins: Option<&str>) -> CorsLayer {
    let origins = match allowed_origins {
        Some(list) if list.trim() != "*" => {
            let origins: Vec<HeaderValue> = list
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            AllowOrigin::list(origins)
        }
        _ => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(USER_HEADER),
        ])
}
