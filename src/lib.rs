// Greed Line: a one-page game that tracks visitors by cookie and stores each
// visitor's daily amount in a CSV profiles table.

pub mod config;
pub mod cookies;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod views;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, Router};
use http::{header, Method};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use config::AppConfig;
use db::{DbError, Repositories};
use handlers::{get_page, get_results, health_check, submit_amount, AppState, ServerState};

/// Opens storage and builds the shared state
pub async fn build_state(config: AppConfig) -> Result<AppState, DbError> {
    let repositories: Repositories = db::open(&config).await?;
    Ok(Arc::new(ServerState {
        config,
        repositories,
    }))
}

/// Largest request body accepted, in bytes
pub const MAX_BODY_BYTES: usize = 16 * 1024;

/// Builds the HTTP router
pub fn app(state: AppState) -> Router {
    // Configure CORS policy
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/", get(get_page))
        .route("/submit", post(submit_amount))
        .route("/results", get(get_results))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(10)))
                .layer(cors),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
