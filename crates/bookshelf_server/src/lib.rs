//! HTTP surface for the bookshelf catalog.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;

pub use config::{ConfigError, DatabaseLocation, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use state::AppState;

/// Builds the application router.
///
/// Only `GET /primary_categories` is routed; anything else falls through to
/// axum's default 404/405 handling.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/primary_categories",
            get(routes::primary_categories::index),
        )
        .layer(axum::middleware::from_fn(middleware::log_request))
        .with_state(state)
}
