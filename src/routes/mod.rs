//! Service-level routes (health, cache admin)

pub mod admin;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/cache/stats", get(admin::cache_stats))
        .route("/api/cache/invalidate", post(admin::invalidate_all))
        .route(
            "/api/cache/businesses/:business_id/invalidate",
            post(admin::invalidate_business),
        )
}
