//! BookingFast pricing service
//!
//! Deposit, remaining balance and effective rate calculations, served over
//! HTTP/JSON to the booking and payment-link workflows.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod pricing;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::cache::AppCache;
use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            cache: AppCache::new(config.policy_cache_ttl),
            config: Arc::new(config),
        }
    }
}

/// Build the application router with middleware
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .nest("/api/pricing", pricing::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use sqlx::postgres::PgPoolOptions;

    use crate::config::Config;
    use crate::AppState;

    /// State backed by a pool that never connects unless a query runs
    pub fn test_state() -> AppState {
        let config = Config {
            database_url: "postgres://localhost/bookingfast_test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            default_currency: "EUR".to_string(),
            db_max_connections: 1,
            policy_cache_ttl: Duration::from_secs(60),
        };
        let db = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy(&config.database_url)
            .expect("valid test database url");
        AppState::new(db, config)
    }
}
