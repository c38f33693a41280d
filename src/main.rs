use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bookingfast_pricing::{app, cache, config::Config, db, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookingfast_pricing=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr = config.addr()?;

    let pool = db::connect(&config).await?;
    info!("Connected to database");

    let refresh = cache::refresh_period(config.policy_cache_ttl);
    let state = AppState::new(pool.clone(), config);

    tokio::spawn(cache::start_cache_warmer(state.cache.clone(), pool, refresh));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Pricing service listening on {}", addr);

    axum::serve(listener, app(state))
        .await
        .context("Server error")?;

    Ok(())
}
