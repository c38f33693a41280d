//! Configuration loaded from the environment (and `.env` via dotenvy)

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Currency used when a request does not name one
    pub default_currency: String,
    pub db_max_connections: u32,
    pub policy_cache_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 8080)?,
            default_currency: env::var("DEFAULT_CURRENCY").unwrap_or_else(|_| "EUR".to_string()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            policy_cache_ttl: cache_ttl(parse_var("POLICY_CACHE_TTL_SECS", 300)?)?,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

/// Policy cache TTL; the warmer refreshes on a period derived from it, so zero
/// is rejected
fn cache_ttl(secs: u64) -> Result<Duration> {
    if secs == 0 {
        anyhow::bail!("POLICY_CACHE_TTL_SECS must be at least 1");
    }
    Ok(Duration::from_secs(secs))
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} has invalid value '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}
