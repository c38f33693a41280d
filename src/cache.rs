//! In-memory caching using moka
//!
//! Deposit policies change rarely (only when a business edits its settings),
//! so they are cached per business with a TTL. Bookings are never cached.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

use crate::pricing::queries;
use crate::pricing::DepositPolicy;

/// Application cache holding per-business deposit policies
#[derive(Clone)]
pub struct AppCache {
    /// Deposit policies (business user id -> DepositPolicy)
    pub deposit_policies: Cache<Uuid, DepositPolicy>,
}

impl AppCache {
    /// Create a new cache instance
    ///
    /// No idle expiry: warmed policies for businesses nobody quotes must
    /// survive until the next refresh.
    pub fn new(policy_ttl: Duration) -> Self {
        Self {
            deposit_policies: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(policy_ttl)
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            deposit_policies_size: self.deposit_policies.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.deposit_policies.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate the policy of one business after its settings changed
    pub async fn invalidate_business(&self, business_id: Uuid) {
        self.deposit_policies.invalidate(&business_id).await;
        info!("Cache invalidated for business: {}", business_id);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(5 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub deposit_policies_size: u64,
}

const MIN_REFRESH: Duration = Duration::from_secs(1);

/// Refresh period for a policy TTL: half of it, so every policy is reloaded
/// before it expires
pub fn refresh_period(policy_ttl: Duration) -> Duration {
    (policy_ttl / 2).max(MIN_REFRESH)
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every `refresh` (at least one
/// second).
pub async fn start_cache_warmer(cache: AppCache, db: PgPool, refresh: Duration) {
    let mut interval = interval(refresh.max(MIN_REFRESH));
    loop {
        // First tick completes immediately
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Load every business's deposit policy into the cache
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    match queries::get_all_business_settings(db).await {
        Ok(rows) => {
            let count = rows.len();
            for row in rows {
                let policy = row.deposit_policy();
                if let Err(e) = policy.validate() {
                    warn!(business_id = %row.user_id, "{}", e);
                }
                cache.deposit_policies.insert(row.user_id, policy).await;
            }
            info!("Warmed {} deposit policies", count);
        }
        Err(e) => warn!("Failed to warm deposit policy cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_invalidate_business() {
        let cache = AppCache::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        cache.deposit_policies.insert(a, DepositPolicy::default()).await;
        cache
            .deposit_policies
            .insert(
                b,
                DepositPolicy {
                    deposit_percentage: dec!(50),
                    ..DepositPolicy::default()
                },
            )
            .await;

        cache.invalidate_business(a).await;

        assert!(cache.deposit_policies.get(&a).await.is_none());
        assert_eq!(
            cache.deposit_policies.get(&b).await.map(|p| p.deposit_percentage),
            Some(dec!(50))
        );
    }

    #[test]
    fn test_refresh_period() {
        assert_eq!(refresh_period(Duration::from_secs(300)), Duration::from_secs(150));
        assert_eq!(refresh_period(Duration::from_secs(1)), MIN_REFRESH);
        assert_eq!(refresh_period(Duration::ZERO), MIN_REFRESH);
    }

    #[tokio::test]
    async fn test_warmer_survives_zero_refresh() {
        let db = sqlx::postgres::PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(100))
            .connect_lazy("postgres://localhost/bookingfast_test")
            .unwrap();
        let handle = tokio::spawn(start_cache_warmer(
            AppCache::new(Duration::from_secs(1)),
            db,
            Duration::ZERO,
        ));

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!handle.is_finished());

        handle.abort();
        let err = handle.await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let cache = AppCache::default();
        let id = Uuid::new_v4();
        cache
            .deposit_policies
            .insert(id, DepositPolicy::default())
            .await;

        cache.invalidate_all();

        // Removal is lazy but lookups see it immediately
        assert!(cache.deposit_policies.get(&id).await.is_none());
    }
}
