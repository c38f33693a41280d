//! Pricing service functions with database access.
//!
//! These functions read business settings and bookings through the cache and
//! database, then hand primitive inputs to the pure calculators.

use std::sync::Arc;

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::AppError;

use super::calculators::{self, DepositQuote};
use super::models::DepositPolicy;
use super::queries;
use super::responses::MoneyResponse;

/// Result of a payment link limit check
#[derive(Debug, Clone)]
pub struct PaymentLinkLimit {
    pub booking_id: Uuid,
    pub total: MoneyResponse,
    pub already_paid: MoneyResponse,
    pub max_amount: MoneyResponse,
    /// Amount the new link should request
    pub approved_amount: MoneyResponse,
}

/// Pricing error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum PricingError {
    #[error("Booking {booking_id} not found")]
    BookingNotFound { booking_id: Uuid },

    #[error("{message}")]
    InvalidAmount { message: String },

    #[error("Requested amount {requested} exceeds outstanding balance {max_amount}")]
    AmountExceedsBalance {
        requested: Decimal,
        max_amount: Decimal,
    },

    #[error("Invalid deposit policy: {message}")]
    InvalidPolicy {
        message: String,
        errors: Vec<String>,
    },
}

/// Resolve the deposit policy configured for a business.
///
/// Checks the cache first, then `business_settings`. Concurrent misses for
/// the same business share one query. A business without a settings row
/// gets the default policy. Policies that fail validation are logged and
/// still used.
///
/// An `invalidate_business` that lands while a load is in flight does not
/// cancel it, so the policy read before the settings change can be cached
/// again. It stays until the next warmer refresh rewrites it.
pub async fn resolve_deposit_policy(
    pool: &PgPool,
    cache: &AppCache,
    business_id: Uuid,
) -> Result<DepositPolicy, AppError> {
    cache
        .deposit_policies
        .try_get_with(business_id, load_deposit_policy(pool, business_id))
        .await
        .map_err(|shared: Arc<AppError>| {
            Arc::try_unwrap(shared).unwrap_or_else(|shared| {
                AppError::Database(sqlx::Error::Protocol(shared.to_string()))
            })
        })
}

async fn load_deposit_policy(pool: &PgPool, business_id: Uuid) -> Result<DepositPolicy, AppError> {
    debug!("Cache MISS for deposit policy: {}", business_id);

    let policy = match queries::find_business_settings(pool, business_id).await? {
        Some(settings) => settings.deposit_policy(),
        None => {
            debug!("No business settings for {}, using default policy", business_id);
            DepositPolicy::default()
        }
    };

    if let Err(e) = policy.validate() {
        warn!(business_id = %business_id, "{}", e);
    }

    Ok(policy)
}

/// Quote a booking using the deposit policy stored for `business_id`.
pub async fn quote_booking(
    pool: &PgPool,
    cache: &AppCache,
    business_id: Uuid,
    unit_price: Decimal,
    quantity: i32,
    currency: &str,
) -> Result<DepositQuote, AppError> {
    let policy = resolve_deposit_policy(pool, cache, business_id).await?;
    Ok(calculators::quote(unit_price, quantity, &policy, currency))
}

/// Work out how much a new payment link for `booking_id` may request.
///
/// Bookings are never cached: payments land between calls.
pub async fn payment_link_limit(
    pool: &PgPool,
    booking_id: Uuid,
    requested: Option<Decimal>,
    currency: &str,
) -> Result<PaymentLinkLimit, AppError> {
    calculators::check_requested_amount(requested)?;

    let booking = queries::find_booking_balance(pool, booking_id)
        .await?
        .ok_or(PricingError::BookingNotFound { booking_id })?;

    let already_paid = booking.already_paid();
    let max_amount = calculators::remaining_balance(booking.total_amount, already_paid);
    let approved = calculators::check_payment_link_amount(
        booking.total_amount,
        already_paid,
        requested,
    )?;

    let money = |amount: Decimal| MoneyResponse {
        amount,
        currency: currency.to_string(),
    };

    Ok(PaymentLinkLimit {
        booking_id: booking.id,
        total: money(booking.total_amount),
        already_paid: money(already_paid),
        max_amount: money(max_amount),
        approved_amount: money(approved),
    })
}
