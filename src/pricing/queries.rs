//! Database queries for the pricing engine.
//!
//! Read-only: business settings and bookings are owned by the booking app.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

use super::models::{BookingBalance, BusinessSettings};

/// Find the deposit settings of a business (keyed by owner user id)
pub async fn find_business_settings(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<BusinessSettings>, AppError> {
    let settings = sqlx::query_as::<_, BusinessSettings>(
        r#"
        SELECT
            user_id, deposit_type, deposit_percentage,
            deposit_fixed_amount, multiply_deposit_by_services, updated_at
        FROM business_settings
        WHERE user_id = $1
        ORDER BY updated_at DESC NULLS LAST
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(settings)
}

/// Get deposit settings of every business (for cache warming)
pub async fn get_all_business_settings(pool: &PgPool) -> Result<Vec<BusinessSettings>, AppError> {
    let settings = sqlx::query_as::<_, BusinessSettings>(
        r#"
        SELECT DISTINCT ON (user_id)
            user_id, deposit_type, deposit_percentage,
            deposit_fixed_amount, multiply_deposit_by_services, updated_at
        FROM business_settings
        ORDER BY user_id, updated_at DESC NULLS LAST
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(settings)
}

/// Find the amounts of a booking
pub async fn find_booking_balance(
    pool: &PgPool,
    booking_id: Uuid,
) -> Result<Option<BookingBalance>, AppError> {
    let booking = sqlx::query_as::<_, BookingBalance>(
        r#"
        SELECT id, user_id, total_amount, payment_amount, payment_status
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(booking_id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}
