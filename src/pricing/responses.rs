//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::calculators::DepositQuote;
use super::models::DepositType;
use super::services::PaymentLinkLimit;

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

/// Response for deposit computation (unrounded)
#[derive(Debug, Serialize)]
pub struct DepositResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub deposit: Decimal,
}

/// Response for remaining balance computation
#[derive(Debug, Serialize)]
pub struct RemainingBalanceResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub remaining_balance: Decimal,
}

/// Response for effective rate computation
#[derive(Debug, Serialize)]
pub struct EffectiveRateResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub effective_rate: Decimal,
}

/// Response for a booking quote
#[derive(Debug, Serialize)]
pub struct DepositQuoteResponse {
    pub unit_price: MoneyResponse,
    pub quantity: i32,
    pub total: MoneyResponse,
    pub deposit_type: DepositType,
    pub multiply_by_units: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub deposit_exact: Decimal,
    pub deposit_due: MoneyResponse,
    pub remaining_balance: MoneyResponse,
    #[serde(with = "rust_decimal::serde::str")]
    pub effective_rate: Decimal,
}

impl From<DepositQuote> for DepositQuoteResponse {
    fn from(q: DepositQuote) -> Self {
        Self {
            unit_price: q.unit_price,
            quantity: q.quantity,
            total: q.total,
            deposit_type: q.deposit_type,
            multiply_by_units: q.multiply_by_units,
            deposit_exact: q.deposit_exact,
            deposit_due: q.deposit_due,
            remaining_balance: q.remaining_balance,
            effective_rate: q.effective_rate,
        }
    }
}

/// Response for a payment link limit check
#[derive(Debug, Serialize)]
pub struct PaymentLinkLimitResponse {
    pub booking_id: Uuid,
    pub total: MoneyResponse,
    pub already_paid: MoneyResponse,
    pub max_amount: MoneyResponse,
    pub approved_amount: MoneyResponse,
}

impl From<PaymentLinkLimit> for PaymentLinkLimitResponse {
    fn from(limit: PaymentLinkLimit) -> Self {
        Self {
            booking_id: limit.booking_id,
            total: limit.total,
            already_paid: limit.already_paid,
            max_amount: limit.max_amount,
            approved_amount: limit.approved_amount,
        }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
