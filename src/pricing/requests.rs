//! Request DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::models::{DepositPolicy, DepositType, PricingContext};

/// Request to compute a deposit from a full pricing context
#[derive(Debug, Deserialize)]
pub struct ComputeDepositRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    pub quantity: i32,
    pub deposit_type: DepositType,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub deposit_percentage: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub deposit_fixed_amount: Option<Decimal>,
    #[serde(default)]
    pub multiply_by_units: bool,
}

impl From<ComputeDepositRequest> for PricingContext {
    fn from(req: ComputeDepositRequest) -> Self {
        PricingContext {
            total_amount: req.total_amount,
            quantity: req.quantity,
            deposit_type: req.deposit_type,
            deposit_percentage: req.deposit_percentage.unwrap_or(Decimal::ZERO),
            deposit_fixed_amount: req.deposit_fixed_amount.unwrap_or(Decimal::ZERO),
            multiply_by_units: req.multiply_by_units,
        }
    }
}

/// Deposit policy fields as sent by clients
#[derive(Debug, Deserialize)]
pub struct DepositPolicyRequest {
    pub deposit_type: DepositType,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub deposit_percentage: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub deposit_fixed_amount: Option<Decimal>,
    #[serde(default)]
    pub multiply_by_units: bool,
}

impl From<DepositPolicyRequest> for DepositPolicy {
    fn from(req: DepositPolicyRequest) -> Self {
        DepositPolicy {
            deposit_type: req.deposit_type,
            deposit_percentage: req.deposit_percentage.unwrap_or(Decimal::ZERO),
            deposit_fixed_amount: req.deposit_fixed_amount.unwrap_or(Decimal::ZERO),
            multiply_by_units: req.multiply_by_units,
        }
    }
}

/// Request carrying a total and a deposit (remaining balance, effective rate)
#[derive(Debug, Deserialize)]
pub struct BalanceRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub deposit_amount: Decimal,
}

/// Request to quote a booking under an explicit policy
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    pub quantity: i32,
    pub policy: DepositPolicyRequest,
    #[serde(default)]
    pub currency: Option<String>,
    /// Reject policies that fail validation instead of pricing them as-is
    #[serde(default)]
    pub strict: bool,
}

/// Request to quote a booking under a business's stored policy
#[derive(Debug, Deserialize)]
pub struct BusinessQuoteRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    pub quantity: i32,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Request to check the amount of a new payment link
#[derive(Debug, Default, Deserialize)]
pub struct PaymentLinkLimitRequest {
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub requested_amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compute_deposit_request_into_context() {
        let req: ComputeDepositRequest = serde_json::from_str(
            r#"{
                "total_amount": "450",
                "quantity": 3,
                "deposit_type": "fixed_amount",
                "deposit_fixed_amount": "20",
                "multiply_by_units": true
            }"#,
        )
        .unwrap();

        let ctx = PricingContext::from(req);
        assert_eq!(ctx.total_amount, dec!(450));
        assert_eq!(ctx.quantity, 3);
        assert_eq!(ctx.deposit_type, DepositType::FixedAmount);
        assert_eq!(ctx.deposit_fixed_amount, dec!(20));
        assert_eq!(ctx.deposit_percentage, dec!(0));
        assert!(ctx.multiply_by_units);
    }

    #[test]
    fn test_quote_request_defaults() {
        let req: QuoteRequest = serde_json::from_str(
            r#"{
                "unit_price": "100",
                "quantity": 2,
                "policy": { "deposit_type": "percentage", "deposit_percentage": "30" }
            }"#,
        )
        .unwrap();

        assert!(!req.strict);
        assert!(req.currency.is_none());
        assert!(!req.policy.multiply_by_units);
    }

    #[test]
    fn test_payment_link_request_empty_body() {
        let req: PaymentLinkLimitRequest = serde_json::from_str("{}").unwrap();
        assert!(req.requested_amount.is_none());
    }
}
