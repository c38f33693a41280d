//! Core pricing calculation functions.
//!
//! Pure functions for deposit math - no database access, no retained state.
//! Degenerate input degrades to zero instead of failing so that a
//! misconfigured service never blocks a booking.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use tracing::warn;

use crate::pricing::models::{DepositPolicy, DepositType, PricingContext};
use crate::pricing::responses::MoneyResponse;
use crate::pricing::services::PricingError;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use bookingfast_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Deposit owed now for the given pricing context.
///
/// | policy                    | result                                   |
/// |---------------------------|------------------------------------------|
/// | fixed, per unit           | `fixed × quantity`                       |
/// | fixed, flat               | `fixed`                                  |
/// | percentage, per unit      | `total × percentage / 100`               |
/// | percentage, flat          | `(total / quantity) × percentage / 100`  |
///
/// Returns zero when `total_amount < 0` or `quantity <= 0`. The result is
/// not rounded; callers round for display or persistence.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use bookingfast_pricing::pricing::{compute_deposit, DepositType, PricingContext};
///
/// let ctx = PricingContext {
///     total_amount: dec!(300),
///     quantity: 3,
///     deposit_type: DepositType::Percentage,
///     deposit_percentage: dec!(30),
///     deposit_fixed_amount: dec!(0),
///     multiply_by_units: false,
/// };
/// assert_eq!(compute_deposit(&ctx), dec!(30));
/// ```
pub fn compute_deposit(context: &PricingContext) -> Decimal {
    if context.total_amount < Decimal::ZERO || context.quantity <= 0 {
        warn!(
            total_amount = %context.total_amount,
            quantity = context.quantity,
            "Degenerate pricing context, no deposit requested"
        );
        return Decimal::ZERO;
    }

    let quantity = Decimal::from(context.quantity);

    let deposit = match (context.deposit_type, context.multiply_by_units) {
        (DepositType::FixedAmount, true) => context.deposit_fixed_amount.checked_mul(quantity),
        (DepositType::FixedAmount, false) => Some(context.deposit_fixed_amount),
        (DepositType::Percentage, true) => {
            percent_of(context.total_amount, context.deposit_percentage)
        }
        (DepositType::Percentage, false) => context
            .total_amount
            .checked_div(quantity)
            .and_then(|unit_price| percent_of(unit_price, context.deposit_percentage)),
    };

    // Overflow counts as degenerate input
    deposit.unwrap_or_else(|| {
        warn!(?context, "Deposit computation overflowed, no deposit requested");
        Decimal::ZERO
    })
}

fn percent_of(amount: Decimal, percentage: Decimal) -> Option<Decimal> {
    amount
        .checked_mul(percentage)?
        .checked_div(Decimal::ONE_HUNDRED)
}

/// What is left to pay once `deposit_amount` has been collected.
///
/// Never negative: an overpayment leaves nothing to pay rather than a credit.
pub fn remaining_balance(total_amount: Decimal, deposit_amount: Decimal) -> Decimal {
    total_amount
        .saturating_sub(deposit_amount)
        .max(Decimal::ZERO)
}

/// Share of the total that the deposit represents, as a percentage.
///
/// Zero when `total_amount` is zero. Informational only.
pub fn effective_rate(total_amount: Decimal, deposit_amount: Decimal) -> Decimal {
    if total_amount.is_zero() {
        return Decimal::ZERO;
    }

    deposit_amount
        .checked_div(total_amount)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Full deposit breakdown for a booking
#[derive(Debug, Clone)]
pub struct DepositQuote {
    pub unit_price: MoneyResponse,
    pub quantity: i32,
    pub total: MoneyResponse,
    pub deposit_type: DepositType,
    pub multiply_by_units: bool,
    /// Deposit before currency rounding
    pub deposit_exact: Decimal,
    /// Deposit rounded to cents, the amount actually requested
    pub deposit_due: MoneyResponse,
    pub remaining_balance: MoneyResponse,
    /// Percentage of the total, rounded to 2 places
    pub effective_rate: Decimal,
}

/// Price a booking of `quantity` units at `unit_price` under `policy`.
///
/// The remaining balance is taken against the rounded deposit so that
/// `deposit_due + remaining_balance == total` whenever the deposit does not
/// exceed the total.
pub fn quote(
    unit_price: Decimal,
    quantity: i32,
    policy: &DepositPolicy,
    currency: &str,
) -> DepositQuote {
    let total = if quantity > 0 {
        unit_price.saturating_mul(Decimal::from(quantity))
    } else {
        Decimal::ZERO
    };

    let deposit = compute_deposit(&policy.context(total, quantity));
    let deposit_due = round_money(deposit, 2);

    let money = |amount: Decimal| MoneyResponse {
        amount,
        currency: currency.to_string(),
    };

    DepositQuote {
        unit_price: money(unit_price),
        quantity,
        total: money(total),
        deposit_type: policy.deposit_type,
        multiply_by_units: policy.multiply_by_units,
        deposit_exact: deposit,
        deposit_due: money(deposit_due),
        remaining_balance: money(remaining_balance(total, deposit_due)),
        effective_rate: round_money(effective_rate(total, deposit), 2),
    }
}

/// Largest amount a new payment link may request for a booking.
///
/// With no `requested` amount the link covers the whole outstanding balance.
/// Unlike the deposit math this refuses bad input: a payment link is an
/// explicit request, not part of the booking flow.
pub fn check_payment_link_amount(
    total_amount: Decimal,
    already_paid: Decimal,
    requested: Option<Decimal>,
) -> Result<Decimal, PricingError> {
    check_requested_amount(requested)?;
    let max_amount = remaining_balance(total_amount, already_paid);

    match requested {
        None => Ok(max_amount),
        Some(amount) if amount > max_amount => Err(PricingError::AmountExceedsBalance {
            requested: amount,
            max_amount,
        }),
        Some(amount) => Ok(amount),
    }
}

/// Reject a payment link amount that is zero or negative.
///
/// Needs no booking data, so callers can run it before loading the booking.
pub fn check_requested_amount(requested: Option<Decimal>) -> Result<(), PricingError> {
    match requested {
        Some(amount) if amount <= Decimal::ZERO => Err(PricingError::InvalidAmount {
            message: format!("Payment link amount must be positive, got {}", amount),
        }),
        _ => Ok(()),
    }
}
