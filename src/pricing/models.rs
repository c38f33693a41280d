//! Pricing models.
//!
//! `PricingContext` and `DepositPolicy` are plain value types consumed by the
//! calculators. `BusinessSettings` and `BookingBalance` use sqlx's FromRow
//! derive for direct database deserialization.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::services::PricingError;

/// Which deposit policy a business has active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositType {
    /// Deposit is a percentage of the price
    #[default]
    Percentage,
    /// Deposit is a flat amount
    FixedAmount,
}

impl DepositType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepositType::Percentage => "percentage",
            DepositType::FixedAmount => "fixed_amount",
        }
    }
}

impl fmt::Display for DepositType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DepositType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "percentage" => Ok(DepositType::Percentage),
            "fixed_amount" | "fixed" => Ok(DepositType::FixedAmount),
            other => Err(PricingError::InvalidPolicy {
                message: format!("Unknown deposit type '{}'", other),
                errors: vec![format!("deposit_type = {}", other)],
            }),
        }
    }
}

/// Inputs to a single deposit computation.
///
/// `total_amount` must already equal `unit_price × quantity`. Nothing here
/// re-derives or checks it: when the deposit is a percentage that does not
/// scale with units, the unit price is recovered as `total_amount / quantity`,
/// so a total that was not scaled upstream silently under-prices the deposit.
///
/// `deposit_percentage` is expected in 0..=100 and `deposit_fixed_amount` to
/// be non-negative. Neither is enforced by the calculators; see
/// [`DepositPolicy::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingContext {
    /// Full price for the booked quantity
    pub total_amount: Decimal,
    /// Units or participants booked
    pub quantity: i32,
    pub deposit_type: DepositType,
    pub deposit_percentage: Decimal,
    pub deposit_fixed_amount: Decimal,
    /// Whether the deposit scales with `quantity`
    pub multiply_by_units: bool,
}

/// Per-business deposit configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepositPolicy {
    pub deposit_type: DepositType,
    pub deposit_percentage: Decimal,
    pub deposit_fixed_amount: Decimal,
    pub multiply_by_units: bool,
}

/// Percentage applied when a business has never configured a deposit
pub const DEFAULT_DEPOSIT_PERCENTAGE: Decimal = dec!(30);

impl Default for DepositPolicy {
    fn default() -> Self {
        Self {
            deposit_type: DepositType::Percentage,
            deposit_percentage: DEFAULT_DEPOSIT_PERCENTAGE,
            deposit_fixed_amount: Decimal::ZERO,
            multiply_by_units: false,
        }
    }
}

impl DepositPolicy {
    /// Build the pricing context for a booking priced at `total_amount`
    pub fn context(&self, total_amount: Decimal, quantity: i32) -> PricingContext {
        PricingContext {
            total_amount,
            quantity,
            deposit_type: self.deposit_type,
            deposit_percentage: self.deposit_percentage,
            deposit_fixed_amount: self.deposit_fixed_amount,
            multiply_by_units: self.multiply_by_units,
        }
    }

    /// Check the policy for values the calculators accept but that are
    /// almost certainly misconfigured.
    ///
    /// Only the fields relevant to the active deposit type are checked.
    pub fn validate(&self) -> Result<(), PricingError> {
        let mut errors = Vec::new();

        match self.deposit_type {
            DepositType::Percentage => {
                if self.deposit_percentage < Decimal::ZERO
                    || self.deposit_percentage > Decimal::ONE_HUNDRED
                {
                    errors.push(format!(
                        "deposit_percentage {} outside 0..=100",
                        self.deposit_percentage
                    ));
                }
            }
            DepositType::FixedAmount => {
                if self.deposit_fixed_amount < Decimal::ZERO {
                    errors.push(format!(
                        "deposit_fixed_amount {} is negative",
                        self.deposit_fixed_amount
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PricingError::InvalidPolicy {
                message: format!("Deposit policy has {} invalid field(s)", errors.len()),
                errors,
            })
        }
    }
}

/// Deposit columns from business_settings
#[derive(Debug, Clone, FromRow)]
pub struct BusinessSettings {
    pub user_id: Uuid,
    pub deposit_type: Option<String>,
    pub deposit_percentage: Option<Decimal>,
    pub deposit_fixed_amount: Option<Decimal>,
    pub multiply_deposit_by_services: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl BusinessSettings {
    /// Deposit policy stored in this record, with defaults for unset columns
    pub fn deposit_policy(&self) -> DepositPolicy {
        let defaults = DepositPolicy::default();

        let deposit_type = match self.deposit_type.as_deref() {
            Some(raw) => raw.parse().unwrap_or_else(|e: PricingError| {
                tracing::warn!(user_id = %self.user_id, "{}, using percentage", e);
                DepositType::Percentage
            }),
            None => defaults.deposit_type,
        };

        DepositPolicy {
            deposit_type,
            deposit_percentage: self
                .deposit_percentage
                .unwrap_or(defaults.deposit_percentage),
            deposit_fixed_amount: self
                .deposit_fixed_amount
                .unwrap_or(defaults.deposit_fixed_amount),
            multiply_by_units: self
                .multiply_deposit_by_services
                .unwrap_or(defaults.multiply_by_units),
        }
    }
}

/// Amount columns from bookings
#[derive(Debug, Clone, FromRow)]
pub struct BookingBalance {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_amount: Decimal,
    pub payment_amount: Option<Decimal>,
    pub payment_status: Option<String>,
}

impl BookingBalance {
    /// Amount the client has paid so far
    pub fn already_paid(&self) -> Decimal {
        self.payment_amount.unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> BusinessSettings {
        BusinessSettings {
            user_id: Uuid::new_v4(),
            deposit_type: Some("fixed_amount".to_string()),
            deposit_percentage: Some(dec!(25)),
            deposit_fixed_amount: Some(dec!(20)),
            multiply_deposit_by_services: Some(true),
            updated_at: None,
        }
    }

    #[test]
    fn test_deposit_type_parse() {
        assert_eq!("percentage".parse::<DepositType>().unwrap(), DepositType::Percentage);
        assert_eq!("fixed_amount".parse::<DepositType>().unwrap(), DepositType::FixedAmount);
        assert_eq!(" Fixed ".parse::<DepositType>().unwrap(), DepositType::FixedAmount);
        assert!("bogus".parse::<DepositType>().is_err());
    }

    #[test]
    fn test_deposit_type_serde_names() {
        let json = serde_json::to_string(&DepositType::FixedAmount).unwrap();
        assert_eq!(json, "\"fixed_amount\"");
        let parsed: DepositType = serde_json::from_str("\"percentage\"").unwrap();
        assert_eq!(parsed, DepositType::Percentage);
    }

    #[test]
    fn test_policy_context_copies_fields() {
        let policy = settings().deposit_policy();
        let ctx = policy.context(dec!(450), 3);

        assert_eq!(ctx.total_amount, dec!(450));
        assert_eq!(ctx.quantity, 3);
        assert_eq!(ctx.deposit_type, DepositType::FixedAmount);
        assert_eq!(ctx.deposit_fixed_amount, dec!(20));
        assert!(ctx.multiply_by_units);
    }

    #[test]
    fn test_settings_defaults_for_unset_columns() {
        let row = BusinessSettings {
            deposit_type: None,
            deposit_percentage: None,
            deposit_fixed_amount: None,
            multiply_deposit_by_services: None,
            ..settings()
        };
        assert_eq!(row.deposit_policy(), DepositPolicy::default());
    }

    #[test]
    fn test_settings_unknown_type_falls_back_to_percentage() {
        let row = BusinessSettings {
            deposit_type: Some("per_hour".to_string()),
            ..settings()
        };
        let policy = row.deposit_policy();
        assert_eq!(policy.deposit_type, DepositType::Percentage);
        assert_eq!(policy.deposit_percentage, dec!(25));
    }

    #[test]
    fn test_validate_accepts_default() {
        assert!(DepositPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_percentage_out_of_range() {
        let policy = DepositPolicy {
            deposit_percentage: dec!(120),
            ..DepositPolicy::default()
        };
        match policy.validate() {
            Err(PricingError::InvalidPolicy { errors, .. }) => assert_eq!(errors.len(), 1),
            other => panic!("expected InvalidPolicy, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_ignores_inactive_fields() {
        // A stale negative fixed amount does not matter for a percentage policy
        let policy = DepositPolicy {
            deposit_fixed_amount: dec!(-5),
            ..DepositPolicy::default()
        };
        assert!(policy.validate().is_ok());

        let policy = DepositPolicy {
            deposit_type: DepositType::FixedAmount,
            deposit_fixed_amount: dec!(-5),
            ..DepositPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_booking_already_paid() {
        let booking = BookingBalance {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            total_amount: dec!(300),
            payment_amount: None,
            payment_status: Some("pending".to_string()),
        };
        assert_eq!(booking.already_paid(), Decimal::ZERO);

        let booking = BookingBalance {
            payment_amount: Some(dec!(90)),
            ..booking
        };
        assert_eq!(booking.already_paid(), dec!(90));
    }
}
