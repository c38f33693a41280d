//! Deposit pricing engine for BookingFast.
//!
//! Computes the deposit (acompte) owed when a booking is created, the balance
//! left to pay, and the effective deposit rate. The booking app calls this
//! module over HTTP/JSON; the calculators are also usable directly.

pub mod calculators;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    check_payment_link_amount, compute_deposit, effective_rate, quote, remaining_balance,
    round_money, DepositQuote,
};
pub use models::{DepositPolicy, DepositType, PricingContext};
pub use routes::router;
pub use services::{PaymentLinkLimit, PricingError};
