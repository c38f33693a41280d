//! Pricing API route handlers

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use tracing::info;
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

use super::calculators;
use super::models::{DepositPolicy, PricingContext};
use super::requests::{
    BalanceRequest, BusinessQuoteRequest, ComputeDepositRequest, PaymentLinkLimitRequest,
    QuoteRequest,
};
use super::responses::{
    DepositQuoteResponse, DepositResponse, EffectiveRateResponse, PaymentLinkLimitResponse,
    RemainingBalanceResponse,
};
use super::services;

/// Routes mounted under `/api/pricing`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/deposit", post(compute_deposit))
        .route("/remaining-balance", post(remaining_balance))
        .route("/effective-rate", post(effective_rate))
        .route("/quote", post(quote))
        .route("/businesses/:business_id/quote", post(business_quote))
        .route(
            "/bookings/:booking_id/payment-link-limit",
            post(payment_link_limit),
        )
}

async fn compute_deposit(Json(req): Json<ComputeDepositRequest>) -> Json<DepositResponse> {
    let context = PricingContext::from(req);
    Json(DepositResponse {
        deposit: calculators::compute_deposit(&context),
    })
}

async fn remaining_balance(Json(req): Json<BalanceRequest>) -> Json<RemainingBalanceResponse> {
    Json(RemainingBalanceResponse {
        remaining_balance: calculators::remaining_balance(req.total_amount, req.deposit_amount),
    })
}

async fn effective_rate(Json(req): Json<BalanceRequest>) -> Json<EffectiveRateResponse> {
    Json(EffectiveRateResponse {
        effective_rate: calculators::effective_rate(req.total_amount, req.deposit_amount),
    })
}

async fn quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<DepositQuoteResponse>> {
    let policy = DepositPolicy::from(req.policy);
    if req.strict {
        policy.validate()?;
    }

    let currency = req
        .currency
        .unwrap_or_else(|| state.config.default_currency.clone());
    let q = calculators::quote(req.unit_price, req.quantity, &policy, &currency);

    Ok(Json(q.into()))
}

async fn business_quote(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
    Json(req): Json<BusinessQuoteRequest>,
) -> Result<Json<DepositQuoteResponse>> {
    let currency = req
        .currency
        .unwrap_or_else(|| state.config.default_currency.clone());

    let q = services::quote_booking(
        &state.db,
        &state.cache,
        business_id,
        req.unit_price,
        req.quantity,
        &currency,
    )
    .await?;

    Ok(Json(q.into()))
}

async fn payment_link_limit(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    Json(req): Json<PaymentLinkLimitRequest>,
) -> Result<Json<PaymentLinkLimitResponse>> {
    let currency = req
        .currency
        .unwrap_or_else(|| state.config.default_currency.clone());

    let limit =
        services::payment_link_limit(&state.db, booking_id, req.requested_amount, &currency)
            .await?;

    info!(
        booking_id = %booking_id,
        approved = %limit.approved_amount.amount,
        max = %limit.max_amount.amount,
        "Payment link amount approved"
    );

    Ok(Json(limit.into()))
}
