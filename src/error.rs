//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Pricing(PricingError::BookingNotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Pricing(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::Pricing(e) => match e {
                PricingError::BookingNotFound { .. } => "booking_not_found",
                PricingError::InvalidAmount { .. } => "invalid_amount",
                PricingError::AmountExceedsBalance { .. } => "amount_exceeds_balance",
                PricingError::InvalidPolicy { .. } => "invalid_policy",
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (message, details) = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                ("Database error".to_string(), None)
            }
            AppError::Pricing(PricingError::AmountExceedsBalance {
                requested,
                max_amount,
            }) => (
                self.to_string(),
                Some(serde_json::json!({
                    "requested": requested.to_string(),
                    "max_amount": max_amount.to_string(),
                })),
            ),
            AppError::Pricing(PricingError::InvalidPolicy { errors, .. }) => {
                (self.to_string(), Some(serde_json::json!({ "errors": errors })))
            }
            AppError::Pricing(_) => (self.to_string(), None),
        };

        let body = PricingErrorResponse {
            error_type: self.error_type().to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
