//! Cache administration handlers
//!
//! The booking app calls `invalidate_business` after a business edits its
//! deposit settings so that new quotes pick up the change before the TTL.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::cache::CacheStats;
use crate::AppState;

pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

pub async fn invalidate_all(State(state): State<AppState>) -> StatusCode {
    state.cache.invalidate_all();
    StatusCode::NO_CONTENT
}

pub async fn invalidate_business(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> StatusCode {
    state.cache.invalidate_business(business_id).await;
    StatusCode::NO_CONTENT
}
