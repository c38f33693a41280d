//! Liveness endpoint

use axum::Json;
use serde_json::{json, Value};

/// Always OK while the process serves requests; does not touch the database
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
