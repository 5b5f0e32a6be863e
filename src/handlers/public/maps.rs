use axum::response::Json;
use serde_json::{json, Value};

use crate::config;

/// GET /api/maps/key - maps API key for the frontend map widget
pub async fn key() -> Json<Value> {
    Json(json!({ "apiKey": config::config().maps.api_key }))
}
