use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::Value;

use crate::api::requests::{parse_body, ReviewSuggestionRequest};
use crate::database::models::StreetSuggestion;
use crate::error::ApiError;
use crate::services::SuggestionService;
use crate::state::AppState;

/// GET /api/admin/suggestions - review queue, newest first
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<StreetSuggestion>>, ApiError> {
    let suggestions = SuggestionService::new(state.pool.clone()).list().await?;
    Ok(Json(suggestions))
}

/// PUT /api/admin/suggestions/:id/review - record the review decision;
/// approval also creates the street
pub async fn review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<Json<StreetSuggestion>, ApiError> {
    let request: ReviewSuggestionRequest = parse_body(payload)?;

    let suggestion = SuggestionService::new(state.pool.clone())
        .review(id, request.is_approved, request.admin_notes)
        .await?;

    Ok(Json(suggestion))
}
