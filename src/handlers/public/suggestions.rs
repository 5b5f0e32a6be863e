use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::Value;

use crate::api::requests::{parse_body, CreateSuggestionRequest};
use crate::database::models::StreetSuggestion;
use crate::error::ApiError;
use crate::services::suggestion_service::NewSuggestion;
use crate::services::SuggestionService;
use crate::state::AppState;

/// POST /api/suggestions - citizen submission, unauthenticated
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<StreetSuggestion>), ApiError> {
    let request: CreateSuggestionRequest = parse_body(payload)?;
    request.validate()?;

    let suggestion = SuggestionService::new(state.pool.clone())
        .create(NewSuggestion {
            street_name: request.street_name,
            neighborhood: request.neighborhood,
            description: request.description,
            suggested_by_name: request.suggested_by_name,
            suggested_by_email: request.suggested_by_email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(suggestion)))
}
