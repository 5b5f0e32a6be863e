use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::api::requests::{parse_body, CreateStreetRequest, UpdateStreetRequest};
use crate::database::models::Street;
use crate::error::ApiError;
use crate::services::street_service::{NewStreet, StreetPatch};
use crate::services::StreetService;
use crate::state::AppState;

/// POST /api/admin/streets - create a street
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Street>), ApiError> {
    let request: CreateStreetRequest = parse_body(payload)?;
    request.validate()?;

    let street = StreetService::new(state.pool.clone())
        .create(NewStreet {
            name: request.name,
            neighborhood: request.neighborhood,
            latitude: request.latitude,
            longitude: request.longitude,
            status: request.status.unwrap_or_default(),
            notes: request.notes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(street)))
}

/// PUT /api/admin/streets/:id - partial update
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<Json<Street>, ApiError> {
    let request: UpdateStreetRequest = parse_body(payload)?;
    let patch = StreetPatch::from_request(&request);

    let street = StreetService::new(state.pool.clone()).update(id, patch).await?;
    Ok(Json(street))
}

/// DELETE /api/admin/streets/:id
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    StreetService::new(state.pool.clone()).delete(id).await?;
    Ok(Json(json!({ "success": true })))
}
