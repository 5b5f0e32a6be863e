use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::database::models::Street;
use crate::error::ApiError;
use crate::services::StreetService;
use crate::state::AppState;

/// GET /api/streets - all streets, newest first
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Street>>, ApiError> {
    let streets = StreetService::new(state.pool.clone()).list().await?;
    Ok(Json(streets))
}

/// GET /api/streets/:id - a single street
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Street>, ApiError> {
    let street = StreetService::new(state.pool.clone()).get(id).await?;
    Ok(Json(street))
}
