use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::database::models::StreetPhoto;
use crate::error::ApiError;
use crate::services::PhotoService;
use crate::state::AppState;

/// GET /api/admin/photos/:id - photos attached to a street, newest first
pub async fn list_for_street(
    State(state): State<AppState>,
    Path(street_id): Path<i64>,
) -> Result<Json<Vec<StreetPhoto>>, ApiError> {
    let photos = PhotoService::new(state.pool.clone())
        .list_for_street(street_id)
        .await?;
    Ok(Json(photos))
}

/// POST /api/admin/photos - upload placeholder
///
/// Binary upload belongs to the external object store; this service only
/// tracks photo metadata rows.
pub async fn upload() -> Result<(), ApiError> {
    Err(ApiError::not_implemented(
        "Photo upload requires the external object storage integration",
    ))
}

/// DELETE /api/admin/photos/:id
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    PhotoService::new(state.pool.clone()).delete(id).await?;
    Ok(Json(json!({ "success": true })))
}
