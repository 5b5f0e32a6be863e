use axum::{extract::State, http::StatusCode, response::Json, Extension};
use serde_json::Value;

use crate::api::requests::{parse_body, RegisterAdminRequest};
use crate::database::models::AdminUser;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::services::AdminService;
use crate::state::AppState;

/// POST /api/admin/users - grant admin access to the acting identity
///
/// Self-registration confirmation: the requested email must match the email
/// of the session performing the request, re-resolved against the identity
/// provider. There is no HTTP path to deactivate an admin.
pub async fn register(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<AdminUser>), ApiError> {
    let request: RegisterAdminRequest = parse_body(payload)?;
    request.validate()?;

    let admin = AdminService::new(state.pool.clone(), state.identity.clone())
        .register(&current.session_token, &request.email)
        .await?;

    Ok((StatusCode::CREATED, Json(admin)))
}
