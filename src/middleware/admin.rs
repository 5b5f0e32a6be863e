use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::auth::CurrentUser;
use crate::error::ApiError;
use crate::services::admin_service::AdminService;
use crate::state::AppState;

/// Admin authorization middleware. Runs after `session_auth`.
///
/// The authenticated identity must have an active row in the admin registry,
/// matched on external user id or email. Read-only; the request proceeds
/// unchanged on success.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let current = request
        .extensions()
        .get::<CurrentUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    let is_admin = AdminService::new(state.pool.clone(), state.identity.clone())
        .is_admin(&current.user)
        .await?;

    if !is_admin {
        tracing::warn!(
            user_id = %current.user.id,
            "non-admin user attempted an admin operation"
        );
        return Err(ApiError::forbidden("Admin access required"));
    }

    Ok(next.run(request).await)
}
