use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{AppendHeaders, IntoResponse, Json},
    Extension,
};
use serde_json::{json, Value};

use crate::api::requests::{parse_body, CreateSessionRequest};
use crate::error::ApiError;
use crate::identity::{clear_session_cookie, session_cookie, UserInfo};
use crate::middleware::auth::{session_token_from_headers, CurrentUser};
use crate::state::AppState;

/// GET /api/oauth/google/redirect_url - start the OAuth login flow
pub async fn google_redirect_url(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let redirect_url = state
        .identity
        .oauth_redirect_url("google")
        .await
        .map_err(|e| {
            tracing::error!("failed to fetch OAuth redirect URL: {}", e);
            ApiError::internal_server_error("Failed to get redirect URL")
        })?;

    Ok(Json(json!({ "redirectUrl": redirect_url })))
}

/// POST /api/sessions - exchange an OAuth code for a session cookie
pub async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let request: CreateSessionRequest = parse_body(payload)?;
    request.validate()?;

    let token = state
        .identity
        .exchange_code(&request.code)
        .await
        .map_err(|e| {
            tracing::error!("OAuth code exchange failed: {}", e);
            ApiError::internal_server_error("Failed to exchange code")
        })?;

    Ok((
        AppendHeaders([(header::SET_COOKIE, session_cookie(&token))]),
        Json(json!({ "success": true })),
    ))
}

/// GET /api/users/me - the authenticated identity (session required)
pub async fn me(Extension(current): Extension<CurrentUser>) -> Json<UserInfo> {
    Json(current.user)
}

/// GET /api/logout - invalidate the session and clear the cookie
///
/// Provider-side invalidation is best-effort; the cookie is cleared either
/// way so the browser session always ends.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token_from_headers(&headers) {
        if let Err(e) = state.identity.invalidate_session(&token).await {
            tracing::debug!("session invalidation failed: {}", e);
        }
    }

    (
        AppendHeaders([(header::SET_COOKIE, clear_session_cookie())]),
        Json(json!({ "success": true })),
    )
}
