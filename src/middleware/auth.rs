use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::identity::{UserInfo, SESSION_COOKIE_NAME};
use crate::state::AppState;

/// Authenticated identity for the current request, resolved from the session
/// cookie by `session_auth`. The token is kept so downstream operations can
/// act against the users service on the caller's behalf.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub user: UserInfo,
    pub session_token: String,
}

/// Session authentication middleware.
///
/// Extracts the session token from the request cookie and resolves it through
/// the external identity provider. Missing or invalid tokens terminate the
/// request with 401; on success the resolved identity is injected into
/// request extensions for downstream layers and handlers.
pub async fn session_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token_from_headers(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    let user = state
        .identity
        .resolve_session(&token)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    request.extensions_mut().insert(CurrentUser {
        user,
        session_token: token,
    });

    Ok(next.run(request).await)
}

/// Extract the session token from the Cookie header(s).
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    for header in headers.get_all(axum::http::header::COOKIE) {
        let Ok(value) = header.to_str() else { continue };
        for pair in value.split(';') {
            if let Some((name, token)) = pair.trim().split_once('=') {
                if name == SESSION_COOKIE_NAME && !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }
    None
}
